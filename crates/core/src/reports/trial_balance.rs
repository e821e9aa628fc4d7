//! Trial balance: per-account debit and credit totals as of a date.

use chrono::NaiveDate;
use ledgerline_shared::AggregationConfig;
use ledgerline_shared::types::TrialBalanceId;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ReportError;
use crate::ledger::validation::is_blank;
use crate::ledger::{Account, AccountType, EntryType, Ledger, LedgerAccount};

/// One account's aggregate in a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceEntry {
    account_id: String,
    account_name: String,
    account_type: AccountType,
    parent_code: Option<String>,
    debit: Decimal,
    credit: Decimal,
    normally: EntryType,
}

impl TrialBalanceEntry {
    /// Creates a validated trial balance entry.
    ///
    /// # Errors
    ///
    /// Returns an error if `account_id`/`account_name` is blank or either
    /// total is negative.
    pub fn new(
        account_id: impl Into<String>,
        account_name: impl Into<String>,
        account_type: AccountType,
        parent_code: Option<String>,
        debit: Decimal,
        credit: Decimal,
        normally: EntryType,
    ) -> Result<Self, ReportError> {
        let account_id = account_id.into();
        let account_name = account_name.into();
        if is_blank(&account_id) {
            return Err(ReportError::BlankField { field: "account_id" });
        }
        if is_blank(&account_name) {
            return Err(ReportError::BlankField {
                field: "account_name",
            });
        }
        if debit < Decimal::ZERO || credit < Decimal::ZERO {
            return Err(ReportError::NegativeAmount(account_id));
        }

        Ok(Self {
            account_id,
            account_name,
            account_type,
            parent_code,
            debit,
            credit,
            normally,
        })
    }

    /// Aggregates the entries of `account` dated on or before `up_to_date`.
    fn from_ledger_account(account: &LedgerAccount, up_to_date: NaiveDate) -> Self {
        let (debit, credit) = account
            .entries()
            .iter()
            .filter(|e| e.date() <= up_to_date)
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), e| {
                (d + e.debit(), c + e.credit())
            });

        Self {
            account_id: account.code().to_string(),
            account_name: account.name().to_string(),
            account_type: account.account_type(),
            parent_code: account.parent_code().map(str::to_string),
            debit,
            credit,
            normally: account.normally(),
        }
    }

    /// Zero-balance stub for an account absent from the trial balance.
    pub(crate) fn stub(account: &Account) -> Self {
        Self {
            account_id: account.code().to_string(),
            account_name: account.name().to_string(),
            account_type: account.account_type(),
            parent_code: account.parent_code().map(str::to_string),
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            normally: account.normally(),
        }
    }

    /// Adds a debit amount.
    pub(crate) fn add_debit(&mut self, amount: Decimal) {
        self.debit += amount;
    }

    /// Adds a credit amount.
    pub(crate) fn add_credit(&mut self, amount: Decimal) {
        self.credit += amount;
    }

    /// Sets debit equal to credit, netting the account to zero.
    pub(crate) fn offset_with_debit(&mut self) {
        self.debit = self.credit;
    }

    /// Sets credit equal to debit, netting the account to zero.
    pub(crate) fn offset_with_credit(&mut self) {
        self.credit = self.debit;
    }

    /// Account code.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Account name.
    #[must_use]
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Account classification.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Parent account code, if any.
    #[must_use]
    pub fn parent_code(&self) -> Option<&str> {
        self.parent_code.as_deref()
    }

    /// Total debit.
    #[must_use]
    pub fn debit(&self) -> Decimal {
        self.debit
    }

    /// Total credit.
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.credit
    }

    /// Normal side.
    #[must_use]
    pub fn normally(&self) -> EntryType {
        self.normally
    }

    /// Balance measured on the account's normal side.
    #[must_use]
    pub fn natural_balance(&self) -> Decimal {
        self.normally.natural_balance(self.debit, self.credit)
    }
}

/// A dated snapshot of aggregate debit/credit per account.
///
/// A trial balance starts open and can be closed exactly once with
/// [`TrialBalance::close_accounts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    id: TrialBalanceId,
    name: String,
    description: String,
    date: NaiveDate,
    entries: Vec<TrialBalanceEntry>,
    is_closed: bool,
}

impl TrialBalance {
    /// Creates an open trial balance from prepared entries.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::BlankField` if `name` or `description` is blank.
    pub fn new(
        id: TrialBalanceId,
        name: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        entries: Vec<TrialBalanceEntry>,
    ) -> Result<Self, ReportError> {
        let name = name.into();
        let description = description.into();
        if is_blank(&name) {
            return Err(ReportError::BlankField { field: "name" });
        }
        if is_blank(&description) {
            return Err(ReportError::BlankField {
                field: "description",
            });
        }

        Ok(Self {
            id,
            name,
            description,
            date,
            entries,
            is_closed: false,
        })
    }

    /// Aggregates `ledger` as of `up_to_date` (inclusive).
    ///
    /// Every ledger account yields one entry, including accounts whose
    /// entries all fall after the cutoff. There is no lower date bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger has no accounts, holds no entries at
    /// all, or `name`/`description` is blank.
    pub fn from_ledger(
        name: impl Into<String>,
        description: impl Into<String>,
        up_to_date: NaiveDate,
        ledger: &Ledger,
    ) -> Result<Self, ReportError> {
        Self::from_ledger_with(
            name,
            description,
            up_to_date,
            ledger,
            &AggregationConfig::default(),
        )
    }

    /// [`TrialBalance::from_ledger`] with explicit aggregation settings.
    ///
    /// # Errors
    ///
    /// See [`TrialBalance::from_ledger`].
    pub fn from_ledger_with(
        name: impl Into<String>,
        description: impl Into<String>,
        up_to_date: NaiveDate,
        ledger: &Ledger,
        aggregation: &AggregationConfig,
    ) -> Result<Self, ReportError> {
        let accounts = ledger.accounts();
        if accounts.is_empty() {
            return Err(ReportError::EmptyLedger);
        }
        if ledger.entry_count() == 0 {
            return Err(ReportError::NoEntries);
        }

        let aggregate = |account: &LedgerAccount| {
            TrialBalanceEntry::from_ledger_account(account, up_to_date)
        };
        let entries: Vec<TrialBalanceEntry> = if aggregation.should_parallelize(accounts.len()) {
            accounts.par_iter().map(aggregate).collect()
        } else {
            accounts.iter().map(aggregate).collect()
        };

        let trial_balance = Self::new(TrialBalanceId::new(), name, description, up_to_date, entries)?;

        debug!(
            trial_balance_id = %trial_balance.id,
            ledger_id = %ledger.id(),
            as_of = %up_to_date,
            accounts = trial_balance.entries.len(),
            "Derived trial balance from ledger"
        );
        if !trial_balance.is_balanced() {
            warn!(
                trial_balance_id = %trial_balance.id,
                debit = %trial_balance.total_debit(),
                credit = %trial_balance.total_credit(),
                "Derived trial balance is not balanced"
            );
        }

        Ok(trial_balance)
    }

    /// Copy carrying `entries` and marked closed; identity fields are kept.
    pub(crate) fn closed_with(&self, entries: Vec<TrialBalanceEntry>) -> Self {
        Self {
            entries,
            is_closed: true,
            ..self.clone()
        }
    }

    /// Trial balance id.
    #[must_use]
    pub fn id(&self) -> TrialBalanceId {
        self.id
    }

    /// Trial balance name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trial balance description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The "as of" cutoff date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Entries in ledger account order.
    #[must_use]
    pub fn entries(&self) -> &[TrialBalanceEntry] {
        &self.entries
    }

    /// Looks up an entry by account code.
    #[must_use]
    pub fn entry(&self, account_id: &str) -> Option<&TrialBalanceEntry> {
        self.entries.iter().find(|e| e.account_id == account_id)
    }

    /// Whether the income and expense accounts have been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Sum of entry debits.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.entries.iter().map(TrialBalanceEntry::debit).sum()
    }

    /// Sum of entry credits.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.entries.iter().map(TrialBalanceEntry::credit).sum()
    }

    /// `total_credit - total_debit`.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.total_credit() - self.total_debit()
    }

    /// Whether total debits equal total credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.balance().is_zero()
    }

    /// Income minus expense, measured on the current figures.
    ///
    /// Always zero once the trial balance is closed.
    #[must_use]
    pub fn net_income(&self) -> Decimal {
        let (income, expense) = self.entries.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), e| match e.account_type {
                AccountType::Income => (income + e.credit - e.debit, expense),
                AccountType::Expense => (income, expense + e.debit - e.credit),
                _ => (income, expense),
            },
        );
        income - expense
    }
}

