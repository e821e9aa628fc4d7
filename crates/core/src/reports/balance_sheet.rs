//! Balance sheet derived from a closed, balanced trial balance.

use chrono::NaiveDate;
use ledgerline_shared::types::BalanceSheetId;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::error::ReportError;
use super::trial_balance::{TrialBalance, TrialBalanceEntry};
use crate::ledger::validation::is_blank;
use crate::ledger::{AccountType, EntryType};

/// A single asset, liability or equity line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceEntry {
    account_id: String,
    account_name: String,
    account_type: AccountType,
    parent_code: Option<String>,
    balance: Decimal,
    normally: EntryType,
}

impl BalanceEntry {
    /// Creates a validated balance entry.
    ///
    /// # Errors
    ///
    /// - `ReportError::BlankField` for a blank code or name
    /// - `ReportError::InvalidAccountType` for income or expense accounts
    /// - `ReportError::NegativeBalance` if `balance < 0`
    pub fn new(
        account_id: impl Into<String>,
        account_name: impl Into<String>,
        account_type: AccountType,
        parent_code: Option<String>,
        balance: Decimal,
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
        if !account_type.is_balance_sheet() {
            return Err(ReportError::InvalidAccountType {
                account_id,
                account_type,
            });
        }
        if balance < Decimal::ZERO {
            return Err(ReportError::NegativeBalance {
                account_id,
                balance,
            });
        }

        Ok(Self {
            account_id,
            account_name,
            account_type,
            parent_code,
            balance,
            normally,
        })
    }

    fn from_trial_balance_entry(entry: &TrialBalanceEntry) -> Result<Self, ReportError> {
        Self::new(
            entry.account_id(),
            entry.account_name(),
            entry.account_type(),
            entry.parent_code().map(str::to_string),
            entry.natural_balance(),
            entry.normally(),
        )
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

    /// Balance on the account's normal side.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Normal side.
    #[must_use]
    pub fn normally(&self) -> EntryType {
        self.normally
    }
}

/// Asset, liability and equity balances at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    id: BalanceSheetId,
    name: String,
    description: String,
    date: NaiveDate,
    entries: Vec<BalanceEntry>,
}

impl BalanceSheet {
    /// Builds a balance sheet from a closed, balanced trial balance.
    ///
    /// Income and expense entries are dropped; every remaining entry is
    /// carried with its natural-side balance.
    ///
    /// # Errors
    ///
    /// - `ReportError::NotClosed` if the trial balance is still open
    /// - `ReportError::NotBalanced` if its debits and credits differ
    /// - `ReportError::NegativeBalance` if an account sits on its wrong side
    pub fn from_trial_balance(
        name: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        trial_balance: &TrialBalance,
    ) -> Result<Self, ReportError> {
        if !trial_balance.is_closed() {
            return Err(ReportError::NotClosed(trial_balance.id()));
        }
        if !trial_balance.is_balanced() {
            return Err(ReportError::NotBalanced {
                id: trial_balance.id(),
                debit: trial_balance.total_debit(),
                credit: trial_balance.total_credit(),
            });
        }

        let entries = trial_balance
            .entries()
            .iter()
            .filter(|e| e.account_type().is_balance_sheet())
            .map(BalanceEntry::from_trial_balance_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let sheet = Self::new(BalanceSheetId::new(), name, description, date, entries)?;

        debug!(
            balance_sheet_id = %sheet.id,
            trial_balance_id = %trial_balance.id(),
            accounts = sheet.entries.len(),
            assets = %sheet.total_assets(),
            liabilities = %sheet.total_liabilities(),
            equity = %sheet.total_equity(),
            "Derived balance sheet"
        );

        Ok(sheet)
    }

    /// Creates a balance sheet from prepared entries.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::BlankField` if `name` or `description` is blank.
    pub fn new(
        id: BalanceSheetId,
        name: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        entries: Vec<BalanceEntry>,
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
        })
    }

    /// Balance sheet id.
    #[must_use]
    pub fn id(&self) -> BalanceSheetId {
        self.id
    }

    /// Balance sheet name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Balance sheet description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Report date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Entries in trial balance order.
    #[must_use]
    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    /// Looks up an entry by account code.
    #[must_use]
    pub fn entry(&self, account_id: &str) -> Option<&BalanceEntry> {
        self.entries.iter().find(|e| e.account_id == account_id)
    }

    fn total_of(&self, account_type: AccountType) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.account_type == account_type)
            .map(BalanceEntry::balance)
            .sum()
    }

    /// Total assets.
    #[must_use]
    pub fn total_assets(&self) -> Decimal {
        self.total_of(AccountType::Asset)
    }

    /// Total liabilities.
    #[must_use]
    pub fn total_liabilities(&self) -> Decimal {
        self.total_of(AccountType::Liability)
    }

    /// Total equity.
    #[must_use]
    pub fn total_equity(&self) -> Decimal {
        self.total_of(AccountType::Equity)
    }

    /// Assets minus liabilities and equity; zero when the sheet balances.
    #[must_use]
    pub fn balance_amount(&self) -> Decimal {
        self.total_assets() - (self.total_liabilities() + self.total_equity())
    }

    /// Whether assets equal liabilities plus equity.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.balance_amount().is_zero()
    }
}
