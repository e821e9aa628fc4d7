//! Ledger projection: journal lines grouped into per-account ledger entries.

use std::collections::HashSet;

use ledgerline_shared::AggregationConfig;
use ledgerline_shared::types::LedgerId;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::account::Account;
use super::entry::LedgerEntry;
use super::error::LedgerError;
use super::journal::Journal;
use super::types::{AccountType, EntryTotals, EntryType};
use super::validation::require_text;

/// A ledger account: the account descriptor plus its postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAccount {
    code: String,
    name: String,
    account_type: AccountType,
    description: String,
    parent_code: Option<String>,
    normally: EntryType,
    entries: Vec<LedgerEntry>,
}

impl LedgerAccount {
    /// Creates a ledger account for `account` holding `entries`.
    #[must_use]
    pub fn new(account: &Account, entries: Vec<LedgerEntry>) -> Self {
        Self {
            code: account.code().to_string(),
            name: account.name().to_string(),
            account_type: account.account_type(),
            description: account.description().to_string(),
            parent_code: account.parent_code().map(str::to_string),
            normally: account.normally(),
            entries,
        }
    }

    /// Account code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Account name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Account classification.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Account description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parent account code, if any.
    #[must_use]
    pub fn parent_code(&self) -> Option<&str> {
        self.parent_code.as_deref()
    }

    /// Normal side.
    #[must_use]
    pub fn normally(&self) -> EntryType {
        self.normally
    }

    /// Entries in journal order (not re-sorted by date).
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Entries sorted by date; same-date entries keep journal order.
    #[must_use]
    pub fn chronological_entries(&self) -> Vec<&LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.date());
        entries
    }

    /// Sum of debits.
    #[must_use]
    pub fn debit(&self) -> Decimal {
        self.entries.iter().map(LedgerEntry::debit).sum()
    }

    /// Sum of credits.
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.entries.iter().map(LedgerEntry::credit).sum()
    }

    /// `credit - debit`, regardless of normal side.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.credit() - self.debit()
    }

    /// Balance measured on the account's normal side.
    #[must_use]
    pub fn natural_balance(&self) -> Decimal {
        self.normally.natural_balance(self.debit(), self.credit())
    }
}

/// A ledger derived from a journal. Accounts without activity are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    id: LedgerId,
    name: String,
    description: String,
    accounts: Vec<LedgerAccount>,
}

impl Ledger {
    /// Creates a ledger from already-projected accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `description` is blank, or two accounts
    /// share a code.
    pub fn new(
        id: LedgerId,
        name: impl Into<String>,
        description: impl Into<String>,
        accounts: Vec<LedgerAccount>,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        let description = description.into();
        require_text("name", &name)?;
        require_text("description", &description)?;

        let mut seen = HashSet::with_capacity(accounts.len());
        for account in &accounts {
            if !seen.insert(account.code.as_str()) {
                return Err(LedgerError::DuplicateAccountCode(account.code.clone()));
            }
        }

        Ok(Self {
            id,
            name,
            description,
            accounts,
        })
    }

    /// Projects `journal` onto `accounts`.
    ///
    /// For each account, every journal line whose `account_id` equals the
    /// account code becomes one ledger entry. Entries keep journal order.
    /// Accounts with no matching lines are dropped, and lines whose account
    /// is not in `accounts` are not projected.
    ///
    /// # Errors
    ///
    /// Returns an error if `name`/`description` is blank, `accounts` is empty,
    /// or an account code repeats.
    pub fn from_journal(
        name: impl Into<String>,
        description: impl Into<String>,
        journal: &Journal,
        accounts: &[Account],
    ) -> Result<Self, LedgerError> {
        Self::from_journal_with(
            name,
            description,
            journal,
            accounts,
            &AggregationConfig::default(),
        )
    }

    /// [`Ledger::from_journal`] with explicit aggregation settings.
    ///
    /// # Errors
    ///
    /// See [`Ledger::from_journal`].
    pub fn from_journal_with(
        name: impl Into<String>,
        description: impl Into<String>,
        journal: &Journal,
        accounts: &[Account],
        aggregation: &AggregationConfig,
    ) -> Result<Self, LedgerError> {
        if accounts.is_empty() {
            return Err(LedgerError::NoAccounts);
        }
        let mut seen = HashSet::with_capacity(accounts.len());
        if let Some(duplicate) = accounts.iter().find(|a| !seen.insert(a.code())) {
            return Err(LedgerError::DuplicateAccountCode(duplicate.code().to_string()));
        }

        let id = LedgerId::new();
        let project = |account: &Account| -> Option<LedgerAccount> {
            let entries: Vec<LedgerEntry> = journal
                .entries()
                .iter()
                .flat_map(|entry| {
                    entry
                        .lines()
                        .iter()
                        .filter(|line| line.account_id() == account.code())
                        .map(move |line| LedgerEntry::from_journal_line(id, entry, line))
                })
                .collect();

            (!entries.is_empty()).then(|| LedgerAccount::new(account, entries))
        };

        let ledger_accounts: Vec<LedgerAccount> = if aggregation.should_parallelize(accounts.len())
        {
            accounts.par_iter().filter_map(project).collect()
        } else {
            accounts.iter().filter_map(project).collect()
        };

        debug!(
            ledger_id = %id,
            journal_id = %journal.id(),
            accounts = accounts.len(),
            active_accounts = ledger_accounts.len(),
            "Projected journal into ledger"
        );

        Self::new(id, name, description, ledger_accounts)
    }

    /// Ledger id.
    #[must_use]
    pub fn id(&self) -> LedgerId {
        self.id
    }

    /// Ledger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ledger description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Ledger accounts in account-set order.
    #[must_use]
    pub fn accounts(&self) -> &[LedgerAccount] {
        &self.accounts
    }

    /// Looks up a ledger account by code.
    #[must_use]
    pub fn account(&self, code: &str) -> Option<&LedgerAccount> {
        self.accounts.iter().find(|a| a.code == code)
    }

    /// Total number of ledger entries across all accounts.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.accounts.iter().map(|a| a.entries.len()).sum()
    }

    /// Debit and credit totals across every account.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_pairs(self.accounts.iter().map(|a| (a.debit(), a.credit())))
    }
}
