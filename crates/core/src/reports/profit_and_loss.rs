//! Profit and loss statement over an inclusive date window.

use chrono::NaiveDate;
use ledgerline_shared::types::{JournalEntryId, StatementId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::error::ReportError;
use crate::ledger::validation::is_blank;
use crate::ledger::{AccountType, Ledger, LedgerAccount, LedgerEntry};

/// Income or expense activity from one ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLossEntry {
    account_id: String,
    account_name: String,
    account_type: AccountType,
    journal_entry_id: JournalEntryId,
    description: String,
    date: NaiveDate,
    amount: Decimal,
}

impl ProfitAndLossEntry {
    /// Income takes the entry's credit, expense takes its debit.
    fn from_ledger_entry(account: &LedgerAccount, entry: &LedgerEntry) -> Self {
        let amount = match account.account_type() {
            AccountType::Income => entry.credit(),
            _ => entry.debit(),
        };

        Self {
            account_id: account.code().to_string(),
            account_name: account.name().to_string(),
            account_type: account.account_type(),
            journal_entry_id: entry.journal_entry_id(),
            description: entry.description().to_string(),
            date: entry.date(),
            amount,
        }
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

    /// Income or expense.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Journal entry the amount was posted by.
    #[must_use]
    pub fn journal_entry_id(&self) -> JournalEntryId {
        self.journal_entry_id
    }

    /// Posting description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Posting date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Amount on the statement side of the account.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Per-account total within a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Account code.
    pub account_id: String,
    /// Account name.
    pub account_name: String,
    /// Income or expense.
    pub account_type: AccountType,
    /// Sum of amounts posted in the window.
    pub total: Decimal,
}

/// Income and expense activity between two dates, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitAndLossStatement {
    id: StatementId,
    name: String,
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    entries: Vec<ProfitAndLossEntry>,
}

impl ProfitAndLossStatement {
    /// Derives the statement directly from `ledger`.
    ///
    /// Entries dated exactly on `start_date` or `end_date` are included.
    ///
    /// # Errors
    ///
    /// - `ReportError::InvalidDateRange` if `start_date > end_date`
    /// - `ReportError::BlankField` for a blank name or description
    pub fn from_ledger(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        ledger: &Ledger,
    ) -> Result<Self, ReportError> {
        if start_date > end_date {
            return Err(ReportError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
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

        let entries: Vec<ProfitAndLossEntry> = ledger
            .accounts()
            .iter()
            .filter(|a| a.account_type().is_temporary())
            .flat_map(|account| {
                account
                    .entries()
                    .iter()
                    .filter(|e| e.date() >= start_date && e.date() <= end_date)
                    .map(move |e| ProfitAndLossEntry::from_ledger_entry(account, e))
            })
            .collect();

        let statement = Self {
            id: StatementId::new(),
            name,
            description,
            start_date,
            end_date,
            entries,
        };

        debug!(
            statement_id = %statement.id,
            ledger_id = %ledger.id(),
            start = %start_date,
            end = %end_date,
            entries = statement.entries.len(),
            "Derived profit and loss statement"
        );

        Ok(statement)
    }

    /// Statement id.
    #[must_use]
    pub fn id(&self) -> StatementId {
        self.id
    }

    /// Statement name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Statement description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// First day of the window.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the window.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// One entry per qualifying ledger entry.
    #[must_use]
    pub fn entries(&self) -> &[ProfitAndLossEntry] {
        &self.entries
    }

    fn total_of(&self, account_type: AccountType) -> Decimal {
        self.entries
            .iter()
            .filter(|e| e.account_type == account_type)
            .map(ProfitAndLossEntry::amount)
            .sum()
    }

    /// Sum of income amounts.
    #[must_use]
    pub fn total_revenue(&self) -> Decimal {
        self.total_of(AccountType::Income)
    }

    /// Sum of expense amounts.
    #[must_use]
    pub fn total_expense(&self) -> Decimal {
        self.total_of(AccountType::Expense)
    }

    /// Revenue minus expense.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.total_revenue() - self.total_expense()
    }

    /// Totals grouped by account, in order of first appearance.
    #[must_use]
    pub fn by_account(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<AccountSummary> = Vec::new();
        for entry in &self.entries {
            if let Some(summary) = summaries
                .iter_mut()
                .find(|s| s.account_id == entry.account_id)
            {
                summary.total += entry.amount;
            } else {
                summaries.push(AccountSummary {
                    account_id: entry.account_id.clone(),
                    account_name: entry.account_name.clone(),
                    account_type: entry.account_type,
                    total: entry.amount,
                });
            }
        }
        summaries
    }
}
