//! Core bookkeeping logic for Ledgerline.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every value is an immutable, validated snapshot; derivations build new
//! snapshots from existing ones.
//!
//! # Modules
//!
//! - `ledger` - Accounts, journals, and the journal-to-ledger projection
//! - `reports` - Trial balance, period closing, balance sheet, profit and loss

pub mod ledger;
pub mod reports;

#[cfg(test)]
mod test_support;

pub use ledger::{
    Account, AccountType, ChartOfAccounts, EntryTotals, EntryType, ErrorKind, Journal,
    JournalEntry, JournalLine, Ledger, LedgerAccount, LedgerEntry, LedgerError,
};
pub use reports::{
    AccountSummary, BalanceEntry, BalanceSheet, ProfitAndLossEntry, ProfitAndLossStatement,
    ReportError, TrialBalance, TrialBalanceEntry,
};
