//! Double-entry bookkeeping logic.
//!
//! This module implements the ledger side of the pipeline:
//! - Domain types (entry sides, account types, totals)
//! - Validated account descriptors and the chart of accounts
//! - Journal lines, balanced journal entries and the append-only journal
//! - Ledger entries and the journal-to-ledger projection
//! - Business rule validation and error types

pub mod account;
pub mod entry;
pub mod error;
pub mod journal;
pub mod projection;
pub mod types;
pub mod validation;

#[cfg(test)]
mod projection_props;
#[cfg(test)]
mod validation_props;

pub use account::{Account, ChartOfAccounts};
pub use entry::LedgerEntry;
pub use error::{ErrorKind, LedgerError};
pub use journal::{Journal, JournalEntry, JournalLine};
pub use projection::{Ledger, LedgerAccount};
pub use types::{AccountType, EntryTotals, EntryType};
