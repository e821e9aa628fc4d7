//! Ledger error types for construction and validation failures.
//!
//! This module defines all errors that can occur while building accounts,
//! journal lines, journal entries, journals and ledgers.

use ledgerline_shared::AppError;
use ledgerline_shared::types::{JournalEntryId, JournalLineId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Broad category of a bookkeeping error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input rejected at a construction boundary.
    Validation,
    /// Operation invoked in the wrong workflow state.
    State,
    /// A referenced entity could not be located.
    NotFound,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Field Errors ==========
    /// A required text field is empty or whitespace.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Journal entry date was left at the unset default.
    #[error("Journal entry date must be set")]
    UnsetDate,

    // ========== Amount Errors ==========
    /// Line has neither a debit nor a credit.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount is negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Line carries both a debit and a credit.
    #[error("Line must specify either debit or credit, not both")]
    InvalidEntryType,

    // ========== Entry Errors ==========
    /// Journal entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Two lines in one entry share an id.
    #[error("Duplicate line id {0} in journal entry")]
    DuplicateLineId(JournalLineId),

    /// Two entries in one journal share an id.
    #[error("Duplicate journal entry id {0}")]
    DuplicateEntryId(JournalEntryId),

    // ========== Account Errors ==========
    /// At least one account is required.
    #[error("At least one account is required")]
    NoAccounts,

    /// Account code appears more than once.
    #[error("Duplicate account code: {0}")]
    DuplicateAccountCode(String),

    /// Parent code does not resolve to an account in the chart.
    #[error("Account {code} references unknown parent {parent_code}")]
    UnknownParentAccount {
        /// The child account code.
        code: String,
        /// The missing parent code.
        parent_code: String,
    },

    /// Following parent codes leads back to the starting account.
    #[error("Account hierarchy contains a cycle through {0}")]
    ParentCycle(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BlankField { .. } => "BLANK_FIELD",
            Self::UnsetDate => "UNSET_DATE",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidEntryType => "INVALID_ENTRY_TYPE",
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::DuplicateLineId(_) => "DUPLICATE_LINE_ID",
            Self::DuplicateEntryId(_) => "DUPLICATE_ENTRY_ID",
            Self::NoAccounts => "NO_ACCOUNTS",
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::UnknownParentAccount { .. } => "UNKNOWN_PARENT_ACCOUNT",
            Self::ParentCycle(_) => "PARENT_CYCLE",
        }
    }

    /// Every ledger error is a construction failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
