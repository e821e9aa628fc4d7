//! Report error types.

use chrono::NaiveDate;
use ledgerline_shared::AppError;
use ledgerline_shared::types::TrialBalanceId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::{AccountType, ErrorKind};

/// Errors that can occur during report derivation and closing.
#[derive(Debug, Error)]
pub enum ReportError {
    // ========== Validation Errors ==========
    /// A required text field is empty or whitespace.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Ledger has no accounts to aggregate.
    #[error("Ledger has no accounts")]
    EmptyLedger,

    /// Ledger accounts hold no entries at all.
    #[error("Ledger contains no entries")]
    NoEntries,

    /// Debit or credit total is negative.
    #[error("Amounts for account {0} cannot be negative")]
    NegativeAmount(String),

    /// Natural-side balance is negative on a closed trial balance.
    #[error("Account {account_id} has a negative balance of {balance}")]
    NegativeBalance {
        /// The account code.
        account_id: String,
        /// The offending balance.
        balance: Decimal,
    },

    /// Account type not allowed in this report.
    #[error("Account {account_id} of type {account_type} is not allowed here")]
    InvalidAccountType {
        /// The account code.
        account_id: String,
        /// The rejected type.
        account_type: AccountType,
    },

    /// Closing target is not an equity account.
    #[error("Closing account {code} must be an equity account, got {account_type}")]
    InvalidClosingAccount {
        /// The closing account code.
        code: String,
        /// Its actual type.
        account_type: AccountType,
    },

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    // ========== State Errors ==========
    /// Trial balance has already been closed.
    #[error("Trial balance {0} is already closed")]
    AlreadyClosed(TrialBalanceId),

    /// Trial balance must be closed first.
    #[error("Trial balance {0} is not closed")]
    NotClosed(TrialBalanceId),

    /// Trial balance debits and credits differ.
    #[error("Trial balance {id} is not balanced. Debit: {debit}, Credit: {credit}")]
    NotBalanced {
        /// The trial balance id.
        id: TrialBalanceId,
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
    },

    // ========== Not Found ==========
    /// Closing equity account could not be located after stub synthesis.
    #[error("Closing account not found: {0}")]
    ClosingAccountNotFound(String),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BlankField { .. } => "BLANK_FIELD",
            Self::EmptyLedger => "EMPTY_LEDGER",
            Self::NoEntries => "NO_ENTRIES",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::NegativeBalance { .. } => "NEGATIVE_BALANCE",
            Self::InvalidAccountType { .. } => "INVALID_ACCOUNT_TYPE",
            Self::InvalidClosingAccount { .. } => "INVALID_CLOSING_ACCOUNT",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::AlreadyClosed(_) => "ALREADY_CLOSED",
            Self::NotClosed(_) => "NOT_CLOSED",
            Self::NotBalanced { .. } => "NOT_BALANCED",
            Self::ClosingAccountNotFound(_) => "CLOSING_ACCOUNT_NOT_FOUND",
        }
    }

    /// Returns the error category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyClosed(_) | Self::NotClosed(_) | Self::NotBalanced { .. } => {
                ErrorKind::State
            }
            Self::ClosingAccountNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::Validation(err.to_string()),
            ErrorKind::State => Self::BusinessRule(err.to_string()),
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
        }
    }
}
