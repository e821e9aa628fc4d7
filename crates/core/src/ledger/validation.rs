//! Business rule validation for ledger construction.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::journal::JournalLine;
use super::types::{EntryTotals, EntryType};

/// Returns true if `value` is empty or whitespace only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Rejects blank text for a required field.
///
/// # Errors
///
/// Returns `LedgerError::BlankField` naming `field`.
pub fn require_text(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if is_blank(value) {
        return Err(LedgerError::BlankField { field });
    }
    Ok(())
}

/// Rejects the unset default date (`1970-01-01`).
///
/// # Errors
///
/// Returns `LedgerError::UnsetDate`.
pub fn require_date(date: NaiveDate) -> Result<(), LedgerError> {
    if date == NaiveDate::default() {
        return Err(LedgerError::UnsetDate);
    }
    Ok(())
}

/// Validates a debit/credit pair and returns the side that carries the amount.
///
/// Exactly one side must be positive and the other exactly zero.
///
/// # Errors
///
/// Returns an error for negative, zero, or dual-sided amounts.
pub fn validate_amounts(debit: Decimal, credit: Decimal) -> Result<EntryType, LedgerError> {
    if debit < Decimal::ZERO || credit < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }

    match (debit > Decimal::ZERO, credit > Decimal::ZERO) {
        (true, false) => Ok(EntryType::Debit),
        (false, true) => Ok(EntryType::Credit),
        (true, true) => Err(LedgerError::InvalidEntryType),
        (false, false) => Err(LedgerError::ZeroAmount),
    }
}

/// Validates the lines of a journal entry and returns their totals.
///
/// # Errors
///
/// Returns an error if there are fewer than 2 lines, a line id repeats, or
/// the lines do not balance.
pub fn validate_lines(lines: &[JournalLine]) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut seen = HashSet::with_capacity(lines.len());
    for line in lines {
        if !seen.insert(line.id()) {
            return Err(LedgerError::DuplicateLineId(line.id()));
        }
    }

    let totals = EntryTotals::from_pairs(lines.iter().map(|l| (l.debit(), l.credit())));
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
