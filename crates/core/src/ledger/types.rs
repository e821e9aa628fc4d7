//! Ledger domain types shared by accounts, journals and derived snapshots.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Entry type: either Debit or Credit.
///
/// Also used as an account's normal side, the side on which the account
/// conventionally carries a positive balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl EntryType {
    /// Returns the string representation of the side.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// Net balance of `debit`/`credit` measured on this side.
    ///
    /// - Debit-normal: balance = debit - credit
    /// - Credit-normal: balance = credit - debit
    #[must_use]
    pub fn natural_balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Revenue earned during the period.
    Income,
    /// Cost incurred during the period.
    Expense,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Conventional normal side for the type.
    ///
    /// Asset/Expense are debit-normal; Liability/Equity/Income are credit-normal.
    #[must_use]
    pub const fn default_normal_side(self) -> EntryType {
        match self {
            Self::Asset | Self::Expense => EntryType::Debit,
            Self::Liability | Self::Equity | Self::Income => EntryType::Credit,
        }
    }

    /// Returns true for permanent accounts reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns true for temporary accounts zeroed at period close.
    #[must_use]
    pub const fn is_temporary(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Debit and credit totals for a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Sums debit/credit pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Decimal, Decimal)>) -> Self {
        let (debit, credit) = pairs
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), (debit, credit)| {
                (d + debit, c + credit)
            });
        Self::new(debit, credit)
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}
