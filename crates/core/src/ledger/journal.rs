//! Journal aggregate: balanced journal entries made of single-sided lines.
//!
//! A journal is append-only. Every "mutation" returns a new journal and
//! leaves the original untouched.

use std::collections::HashSet;

use chrono::NaiveDate;
use ledgerline_shared::types::{JournalEntryId, JournalId, JournalLineId};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;
use super::types::{EntryTotals, EntryType};
use super::validation::{require_date, require_text, validate_amounts, validate_lines};

/// A single line of a journal entry.
///
/// Exactly one of `debit`/`credit` is positive; the other is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalLine {
    id: JournalLineId,
    description: String,
    account_id: String,
    debit: Decimal,
    credit: Decimal,
}

impl JournalLine {
    /// Creates a validated line.
    ///
    /// # Errors
    ///
    /// Returns an error if `description` or `account_id` is blank, or the
    /// amounts are not single-sided and positive.
    pub fn new(
        id: JournalLineId,
        description: impl Into<String>,
        account_id: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
    ) -> Result<Self, LedgerError> {
        let description = description.into();
        let account_id = account_id.into();
        require_text("description", &description)?;
        require_text("account_id", &account_id)?;
        validate_amounts(debit, credit)?;

        Ok(Self {
            id,
            description,
            account_id,
            debit,
            credit,
        })
    }

    /// Creates a debit line with a fresh id.
    ///
    /// # Errors
    ///
    /// See [`JournalLine::new`].
    pub fn debit_line(
        description: impl Into<String>,
        account_id: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        Self::new(
            JournalLineId::new(),
            description,
            account_id,
            amount,
            Decimal::ZERO,
        )
    }

    /// Creates a credit line with a fresh id.
    ///
    /// # Errors
    ///
    /// See [`JournalLine::new`].
    pub fn credit_line(
        description: impl Into<String>,
        account_id: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        Self::new(
            JournalLineId::new(),
            description,
            account_id,
            Decimal::ZERO,
            amount,
        )
    }

    /// Line id, unique within its entry.
    #[must_use]
    pub fn id(&self) -> JournalLineId {
        self.id
    }

    /// Line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Code of the account this line posts to.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Debit amount (zero for credit lines).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        self.debit
    }

    /// Credit amount (zero for debit lines).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.credit
    }

    /// Side that carries the amount.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        if self.debit > Decimal::ZERO {
            EntryType::Debit
        } else {
            EntryType::Credit
        }
    }

    /// The positive amount, whichever side it is on.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.debit.max(self.credit)
    }

    /// Swaps debit and credit under a fresh id.
    fn reversed(&self) -> Self {
        Self {
            id: JournalLineId::new(),
            description: format!("Reversal: {}", self.description),
            account_id: self.account_id.clone(),
            debit: self.credit,
            credit: self.debit,
        }
    }
}

/// A dated, balanced group of journal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    id: JournalEntryId,
    description: String,
    date: NaiveDate,
    reference: String,
    lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Creates a validated, balanced entry.
    ///
    /// `reference` is free-form and may be empty.
    ///
    /// # Errors
    ///
    /// Returns an error if `description` is blank, `date` is unset, there are
    /// fewer than 2 lines, a line id repeats, or debits != credits.
    pub fn new(
        id: JournalEntryId,
        description: impl Into<String>,
        date: NaiveDate,
        reference: impl Into<String>,
        lines: Vec<JournalLine>,
    ) -> Result<Self, LedgerError> {
        let description = description.into();
        require_text("description", &description)?;
        require_date(date)?;
        validate_lines(&lines)?;

        Ok(Self {
            id,
            description,
            date,
            reference: reference.into(),
            lines,
        })
    }

    /// Creates a validated entry with a fresh id.
    ///
    /// # Errors
    ///
    /// See [`JournalEntry::new`].
    pub fn create(
        description: impl Into<String>,
        date: NaiveDate,
        reference: impl Into<String>,
        lines: Vec<JournalLine>,
    ) -> Result<Self, LedgerError> {
        Self::new(JournalEntryId::new(), description, date, reference, lines)
    }

    /// Builds the reversing entry for this one.
    ///
    /// Every debit becomes a credit and vice versa; descriptions are prefixed
    /// with `Reversal: `. The original entry is untouched.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnsetDate` if `date` is unset.
    pub fn reversal(
        &self,
        date: NaiveDate,
        reference: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        Self::create(
            format!("Reversal: {}", self.description),
            date,
            reference,
            self.lines.iter().map(JournalLine::reversed).collect(),
        )
    }

    /// Entry id.
    #[must_use]
    pub fn id(&self) -> JournalEntryId {
        self.id
    }

    /// Entry description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Transaction date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// External reference (invoice number, voucher, ...).
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Lines in posting order.
    #[must_use]
    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    /// Debit and credit totals across the lines.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_pairs(self.lines.iter().map(|l| (l.debit, l.credit)))
    }
}

/// An ordered, append-only collection of balanced journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Journal {
    id: JournalId,
    name: String,
    description: String,
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Creates a validated journal.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `description` is blank, an entry is not
    /// balanced, or two entries share an id.
    pub fn new(
        id: JournalId,
        name: impl Into<String>,
        description: impl Into<String>,
        entries: Vec<JournalEntry>,
    ) -> Result<Self, LedgerError> {
        let name = name.into();
        let description = description.into();
        require_text("name", &name)?;
        require_text("description", &description)?;

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            Self::check_entry(entry)?;
            if !seen.insert(entry.id) {
                return Err(LedgerError::DuplicateEntryId(entry.id));
            }
        }

        Ok(Self {
            id,
            name,
            description,
            entries,
        })
    }

    /// Creates an empty journal with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `description` is blank.
    pub fn create(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        Self::new(JournalId::new(), name, description, Vec::new())
    }

    fn check_entry(entry: &JournalEntry) -> Result<(), LedgerError> {
        let totals = entry.totals();
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.debit,
                credit: totals.credit,
            });
        }
        Ok(())
    }

    /// Returns a new journal with `entry` appended.
    ///
    /// # Errors
    ///
    /// Returns an error if `entry` is unbalanced or its id is already present.
    pub fn with_entry(&self, entry: JournalEntry) -> Result<Self, LedgerError> {
        Self::check_entry(&entry)?;
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(LedgerError::DuplicateEntryId(entry.id));
        }

        let mut entries = self.entries.clone();
        entries.push(entry);
        Ok(Self {
            entries,
            ..self.clone()
        })
    }

    /// Returns a renamed copy.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BlankField` if `name` is blank.
    pub fn with_name(&self, name: impl Into<String>) -> Result<Self, LedgerError> {
        let name = name.into();
        require_text("name", &name)?;
        Ok(Self {
            name,
            ..self.clone()
        })
    }

    /// Returns a copy with a new description.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BlankField` if `description` is blank.
    pub fn with_description(&self, description: impl Into<String>) -> Result<Self, LedgerError> {
        let description = description.into();
        require_text("description", &description)?;
        Ok(Self {
            description,
            ..self.clone()
        })
    }

    /// Journal id.
    #[must_use]
    pub fn id(&self) -> JournalId {
        self.id
    }

    /// Journal name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Journal description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the journal has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Debit and credit totals across every entry.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_pairs(self.entries.iter().map(|e| {
            let totals = e.totals();
            (totals.debit, totals.credit)
        }))
    }
}
