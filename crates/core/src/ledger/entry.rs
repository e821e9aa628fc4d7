//! Ledger entry domain types.

use chrono::NaiveDate;
use ledgerline_shared::types::{JournalEntryId, LedgerEntryId, LedgerId};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;
use super::journal::{JournalEntry, JournalLine};
use super::types::EntryType;
use super::validation::{require_text, validate_amounts};

/// A single posting in a ledger account.
///
/// One ledger entry is derived per journal line that matches an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    id: LedgerEntryId,
    description: String,
    ledger_id: LedgerId,
    journal_entry_id: JournalEntryId,
    debit: Decimal,
    credit: Decimal,
    date: NaiveDate,
    reference: String,
}

impl LedgerEntry {
    /// Creates a validated ledger entry with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if `description` is blank or the amounts are not
    /// single-sided and positive.
    pub fn new(
        ledger_id: LedgerId,
        journal_entry_id: JournalEntryId,
        description: impl Into<String>,
        debit: Decimal,
        credit: Decimal,
        date: NaiveDate,
        reference: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let description = description.into();
        require_text("description", &description)?;
        validate_amounts(debit, credit)?;

        Ok(Self {
            id: LedgerEntryId::new(),
            description,
            ledger_id,
            journal_entry_id,
            debit,
            credit,
            date,
            reference: reference.into(),
        })
    }

    /// Projects a journal line. Date, reference and description come from the
    /// owning journal entry; amounts come from the line.
    pub(crate) fn from_journal_line(
        ledger_id: LedgerId,
        entry: &JournalEntry,
        line: &JournalLine,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            description: entry.description().to_string(),
            ledger_id,
            journal_entry_id: entry.id(),
            debit: line.debit(),
            credit: line.credit(),
            date: entry.date(),
            reference: entry.reference().to_string(),
        }
    }

    /// Entry id.
    #[must_use]
    pub fn id(&self) -> LedgerEntryId {
        self.id
    }

    /// Description inherited from the journal entry.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Owning ledger.
    #[must_use]
    pub fn ledger_id(&self) -> LedgerId {
        self.ledger_id
    }

    /// Originating journal entry.
    #[must_use]
    pub fn journal_entry_id(&self) -> JournalEntryId {
        self.journal_entry_id
    }

    /// Debit amount (zero for credits).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        self.debit
    }

    /// Credit amount (zero for debits).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.credit
    }

    /// Posting date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// External reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
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

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_new_entry() {
        let entry = LedgerEntry::new(
            LedgerId::new(),
            JournalEntryId::new(),
            "Rent",
            dec!(1200),
            Decimal::ZERO,
            date(),
            "RENT-05",
        )
        .unwrap();
        assert_eq!(entry.entry_type(), EntryType::Debit);
        assert_eq!(entry.signed_amount(), dec!(1200));
        assert_eq!(entry.reference(), "RENT-05");
    }

    #[test]
    fn test_new_entry_rejects_dual_sided() {
        let result = LedgerEntry::new(
            LedgerId::new(),
            JournalEntryId::new(),
            "Rent",
            dec!(1),
            dec!(1),
            date(),
            "",
        );
        assert!(matches!(result, Err(LedgerError::InvalidEntryType)));
    }

    #[test]
    fn test_from_journal_line_inherits_entry_fields() {
        let journal_entry = JournalEntry::create(
            "Office rent",
            date(),
            "RENT-05",
            vec![
                JournalLine::debit_line("Rent expense", "6000", dec!(900)).unwrap(),
                JournalLine::credit_line("Paid from bank", "1000", dec!(900)).unwrap(),
            ],
        )
        .unwrap();
        let ledger_id = LedgerId::new();

        let entry =
            LedgerEntry::from_journal_line(ledger_id, &journal_entry, &journal_entry.lines()[1]);

        assert_eq!(entry.ledger_id(), ledger_id);
        assert_eq!(entry.journal_entry_id(), journal_entry.id());
        assert_eq!(entry.description(), "Office rent");
        assert_eq!(entry.reference(), "RENT-05");
        assert_eq!(entry.date(), date());
        assert_eq!(entry.credit(), dec!(900));
        assert_eq!(entry.signed_amount(), dec!(-900));
    }
}
