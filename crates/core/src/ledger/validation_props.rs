//! Property-based tests for journal line and entry validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::journal::{JournalEntry, JournalLine};
use crate::test_support::{base_date, positive_amount};

/// Strategy to generate a negative amount.
fn negative_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn entry(lines: Vec<JournalLine>) -> Result<JournalEntry, LedgerError> {
    JournalEntry::create("Generated", base_date(), "GEN", lines)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Negative amounts are rejected on either side.
    #[test]
    fn prop_negative_amount_rejected(amount in negative_amount()) {
        prop_assert!(matches!(
            JournalLine::debit_line("x", "1000", amount),
            Err(LedgerError::NegativeAmount)
        ));
        prop_assert!(matches!(
            JournalLine::credit_line("x", "1000", amount),
            Err(LedgerError::NegativeAmount)
        ));
    }

    /// A line carrying both a debit and a credit is rejected.
    #[test]
    fn prop_dual_sided_line_rejected(debit in positive_amount(), credit in positive_amount()) {
        let result = JournalLine::new(
            ledgerline_shared::types::JournalLineId::new(),
            "x",
            "1000",
            debit,
            credit,
        );
        prop_assert!(matches!(result, Err(LedgerError::InvalidEntryType)));
    }

    /// Entries whose debits and credits differ are rejected with both totals.
    #[test]
    fn prop_unbalanced_entry_rejected(debit in positive_amount(), credit in positive_amount()) {
        prop_assume!(debit != credit);

        let result = entry(vec![
            JournalLine::debit_line("d", "1000", debit).unwrap(),
            JournalLine::credit_line("c", "4000", credit).unwrap(),
        ]);

        match result {
            Err(LedgerError::UnbalancedEntry { debit: d, credit: c }) => {
                prop_assert_eq!(d, debit);
                prop_assert_eq!(c, credit);
            }
            other => prop_assert!(false, "expected UnbalancedEntry, got {:?}", other),
        }
    }

    /// Multi-line entries whose debits sum to the credit are accepted.
    #[test]
    fn prop_multi_line_balanced_accepted(
        amounts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLine> = amounts
            .iter()
            .map(|a| JournalLine::debit_line("d", "6000", *a).unwrap())
            .collect();
        lines.push(JournalLine::credit_line("c", "1000", total).unwrap());

        let entry = entry(lines);
        prop_assert!(entry.is_ok(), "balanced entry rejected: {:?}", entry);
        let totals = entry.unwrap().totals();
        prop_assert_eq!(totals.debit, total);
        prop_assert!(totals.is_balanced);
    }

    /// Reversing a balanced entry yields a balanced entry with swapped totals.
    #[test]
    fn prop_reversal_is_balanced(amount in positive_amount(), days in 1u64..365) {
        let original = entry(vec![
            JournalLine::debit_line("d", "1000", amount).unwrap(),
            JournalLine::credit_line("c", "4000", amount).unwrap(),
        ])
        .unwrap();
        let date = base_date() + chrono::Days::new(days);

        let reversal = original.reversal(date, "VOID").unwrap();

        prop_assert!(reversal.totals().is_balanced);
        for (orig, rev) in original.lines().iter().zip(reversal.lines()) {
            prop_assert_eq!(orig.debit(), rev.credit());
            prop_assert_eq!(orig.credit(), rev.debit());
            prop_assert_eq!(orig.account_id(), rev.account_id());
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Specific example: exactly zero amount.
    #[test]
    fn test_zero_amount_example() {
        assert!(matches!(
            JournalLine::debit_line("x", "1000", Decimal::ZERO),
            Err(LedgerError::ZeroAmount)
        ));
    }

    /// Specific example: minimum valid entry (2 lines).
    #[test]
    fn test_minimum_valid_entry() {
        let result = entry(vec![
            JournalLine::debit_line("d", "1000", Decimal::new(100, 2)).unwrap(),
            JournalLine::credit_line("c", "4000", Decimal::new(100, 2)).unwrap(),
        ]);
        assert!(result.is_ok());
    }

    /// Specific example: the unset default date.
    #[test]
    fn test_default_date_rejected() {
        let result = JournalEntry::create(
            "Generated",
            NaiveDate::default(),
            "GEN",
            vec![
                JournalLine::debit_line("d", "1000", Decimal::ONE).unwrap(),
                JournalLine::credit_line("c", "4000", Decimal::ONE).unwrap(),
            ],
        );
        assert!(matches!(result, Err(LedgerError::UnsetDate)));
    }
}
