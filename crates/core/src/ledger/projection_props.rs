//! Property-based tests for the journal-to-ledger projection.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::projection::Ledger;
use super::types::EntryTotals;
use crate::test_support::{chart, journal_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Projection neither loses nor duplicates amounts: ledger totals equal
    /// the journal's line totals when every account is projected.
    #[test]
    fn prop_projection_conserves_totals(journal in journal_strategy(20)) {
        let ledger = Ledger::from_journal("GL", "General ledger", &journal, &chart()).unwrap();

        let line_count: usize = journal.entries().iter().map(|e| e.lines().len()).sum();
        prop_assert_eq!(ledger.entry_count(), line_count);
        prop_assert_eq!(ledger.totals(), journal.totals());
        prop_assert!(ledger.totals().is_balanced);
    }

    /// Each ledger account holds exactly the lines posted to its code.
    #[test]
    fn prop_account_totals_match_lines(journal in journal_strategy(20)) {
        let ledger = Ledger::from_journal("GL", "General ledger", &journal, &chart()).unwrap();

        for account in ledger.accounts() {
            let expected = EntryTotals::from_pairs(
                journal
                    .entries()
                    .iter()
                    .flat_map(|e| e.lines())
                    .filter(|l| l.account_id() == account.code())
                    .map(|l| (l.debit(), l.credit())),
            );
            prop_assert!(!account.entries().is_empty());
            prop_assert_eq!(account.debit(), expected.debit);
            prop_assert_eq!(account.credit(), expected.credit);
        }
    }

    /// Projecting onto a subset of accounts only picks up matching lines.
    #[test]
    fn prop_subset_projection(journal in journal_strategy(20), keep in 1usize..9) {
        let accounts: Vec<_> = chart().into_iter().take(keep).collect();
        let ledger = Ledger::from_journal("GL", "Partial", &journal, &accounts).unwrap();

        let expected_debit: Decimal = journal
            .entries()
            .iter()
            .flat_map(|e| e.lines())
            .filter(|l| accounts.iter().any(|a| a.code() == l.account_id()))
            .map(|l| l.debit())
            .sum();
        prop_assert_eq!(ledger.totals().debit, expected_debit);
        prop_assert!(ledger.accounts().len() <= keep);
    }
}
