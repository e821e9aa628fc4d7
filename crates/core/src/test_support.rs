//! Shared fixtures and proptest strategies for unit and property tests.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::{Account, AccountType, Journal, JournalEntry, JournalLine};

/// First day of the generated posting window.
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Shorthand date constructor.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small chart covering every account type.
pub fn chart() -> Vec<Account> {
    [
        ("1000", "Cash", AccountType::Asset),
        ("1200", "Receivables", AccountType::Asset),
        ("2000", "Payable", AccountType::Liability),
        ("3000", "Capital", AccountType::Equity),
        ("3900", "Retained Earnings", AccountType::Equity),
        ("4000", "Revenue", AccountType::Income),
        ("4100", "Interest Income", AccountType::Income),
        ("6000", "Expense", AccountType::Expense),
        ("6100", "Rent Expense", AccountType::Expense),
    ]
    .into_iter()
    .map(|(code, name, account_type)| {
        Account::with_default_side(code, name, format!("{name} account"), account_type).unwrap()
    })
    .collect()
}

/// The chart's retained earnings account.
pub fn retained_earnings() -> Account {
    chart().into_iter().find(|a| a.code() == "3900").unwrap()
}

/// Builds a two-line entry debiting `debit` and crediting `credit`.
pub fn posting(date: NaiveDate, debit: &str, credit: &str, amount: Decimal) -> JournalEntry {
    JournalEntry::create(
        format!("{debit} / {credit}"),
        date,
        format!("REF-{date}"),
        vec![
            JournalLine::debit_line("debit", debit, amount).unwrap(),
            JournalLine::credit_line("credit", credit, amount).unwrap(),
        ],
    )
    .unwrap()
}

/// Wraps entries into a journal.
pub fn journal(entries: Vec<JournalEntry>) -> Journal {
    entries.into_iter().fold(
        Journal::create("General", "General journal").unwrap(),
        |journal, entry| journal.with_entry(entry).unwrap(),
    )
}

/// Strategy for a positive amount from 0.01 to 10,000.00.
pub fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a single balanced posting between two distinct chart accounts,
/// dated within two years of [`base_date`].
pub fn posting_strategy() -> impl Strategy<Value = JournalEntry> {
    let codes: Vec<String> = chart().iter().map(|a| a.code().to_string()).collect();
    let count = codes.len();
    (0..count, 1..count, positive_amount(), 0u64..730).prop_map(
        move |(debit, shift, amount, offset)| {
            let credit = (debit + shift) % count;
            let date = base_date().checked_add_days(Days::new(offset)).unwrap();
            posting(date, &codes[debit], &codes[credit], amount)
        },
    )
}

/// Strategy for a journal of 1..=`max` balanced postings.
pub fn journal_strategy(max: usize) -> impl Strategy<Value = Journal> {
    prop::collection::vec(posting_strategy(), 1..=max).prop_map(journal)
}
