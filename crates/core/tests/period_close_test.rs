//! End-to-end tests: journal to ledger to trial balance to statements.

use chrono::NaiveDate;
use ledgerline_core::{
    Account, AccountType, BalanceSheet, EntryType, Journal, JournalEntry, JournalLine, Ledger,
    ProfitAndLossStatement, TrialBalance,
};
use ledgerline_shared::telemetry::init_tracing;
use ledgerline_shared::{AppError, AppConfig, ClosingConfig, LoggingConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup_tracing() {
    // Only the first test to get here installs the subscriber.
    let _ = init_tracing(&LoggingConfig::default());
}

fn accounts() -> Vec<Account> {
    [
        ("1000", "Cash", AccountType::Asset, EntryType::Debit),
        ("4000", "Revenue", AccountType::Income, EntryType::Credit),
        ("6000", "Expense", AccountType::Expense, EntryType::Debit),
        ("3000", "Capital", AccountType::Equity, EntryType::Credit),
        ("2000", "Payable", AccountType::Liability, EntryType::Credit),
    ]
    .into_iter()
    .map(|(code, name, account_type, normally)| {
        Account::new(code, name, format!("{name} account"), account_type, None, normally).unwrap()
    })
    .collect()
}

fn entry(on: NaiveDate, description: &str, debit: &str, credit: &str, amount: Decimal) -> JournalEntry {
    JournalEntry::create(
        description,
        on,
        format!("JE-{description}"),
        vec![
            JournalLine::debit_line(description, debit, amount).unwrap(),
            JournalLine::credit_line(description, credit, amount).unwrap(),
        ],
    )
    .unwrap()
}

fn journal(entries: Vec<JournalEntry>) -> Journal {
    entries
        .into_iter()
        .try_fold(Journal::create("General", "General journal").unwrap(), |j, e| {
            j.with_entry(e)
        })
        .unwrap()
}

fn retained_earnings() -> Account {
    Account::try_from(&ClosingConfig::default()).unwrap()
}

// ============================================================================
// Test: Full period close
// ============================================================================

#[test]
fn test_full_period_close() {
    setup_tracing();
    let on = date(2024, 3, 15);
    let journal = journal(vec![
        entry(on, "Cash sale", "1000", "4000", dec!(1000)),
        entry(on, "Cash expense", "6000", "1000", dec!(200)),
        entry(on, "Owner contribution", "1000", "3000", dec!(5000)),
        entry(on, "Expense on account", "6000", "2000", dec!(300)),
    ]);
    assert!(journal.totals().is_balanced);

    let ledger = Ledger::from_journal("General ledger", "FY2024", &journal, &accounts()).unwrap();
    let cash = ledger.account("1000").unwrap();
    assert_eq!(cash.debit(), dec!(6000));
    assert_eq!(cash.credit(), dec!(200));

    let tb = TrialBalance::from_ledger("Trial balance", "FY2024", date(2024, 12, 31), &ledger)
        .unwrap();
    assert_eq!(tb.total_debit(), dec!(6500));
    assert_eq!(tb.total_credit(), dec!(6500));
    assert!(tb.is_balanced());

    let closed = tb.close_accounts(&retained_earnings()).unwrap();
    assert!(closed.is_closed());
    assert!(closed.is_balanced());
    assert_eq!(closed.entry("3900").unwrap().credit(), dec!(500));

    let sheet =
        BalanceSheet::from_trial_balance("Balance sheet", "FY2024", date(2024, 12, 31), &closed)
            .unwrap();
    assert_eq!(sheet.total_assets(), dec!(5800));
    assert_eq!(sheet.total_liabilities(), dec!(300));
    assert_eq!(sheet.total_equity(), dec!(5500));
    assert_eq!(
        sheet.total_assets(),
        sheet.total_liabilities() + sheet.total_equity()
    );
    assert_eq!(sheet.entry("3000").unwrap().balance(), dec!(5000));
    assert_eq!(sheet.entry("3900").unwrap().balance(), dec!(500));
}

// ============================================================================
// Test: Date boundaries across years
// ============================================================================

#[test]
fn test_revenue_across_year_boundaries() {
    setup_tracing();
    let journal = journal(vec![
        entry(date(2023, 12, 31), "Late 2023 sale", "1000", "4000", dec!(1000)),
        entry(date(2024, 1, 1), "New year sale", "1000", "4000", dec!(100)),
        entry(date(2024, 6, 1), "Mid year sale", "1000", "4000", dec!(200)),
        entry(date(2025, 5, 17), "2025 sale", "1000", "4000", dec!(5000)),
    ]);
    let ledger = Ledger::from_journal("General ledger", "Multi-year", &journal, &accounts()).unwrap();

    // No lower bound: the trial balance carries everything up to the cutoff.
    let tb = TrialBalance::from_ledger("Trial balance", "FY2024", date(2024, 12, 31), &ledger)
        .unwrap();
    assert_eq!(tb.entry("4000").unwrap().credit(), dec!(1300));

    let pl = ProfitAndLossStatement::from_ledger(
        "Profit and loss",
        "Calendar 2024",
        date(2024, 1, 1),
        date(2024, 12, 31),
        &ledger,
    )
    .unwrap();
    assert_eq!(pl.entries().len(), 2);
    assert_eq!(pl.total_revenue(), dec!(300));
    assert!(
        pl.entries()
            .iter()
            .all(|e| e.date().format("%Y").to_string() == "2024")
    );
}

// ============================================================================
// Test: Reversal nets out
// ============================================================================

#[test]
fn test_reversal_nets_account_to_zero() {
    setup_tracing();
    let original = entry(date(2024, 4, 1), "Mistaken sale", "1000", "4000", dec!(250));
    let reversal = original.reversal(date(2024, 4, 2), "JE-REV").unwrap();
    let journal = journal(vec![original, reversal]);

    let ledger = Ledger::from_journal("General ledger", "Reversals", &journal, &accounts()).unwrap();
    let tb = TrialBalance::from_ledger("Trial balance", "April", date(2024, 4, 30), &ledger)
        .unwrap();

    let revenue = tb.entry("4000").unwrap();
    assert_eq!(revenue.natural_balance(), Decimal::ZERO);
    assert!(tb.net_income().is_zero());

    let closed = tb.close_accounts(&retained_earnings()).unwrap();
    assert!(closed.entry("3900").is_none());
}

// ============================================================================
// Test: Errors surface as application errors
// ============================================================================

#[test]
fn test_errors_convert_to_app_error() {
    setup_tracing();
    let journal = journal(vec![entry(date(2024, 1, 5), "Sale", "1000", "4000", dec!(10))]);
    let ledger = Ledger::from_journal("General ledger", "Errors", &journal, &accounts()).unwrap();
    let open = TrialBalance::from_ledger("Trial balance", "January", date(2024, 1, 31), &ledger)
        .unwrap();

    let err: AppError = BalanceSheet::from_trial_balance("BS", "January", date(2024, 1, 31), &open)
        .unwrap_err()
        .into();
    assert!(matches!(err, AppError::BusinessRule(_)));
    assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");

    let err: AppError = Ledger::from_journal("General ledger", "No accounts", &journal, &[])
        .unwrap_err()
        .into();
    assert!(matches!(err, AppError::Validation(_)));
}

// ============================================================================
// Test: Configuration drives closing and aggregation
// ============================================================================

#[test]
fn test_configured_closing_account_and_threshold() {
    setup_tracing();
    let mut config = AppConfig::default();
    config.closing.equity_account_code = "3950".to_string();
    config.closing.equity_account_name = "Accumulated Profit".to_string();
    config.aggregation.parallel_threshold = 1;

    let journal = journal(vec![entry(date(2024, 2, 1), "Sale", "1000", "4000", dec!(75))]);
    let ledger = Ledger::from_journal_with(
        "General ledger",
        "Configured",
        &journal,
        &accounts(),
        &config.aggregation,
    )
    .unwrap();
    let tb = TrialBalance::from_ledger_with(
        "Trial balance",
        "Configured",
        date(2024, 12, 31),
        &ledger,
        &config.aggregation,
    )
    .unwrap();

    let closing = Account::try_from(&config.closing).unwrap();
    let closed = tb.close_accounts(&closing).unwrap();
    let target = closed.entry("3950").unwrap();
    assert_eq!(target.account_name(), "Accumulated Profit");
    assert_eq!(target.credit(), dec!(75));
}
