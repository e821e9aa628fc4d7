//! Period-end closing of income and expense accounts into equity.

use rust_decimal::Decimal;
use tracing::info;

use super::error::ReportError;
use super::trial_balance::{TrialBalance, TrialBalanceEntry};
use crate::ledger::{Account, AccountType};

/// Trial balance entries grouped by role in the closing transform.
#[derive(Default)]
struct Partition {
    other: Vec<TrialBalanceEntry>,
    equity: Vec<TrialBalanceEntry>,
    income: Vec<TrialBalanceEntry>,
    expense: Vec<TrialBalanceEntry>,
}

impl Partition {
    fn of(entries: &[TrialBalanceEntry]) -> Self {
        entries.iter().cloned().fold(Self::default(), |mut p, entry| {
            match entry.account_type() {
                AccountType::Asset | AccountType::Liability => p.other.push(entry),
                AccountType::Equity => p.equity.push(entry),
                AccountType::Income => p.income.push(entry),
                AccountType::Expense => p.expense.push(entry),
            }
            p
        })
    }

    fn total_income(&self) -> Decimal {
        self.income.iter().map(|e| e.credit() - e.debit()).sum()
    }

    fn total_expense(&self) -> Decimal {
        self.expense.iter().map(|e| e.debit() - e.credit()).sum()
    }
}

impl TrialBalance {
    /// Closes income and expense into `closing_equity_account`.
    ///
    /// Income entries get `debit := credit`, expense entries get
    /// `credit := debit`, and net income is posted to the closing account:
    /// a profit on its credit side, a loss on its debit side. An existing
    /// asset, liability or equity row with the closing code is updated in
    /// place; otherwise a zero-balance equity entry is added for it. Zero net
    /// income posts nothing.
    ///
    /// The result keeps this trial balance's identity and is marked closed.
    /// Entries are ordered asset/liability, equity, income, then expense.
    ///
    /// # Errors
    ///
    /// - `ReportError::AlreadyClosed` if this trial balance is closed
    /// - `ReportError::InvalidClosingAccount` if the account is not equity
    pub fn close_accounts(
        &self,
        closing_equity_account: &Account,
    ) -> Result<TrialBalance, ReportError> {
        if self.is_closed() {
            return Err(ReportError::AlreadyClosed(self.id()));
        }
        if closing_equity_account.account_type() != AccountType::Equity {
            return Err(ReportError::InvalidClosingAccount {
                code: closing_equity_account.code().to_string(),
                account_type: closing_equity_account.account_type(),
            });
        }

        let mut partition = Partition::of(self.entries());
        let total_income = partition.total_income();
        let total_expense = partition.total_expense();
        let net_income = total_income - total_expense;

        partition
            .income
            .iter_mut()
            .for_each(TrialBalanceEntry::offset_with_debit);
        partition
            .expense
            .iter_mut()
            .for_each(TrialBalanceEntry::offset_with_credit);

        if !net_income.is_zero() {
            let code = closing_equity_account.code();
            let exists = partition
                .other
                .iter()
                .chain(&partition.equity)
                .any(|e| e.account_id() == code);
            if !exists {
                partition
                    .equity
                    .push(TrialBalanceEntry::stub(closing_equity_account));
            }
            let target = partition
                .other
                .iter_mut()
                .chain(partition.equity.iter_mut())
                .find(|e| e.account_id() == code)
                .ok_or_else(|| ReportError::ClosingAccountNotFound(code.to_string()))?;

            if net_income > Decimal::ZERO {
                target.add_credit(net_income);
            } else {
                target.add_debit(net_income.abs());
            }
        }

        let Partition {
            other,
            equity,
            income,
            expense,
        } = partition;
        let entries = other
            .into_iter()
            .chain(equity)
            .chain(income)
            .chain(expense)
            .collect();

        let closed = self.closed_with(entries);

        info!(
            trial_balance_id = %closed.id(),
            closing_account = %closing_equity_account.code(),
            total_income = %total_income,
            total_expense = %total_expense,
            net_income = %net_income,
            "Closed income and expense accounts"
        );

        Ok(closed)
    }
}
