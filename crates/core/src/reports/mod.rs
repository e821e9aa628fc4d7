//! Financial reports derived from a ledger.
//!
//! - Trial balance: per-account totals as of a date
//! - Closing: rolls income and expense into an equity account
//! - Balance sheet: asset, liability and equity balances of a closed trial balance
//! - Profit and loss: income and expense activity within a date window

pub mod balance_sheet;
pub mod closing;
pub mod error;
pub mod profit_and_loss;
pub mod trial_balance;


pub use balance_sheet::{BalanceEntry, BalanceSheet};
pub use error::ReportError;
pub use profit_and_loss::{AccountSummary, ProfitAndLossEntry, ProfitAndLossStatement};
pub use trial_balance::{TrialBalance, TrialBalanceEntry};
