//! Account descriptors and the chart of accounts.

use std::collections::HashMap;

use ledgerline_shared::ClosingConfig;
use serde::Serialize;

use super::error::LedgerError;
use super::types::{AccountType, EntryType};
use super::validation::require_text;

/// A validated account descriptor.
///
/// Accounts are referenced by `code` from journal lines and derived
/// snapshots; the parent relationship is a hierarchy, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    code: String,
    name: String,
    description: String,
    account_type: AccountType,
    parent_code: Option<String>,
    normally: EntryType,
}

impl Account {
    /// Creates a validated account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BlankField` if `code`, `name`, `description` or a
    /// provided `parent_code` is blank.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        account_type: AccountType,
        parent_code: Option<String>,
        normally: EntryType,
    ) -> Result<Self, LedgerError> {
        let account = Self {
            code: code.into(),
            name: name.into(),
            description: description.into(),
            account_type,
            parent_code,
            normally,
        };

        require_text("code", &account.code)?;
        require_text("name", &account.name)?;
        require_text("description", &account.description)?;
        if let Some(parent) = &account.parent_code {
            require_text("parent_code", parent)?;
        }

        Ok(account)
    }

    /// Creates a root account carrying the type's conventional normal side.
    ///
    /// # Errors
    ///
    /// See [`Account::new`].
    pub fn with_default_side(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self, LedgerError> {
        Self::new(
            code,
            name,
            description,
            account_type,
            None,
            account_type.default_normal_side(),
        )
    }

    /// Returns a copy placed under `parent_code`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BlankField` if `parent_code` is blank.
    pub fn with_parent(&self, parent_code: impl Into<String>) -> Result<Self, LedgerError> {
        let parent_code = parent_code.into();
        require_text("parent_code", &parent_code)?;
        Ok(Self {
            parent_code: Some(parent_code),
            ..self.clone()
        })
    }

    /// Unique account code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Account classification.
    #[must_use]
    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Code of the parent account, if any.
    #[must_use]
    pub fn parent_code(&self) -> Option<&str> {
        self.parent_code.as_deref()
    }

    /// Side on which the account normally carries a positive balance.
    #[must_use]
    pub fn normally(&self) -> EntryType {
        self.normally
    }
}

impl TryFrom<&ClosingConfig> for Account {
    type Error = LedgerError;

    /// Builds the configured closing equity account.
    fn try_from(config: &ClosingConfig) -> Result<Self, Self::Error> {
        Self::with_default_side(
            config.equity_account_code.as_str(),
            config.equity_account_name.as_str(),
            config.equity_account_description.as_str(),
            AccountType::Equity,
        )
    }
}

/// A validated set of accounts with unique codes and a well-formed hierarchy.
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
}

impl ChartOfAccounts {
    /// Validates and indexes `accounts`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, a code repeats, a parent code
    /// does not resolve, or the parent links form a cycle.
    pub fn new(accounts: Vec<Account>) -> Result<Self, LedgerError> {
        if accounts.is_empty() {
            return Err(LedgerError::NoAccounts);
        }

        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            if index.insert(account.code.clone(), position).is_some() {
                return Err(LedgerError::DuplicateAccountCode(account.code.clone()));
            }
        }

        let chart = Self { accounts, index };
        for account in &chart.accounts {
            if let Some(parent) = account.parent_code()
                && !chart.index.contains_key(parent)
            {
                return Err(LedgerError::UnknownParentAccount {
                    code: account.code.clone(),
                    parent_code: parent.to_string(),
                });
            }
            chart.check_acyclic(account)?;
        }

        Ok(chart)
    }

    /// Walks up from `account`; more steps than accounts means a cycle.
    fn check_acyclic(&self, account: &Account) -> Result<(), LedgerError> {
        let mut current = account.parent_code();
        let mut steps = 0;
        while let Some(code) = current {
            steps += 1;
            if code == account.code || steps > self.accounts.len() {
                return Err(LedgerError::ParentCycle(account.code.clone()));
            }
            current = self.get(code).and_then(Account::parent_code);
        }
        Ok(())
    }

    /// Looks up an account by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Account> {
        self.index.get(code).map(|&i| &self.accounts[i])
    }

    /// Direct children of `code`, in chart order.
    pub fn children<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Account> + 'a {
        self.accounts
            .iter()
            .filter(move |a| a.parent_code() == Some(code))
    }

    /// All accounts, in chart order.
    #[must_use]
    pub fn as_slice(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Always false for a validated chart; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
