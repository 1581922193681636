//! Account-related types for the bank ledger
//!
//! This module defines the Account structure, the closed set of account types,
//! and the balance invariants every ledger implementation must uphold.

use super::transaction::{AccountId, CustomerId};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Kinds of accounts a customer can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Savings,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    /// Parse an account type case-insensitively ("savings", "CURRENT", ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SAVINGS" => Ok(AccountType::Savings),
            "CURRENT" => Ok(AccountType::Current),
            _ => Err(format!("Invalid account type: '{}'", s)),
        }
    }
}

/// Customer account state
///
/// Represents one account held by a customer. The balance is never negative,
/// and the account can only be deactivated while its balance is exactly zero.
/// Deactivation is permanent.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account ID
    pub id: AccountId,

    /// ID of the owning customer
    pub owner: CustomerId,

    /// Savings or current account
    pub account_type: AccountType,

    /// Current balance
    ///
    /// Changes only through deposits, withdrawals and transfers, each of which
    /// appends a matching entry to the account's transaction log.
    pub balance: Decimal,

    /// Whether the account accepts deposits, withdrawals and transfers
    ///
    /// Once an account is closed it stays inactive.
    pub active: bool,
}

impl Account {
    /// Create a new active account with zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The account ID
    /// * `owner` - The owning customer's ID
    /// * `account_type` - Savings or current
    pub fn new(id: AccountId, owner: CustomerId, account_type: AccountType) -> Self {
        Account {
            id,
            owner,
            account_type,
            balance: Decimal::ZERO,
            active: true,
        }
    }

    /// Returns true if the account can be closed right now
    pub fn is_closable(&self) -> bool {
        self.active && self.balance.is_zero()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account #{} ({}) owner={} balance={:.2} {}",
            self.id,
            self.account_type,
            self.owner,
            self.balance,
            if self.active { "active" } else { "closed" }
        )
    }
}
