//! Account management module
//!
//! This module provides the `AccountBook` struct which maintains the state of
//! all accounts and provides the balance operations the ledger builds on.
//!
//! The AccountBook is responsible for:
//! - Storing accounts by ID (accounts are never removed)
//! - Resolving an ID to an active account, or the matching not-found error
//! - Credit and debit with checked arithmetic and funds checks
//! - Providing sorted account listings for output
//!
//! The balance helpers `checked_credit` / `checked_debit` operate on a bare
//! `Account` so the thread-safe ledger can apply exactly the same rules while
//! holding its own per-account lock.

use crate::types::{Account, AccountId, LedgerError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Reject zero and negative amounts
pub(crate) fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}

/// Reject inactive accounts
pub(crate) fn ensure_active(account: &Account) -> Result<(), LedgerError> {
    if !account.active {
        return Err(LedgerError::account_inactive(account.id));
    }
    Ok(())
}

/// Compute the balance after crediting `amount`, without applying it
pub(crate) fn checked_credit(account: &Account, amount: Decimal) -> Result<Decimal, LedgerError> {
    account
        .balance
        .checked_add(amount)
        .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", account.id))
}

/// Compute the balance after debiting `amount`, without applying it
///
/// Fails with `InsufficientFunds` if the balance does not cover the amount,
/// so a successful result is never negative.
pub(crate) fn checked_debit(account: &Account, amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount > account.balance {
        return Err(LedgerError::insufficient_funds(
            account.id,
            account.balance,
            amount,
        ));
    }

    account
        .balance
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", account.id))
}

/// Manages all accounts and their states
///
/// The AccountBook maintains an in-memory map of account IDs to account
/// states. It does not know about transactions; keeping the log in step with
/// the balances is the job of `LedgerManager`.
pub struct AccountBook {
    /// Map of account IDs to account states
    accounts: HashMap<AccountId, Account>,
}

impl AccountBook {
    /// Create a new AccountBook with no accounts
    pub fn new() -> Self {
        AccountBook {
            accounts: HashMap::new(),
        }
    }

    /// Store a newly opened account
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    /// Look up an account regardless of its active flag
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// Look up an account, failing if it is missing
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has this ID.
    pub fn require(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Look up an account that must exist and be active
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has this ID, or
    /// `AccountInactive` if the account has been closed.
    pub fn require_active(&self, id: AccountId) -> Result<&Account, LedgerError> {
        let account = self.require(id)?;
        ensure_active(account)?;
        Ok(account)
    }

    /// Get all accounts sorted by account ID
    ///
    /// Returns references to all accounts (active and closed) in ascending ID
    /// order, which is also the order in which they were opened.
    pub fn get_all_accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    /// Deposit funds into an active account
    ///
    /// Uses checked arithmetic to prevent overflow and maintain account
    /// integrity. The amount must already have been validated as positive.
    ///
    /// # Arguments
    ///
    /// * `id` - The account to credit
    /// * `amount` - The amount to add
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(LedgerError)` - If the account is missing, inactive, or the sum overflows
    pub fn credit(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.active_mut(id)?;
        let new_balance = checked_credit(account, amount)?;
        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Withdraw funds from an active account
    ///
    /// Validates that the balance covers the amount before changing anything,
    /// so a failed debit leaves the account untouched.
    ///
    /// # Arguments
    ///
    /// * `id` - The account to debit
    /// * `amount` - The amount to remove
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The new balance
    /// * `Err(LedgerError)` - If the account is missing, inactive, or underfunded
    pub fn debit(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.active_mut(id)?;
        let new_balance = checked_debit(account, amount)?;
        account.balance = new_balance;
        Ok(new_balance)
    }

    /// Deactivate an account if it is active and empty
    ///
    /// # Returns
    ///
    /// `true` if the account was closed by this call, `false` if it is missing,
    /// already closed, or still holds money.
    pub fn deactivate(&mut self, id: AccountId) -> bool {
        match self.accounts.get_mut(&id) {
            Some(account) if account.is_closable() => {
                account.active = false;
                true
            }
            _ => false,
        }
    }

    fn active_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        let account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        ensure_active(account)?;
        Ok(account)
    }
}

impl Default for AccountBook {
    fn default() -> Self {
        Self::new()
    }
}
