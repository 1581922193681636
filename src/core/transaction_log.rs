//! Per-account transaction history
//!
//! This module provides the TransactionLog component that keeps, for every
//! account, the ordered list of transactions that changed its balance.
//!
//! # Ordering
//!
//! Entries are appended in the order the ledger applies them, so insertion
//! order is chronological order. Nothing is ever removed or rewritten.

use crate::types::{AccountId, Transaction};
use std::collections::HashMap;

/// Append-only transaction history keyed by account
pub struct TransactionLog {
    /// Map of account ID to that account's transactions, oldest first
    entries: HashMap<AccountId, Vec<Transaction>>,
}

impl TransactionLog {
    /// Create a new empty log
    pub fn new() -> Self {
        TransactionLog {
            entries: HashMap::new(),
        }
    }

    /// Start an empty history for a newly opened account
    ///
    /// Calling this for an account that already has history keeps the
    /// existing entries.
    pub fn open(&mut self, account: AccountId) {
        self.entries.entry(account).or_default();
    }

    /// Append a transaction to its account's history
    pub fn append(&mut self, tx: Transaction) {
        self.entries.entry(tx.account).or_default().push(tx);
    }

    /// All transactions of an account, oldest first
    ///
    /// Returns an empty slice for accounts without history, including
    /// accounts that do not exist.
    pub fn for_account(&self, account: AccountId) -> &[Transaction] {
        self.entries
            .get(&account)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}
