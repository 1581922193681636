//! Transaction-related types for the bank ledger
//!
//! This module defines the identifiers shared across the ledger, the closed set
//! of transaction kinds, and the immutable `Transaction` record appended to an
//! account's log whenever money moves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Customer identifier
pub type CustomerId = u64;

/// Account identifier
pub type AccountId = u64;

/// Transaction identifier
///
/// Unique across the whole ledger, not per account.
pub type TransactionId = u64;

/// Kinds of entries recorded in an account's transaction log
///
/// Each variant corresponds to one way the balance of a single account can
/// change. A transfer produces two entries: `TransferOut` on the source and
/// `TransferIn` on the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Credit funds to the account (including the initial deposit)
    Deposit,

    /// Debit funds from the account
    ///
    /// Only recorded when the balance covered the amount.
    Withdraw,

    /// Credit received from another account
    TransferIn,

    /// Debit sent to another account
    TransferOut,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
            TransactionKind::TransferIn => "TRANSFER_IN",
            TransactionKind::TransferOut => "TRANSFER_OUT",
        }
    }

    /// Returns true if this kind increases the account balance
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in an account's transaction log
///
/// Transactions are created only as a side effect of deposits, withdrawals and
/// transfers. Once appended they are never modified or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Ledger-wide unique transaction identifier
    pub id: TransactionId,

    /// The account whose log this entry belongs to
    pub account: AccountId,

    /// What kind of balance change this entry records
    pub kind: TransactionKind,

    /// Amount moved, always strictly positive
    pub amount: Decimal,

    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,

    /// Free-form description ("Deposit", "Transfer to 1002", ...)
    pub note: String,
}

impl Transaction {
    /// Create a transaction stamped with the current time
    pub fn new(
        id: TransactionId,
        account: AccountId,
        kind: TransactionKind,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Self {
        Transaction {
            id,
            account,
            kind,
            amount,
            timestamp: Utc::now(),
            note: note.into(),
        }
    }

    /// The signed effect of this entry on the account balance
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction #{} [account {}] {} {:.2} at {} ({})",
            self.id,
            self.account,
            self.kind,
            self.amount,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.note
        )
    }
}
