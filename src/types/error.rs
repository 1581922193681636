//! Error types for the bank ledger
//!
//! This module defines all error types that can occur while operating on the
//! ledger or feeding it from one of the front ends. Errors are designed to be
//! descriptive and user-friendly, since the console prints them verbatim.
//!
//! # Error Categories
//!
//! - **Not found**: Unknown customer or account, or an inactive account where an
//!   active one is required
//! - **Invalid amount**: Non-positive amounts
//! - **Insufficient funds**: Withdrawals or transfers larger than the balance
//! - **Invalid argument**: Self-transfers and malformed input
//! - **Arithmetic / input / I/O**: Overflow, unparsable script rows, file errors

use super::transaction::{AccountId, CustomerId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Coarse error categories
///
/// Every `LedgerError` variant belongs to exactly one category. Callers that
/// only care about the category (tests, front ends) match on this instead of
/// the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidAmount,
    InsufficientFunds,
    InvalidArgument,
    Overflow,
    Input,
    Io,
}

/// Main error type for the bank ledger
///
/// Every failing operation returns one of these before touching any ledger
/// state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No customer with the given ID
    #[error("Customer {customer} not found")]
    CustomerNotFound {
        /// The unknown customer ID
        customer: CustomerId,
    },

    /// No account with the given ID
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unknown account ID
        account: AccountId,
    },

    /// The account exists but has been closed
    ///
    /// Reported in the not-found category: a closed account is not eligible for
    /// any further balance change.
    #[error("Account {account} not found or inactive")]
    AccountInactive {
        /// ID of the closed account
        account: AccountId,
    },

    /// Amount is zero or negative
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal or transfer exceeds the account balance
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account ID
        account: AccountId,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Source and destination of a transfer are the same account
    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer {
        /// The account named on both sides
        account: AccountId,
    },

    /// Malformed or out-of-range argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account ID
        account: AccountId,
    },

    /// A script row could not be parsed into a command
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// I/O error occurred while reading input or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// The category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::CustomerNotFound { .. }
            | LedgerError::AccountNotFound { .. }
            | LedgerError::AccountInactive { .. } => ErrorKind::NotFound,
            LedgerError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::SelfTransfer { .. } | LedgerError::InvalidArgument { .. } => {
                ErrorKind::InvalidArgument
            }
            LedgerError::ArithmeticOverflow { .. } => ErrorKind::Overflow,
            LedgerError::ParseError { .. } => ErrorKind::Input,
            LedgerError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Create a CustomerNotFound error
    pub fn customer_not_found(customer: CustomerId) -> Self {
        LedgerError::CustomerNotFound { customer }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an AccountInactive error
    pub fn account_inactive(account: AccountId) -> Self {
        LedgerError::AccountInactive { account }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account: AccountId) -> Self {
        LedgerError::SelfTransfer { account }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a ParseError
    pub fn parse_error(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line,
            message: message.into(),
        }
    }
}
