//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `customer`: Customer records
//! - `account`: Account state and account types
//! - `transaction`: Transaction log entries and identifiers
//! - `command`: Mutating commands accepted by the ledger and their outcomes
//! - `error`: Error types for the ledger

pub mod account;
pub mod command;
pub mod customer;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountType};
pub use command::{Command, Outcome};
pub use customer::Customer;
pub use error::{ErrorKind, LedgerError};
pub use transaction::{AccountId, CustomerId, Transaction, TransactionId, TransactionKind};
