//! Bank Ledger Library
//! # Overview
//!
//! This library provides an in-memory bank ledger: customers, their accounts
//! and the transaction history of every account, with a single-threaded and a
//! thread-safe implementation behind one trait.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer, Account, Transaction, errors)
//! - [`config`] - Ledger configuration (ID starts, demo seeding)
//! - [`cli`] - CLI arguments parsing and the interactive console
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Single-threaded `LedgerManager`
//!   - [`core::shared`] - Thread-safe `SharedLedger`
//!   - [`core::account_book`] - Account storage and balance checks
//!   - [`core::transaction_log`] - Per-account transaction history
//! - [`io`] - CSV scripts and reports
//!
//! # Operations
//!
//! - **Create customer**: Register a customer under the next customer ID
//! - **Open account**: SAVINGS or CURRENT, with an optional initial deposit
//! - **Deposit / Withdraw**: Change the balance of an active account
//! - **Transfer**: Move money between two distinct active accounts
//! - **Close account**: Deactivate an active account with zero balance
//!
//! Every balance change appends a transaction to the account's history, so
//! the history always replays to the current balance.
//!
//! # Example
//!
//! ```
//! use bank_ledger::{AccountType, Ledger, LedgerManager};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = LedgerManager::new();
//! let alice = ledger.create_customer("Alice", "a@x.com");
//! let account = ledger
//!     .open_account(alice.id, AccountType::Savings, Decimal::new(100, 0))
//!     .unwrap();
//! ledger.deposit(account.id, Decimal::new(50, 0)).unwrap();
//!
//! assert_eq!(ledger.balance(account.id).unwrap(), Decimal::new(150, 0));
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use config::LedgerConfig;
pub use core::{create_ledger, Ledger, LedgerManager, SharedLedger};
pub use io::{process_script, write_accounts_csv, write_transactions_csv};
pub use types::{
    Account, AccountId, AccountType, Command, Customer, CustomerId, ErrorKind, LedgerError,
    Outcome, Transaction, TransactionId, TransactionKind,
};
