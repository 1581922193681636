//! Ledger commands and their outcomes
//!
//! A `Command` is one mutating ledger operation with its arguments already
//! parsed. Both front ends (interactive console and CSV scripts) build commands
//! and hand them to `Ledger::execute`, which reports back an `Outcome`.

use super::account::{Account, AccountType};
use super::customer::Customer;
use super::transaction::{AccountId, CustomerId};
use rust_decimal::Decimal;

/// A mutating ledger operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateCustomer {
        name: String,
        email: String,
    },
    OpenAccount {
        customer: CustomerId,
        account_type: AccountType,
        initial_deposit: Decimal,
    },
    Deposit {
        account: AccountId,
        amount: Decimal,
    },
    Withdraw {
        account: AccountId,
        amount: Decimal,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    CloseAccount {
        account: AccountId,
    },
}

impl Command {
    /// Short operation name, as used in script files
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateCustomer { .. } => "create_customer",
            Command::OpenAccount { .. } => "open_account",
            Command::Deposit { .. } => "deposit",
            Command::Withdraw { .. } => "withdraw",
            Command::Transfer { .. } => "transfer",
            Command::CloseAccount { .. } => "close_account",
        }
    }
}

/// What a successfully executed command did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    CustomerCreated(Customer),
    AccountOpened(Account),
    /// Balance of the account after a deposit
    Deposited { account: AccountId, balance: Decimal },
    /// Balance of the account after a withdrawal
    Withdrawn { account: AccountId, balance: Decimal },
    /// Balances of both accounts after a transfer
    Transferred {
        from: AccountId,
        from_balance: Decimal,
        to: AccountId,
        to_balance: Decimal,
    },
    /// Whether the account was actually closed
    Closed { account: AccountId, closed: bool },
}
