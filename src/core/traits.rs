//! Core ledger trait
//!
//! This module defines the operation set every ledger implementation offers,
//! so the single-threaded `LedgerManager` and the thread-safe `SharedLedger`
//! can be used interchangeably by the front ends (as `&mut dyn Ledger`).

use crate::types::{
    Account, AccountId, AccountType, Command, Customer, CustomerId, LedgerError, Outcome,
    Transaction,
};
use rust_decimal::Decimal;

/// Operations on a ledger of customers, accounts and transactions
///
/// Every failing operation fails before changing any state.
pub trait Ledger {
    /// Register a new customer under the next customer ID
    fn create_customer(&mut self, name: &str, email: &str) -> Customer;

    /// Open an active account for an existing customer
    ///
    /// A positive `initial_deposit` is credited right away and recorded as a
    /// DEPOSIT with the note "Initial deposit". Zero or a negative value opens
    /// an empty account with no transaction.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if the customer does not exist.
    fn open_account(
        &mut self,
        customer: CustomerId,
        account_type: AccountType,
        initial_deposit: Decimal,
    ) -> Result<Account, LedgerError>;

    /// Credit an active account and record a DEPOSIT
    fn deposit(&mut self, account: AccountId, amount: Decimal) -> Result<(), LedgerError>;

    /// Debit an active account and record a WITHDRAW
    fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<(), LedgerError>;

    /// Move money between two distinct active accounts
    ///
    /// Records TRANSFER_OUT on the source, then TRANSFER_IN on the destination.
    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError>;

    /// Current balance of an account (closed accounts included)
    fn balance(&self, account: AccountId) -> Result<Decimal, LedgerError>;

    /// Snapshot of an account (closed accounts included)
    fn account_details(&self, account: AccountId) -> Result<Account, LedgerError>;

    /// Transaction history of an account, oldest first
    ///
    /// Empty for unknown accounts.
    fn transactions(&self, account: AccountId) -> Vec<Transaction>;

    /// Close an active account with zero balance
    ///
    /// Returns false, without error, if the account is missing, already
    /// closed, or not empty.
    fn close_account(&mut self, account: AccountId) -> bool;

    /// All customers in ascending ID order
    fn list_customers(&self) -> Vec<Customer>;

    /// All accounts (active and closed) in ascending ID order
    fn list_accounts(&self) -> Vec<Account>;

    /// Run a command and report its outcome
    ///
    /// Routes the command to the matching operation. Deposits, withdrawals and
    /// transfers report the resulting balances.
    fn execute(&mut self, command: Command) -> Result<Outcome, LedgerError> {
        match command {
            Command::CreateCustomer { name, email } => {
                Ok(Outcome::CustomerCreated(self.create_customer(&name, &email)))
            }
            Command::OpenAccount {
                customer,
                account_type,
                initial_deposit,
            } => self
                .open_account(customer, account_type, initial_deposit)
                .map(Outcome::AccountOpened),
            Command::Deposit { account, amount } => {
                self.deposit(account, amount)?;
                Ok(Outcome::Deposited {
                    account,
                    balance: self.balance(account)?,
                })
            }
            Command::Withdraw { account, amount } => {
                self.withdraw(account, amount)?;
                Ok(Outcome::Withdrawn {
                    account,
                    balance: self.balance(account)?,
                })
            }
            Command::Transfer { from, to, amount } => {
                self.transfer(from, to, amount)?;
                Ok(Outcome::Transferred {
                    from,
                    from_balance: self.balance(from)?,
                    to,
                    to_balance: self.balance(to)?,
                })
            }
            Command::CloseAccount { account } => Ok(Outcome::Closed {
                account,
                closed: self.close_account(account),
            }),
        }
    }
}
