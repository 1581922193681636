//! Ledger manager
//!
//! This module provides the LedgerManager that owns customers, accounts and
//! transaction histories, coordinating between the AccountBook and the
//! TransactionLog so that every balance change has exactly one matching log
//! entry.
//!
//! The manager enforces business rules such as:
//! - Existence and active checks before touching an account
//! - Positive amounts for every money movement
//! - Sufficient funds, so balances never go negative
//! - Closing only empty accounts, and only once

use crate::config::LedgerConfig;
use crate::core::account_book::{checked_credit, checked_debit, ensure_positive, AccountBook};
use crate::core::ids::IdSequence;
use crate::core::traits::Ledger;
use crate::core::transaction_log::TransactionLog;
use crate::types::{
    Account, AccountId, AccountType, Customer, CustomerId, LedgerError, Transaction,
    TransactionKind,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Single-threaded in-memory ledger
///
/// An explicitly constructed, owned context: independent instances share no
/// state, so tests can run many ledgers side by side.
pub struct LedgerManager {
    customers: HashMap<CustomerId, Customer>,
    accounts: AccountBook,
    log: TransactionLog,
    customer_ids: IdSequence,
    account_ids: IdSequence,
    transaction_ids: IdSequence,
}

impl LedgerManager {
    /// Create an empty ledger with the default ID starts
    pub fn new() -> Self {
        Self::with_config(&LedgerConfig::default())
    }

    /// Create an empty ledger with the ID starts from `config`
    ///
    /// Demo seeding is not performed here; see `core::seed_demo_data`.
    pub fn with_config(config: &LedgerConfig) -> Self {
        LedgerManager {
            customers: HashMap::new(),
            accounts: AccountBook::new(),
            log: TransactionLog::new(),
            customer_ids: IdSequence::starting_at(config.first_customer_id),
            account_ids: IdSequence::starting_at(config.first_account_id),
            transaction_ids: IdSequence::starting_at(config.first_transaction_id),
        }
    }

    fn record(&mut self, account: AccountId, kind: TransactionKind, amount: Decimal, note: String) {
        let id = self.transaction_ids.next_id();
        self.log
            .append(Transaction::new(id, account, kind, amount, note));
    }
}

impl Default for LedgerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for LedgerManager {
    fn create_customer(&mut self, name: &str, email: &str) -> Customer {
        let customer = Customer::new(self.customer_ids.next_id(), name, email);
        self.customers.insert(customer.id, customer.clone());

        tracing::debug!(customer = customer.id, name, "customer created");
        customer
    }

    fn open_account(
        &mut self,
        customer: CustomerId,
        account_type: AccountType,
        initial_deposit: Decimal,
    ) -> Result<Account, LedgerError> {
        if !self.customers.contains_key(&customer) {
            return Err(LedgerError::customer_not_found(customer));
        }

        let id = self.account_ids.next_id();
        self.accounts.insert(Account::new(id, customer, account_type));
        self.log.open(id);

        if initial_deposit > Decimal::ZERO {
            self.accounts.credit(id, initial_deposit)?;
            self.record(
                id,
                TransactionKind::Deposit,
                initial_deposit,
                "Initial deposit".to_string(),
            );
        }

        tracing::debug!(account = id, customer, %account_type, %initial_deposit, "account opened");
        self.account_details(id)
    }

    fn deposit(&mut self, account: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        self.accounts.require_active(account)?;
        ensure_positive(amount)?;

        let balance = self.accounts.credit(account, amount)?;
        self.record(account, TransactionKind::Deposit, amount, "Deposit".to_string());

        tracing::debug!(account, %amount, %balance, "deposit applied");
        Ok(())
    }

    fn withdraw(&mut self, account: AccountId, amount: Decimal) -> Result<(), LedgerError> {
        self.accounts.require_active(account)?;
        ensure_positive(amount)?;

        let balance = self.accounts.debit(account, amount)?;
        self.record(
            account,
            TransactionKind::Withdraw,
            amount,
            "Withdrawal".to_string(),
        );

        tracing::debug!(account, %amount, %balance, "withdrawal applied");
        Ok(())
    }

    /// Transfer funds between two accounts
    ///
    /// Every check for both sides runs before either balance changes, so the
    /// debit and the credit are applied together or not at all.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `from` and `to` are the same account (`SelfTransfer`)
    /// - Either account is missing or closed
    /// - The amount is not positive
    /// - The source balance does not cover the amount
    /// - The destination balance would overflow
    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::self_transfer(from));
        }

        let source = self.accounts.require_active(from)?;
        let destination = self.accounts.require_active(to)?;
        ensure_positive(amount)?;
        checked_debit(source, amount)?;
        checked_credit(destination, amount)?;

        // Both sides validated; neither call below can fail now
        self.accounts.debit(from, amount)?;
        self.accounts.credit(to, amount)?;
        self.record(
            from,
            TransactionKind::TransferOut,
            amount,
            format!("Transfer to {}", to),
        );
        self.record(
            to,
            TransactionKind::TransferIn,
            amount,
            format!("Transfer from {}", from),
        );

        tracing::debug!(from, to, %amount, "transfer applied");
        Ok(())
    }

    fn balance(&self, account: AccountId) -> Result<Decimal, LedgerError> {
        Ok(self.accounts.require(account)?.balance)
    }

    fn account_details(&self, account: AccountId) -> Result<Account, LedgerError> {
        self.accounts.require(account).cloned()
    }

    fn transactions(&self, account: AccountId) -> Vec<Transaction> {
        self.log.for_account(account).to_vec()
    }

    fn close_account(&mut self, account: AccountId) -> bool {
        let closed = self.accounts.deactivate(account);
        tracing::debug!(account, closed, "close requested");
        closed
    }

    fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self.customers.values().cloned().collect();
        customers.sort_by_key(|customer| customer.id);
        customers
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.accounts
            .get_all_accounts()
            .into_iter()
            .cloned()
            .collect()
    }
}
