//! Demo data for a freshly started ledger

use crate::core::traits::Ledger;
use crate::types::{AccountType, LedgerError};
use rust_decimal::Decimal;

/// Create the two demo customers, each with one funded account
///
/// With the default ID starts this yields customers 1 and 2 and accounts
/// 1001 (SAVINGS, 5000) and 1002 (CURRENT, 10000).
pub fn seed_demo_data(ledger: &mut dyn Ledger) -> Result<(), LedgerError> {
    let rahul = ledger.create_customer("Rahul Sharma", "rahul@example.com");
    let neha = ledger.create_customer("Neha Gupta", "neha@example.com");

    ledger.open_account(rahul.id, AccountType::Savings, Decimal::new(5000, 0))?;
    ledger.open_account(neha.id, AccountType::Current, Decimal::new(10000, 0))?;

    tracing::debug!("demo data seeded");
    Ok(())
}
