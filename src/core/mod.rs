//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - The `Ledger` operation set shared by all implementations
//! - `ledger` - Single-threaded `LedgerManager`
//! - `shared` - Thread-safe `SharedLedger` built on `DashMap`
//! - `account_book` - Account storage and balance checks
//! - `transaction_log` - Per-account transaction history
//! - `ids` - Monotonic ID sequences
//! - `demo` - Demo customers and accounts

pub mod account_book;
pub mod demo;
pub mod ids;
pub mod ledger;
pub mod shared;
pub mod traits;
pub mod transaction_log;

pub use account_book::AccountBook;
pub use demo::seed_demo_data;
pub use ids::{AtomicIdSequence, IdSequence};
pub use ledger::LedgerManager;
pub use shared::SharedLedger;
pub use traits::Ledger;
pub use transaction_log::TransactionLog;

use crate::cli::EngineType;
use crate::config::LedgerConfig;
use crate::types::LedgerError;

/// Create a ledger for the selected engine
///
/// The ledger's ID sequences start where `config` says, and the demo data is
/// seeded when `config.seed_demo_data` is set.
///
/// # Arguments
///
/// * `engine` - Which implementation to build (single-threaded or shared)
/// * `config` - ID starts and seeding flag
///
/// # Returns
///
/// A boxed trait object implementing the `Ledger` trait
///
/// # Errors
///
/// Returns an error only if seeding the demo data fails.
pub fn create_ledger(
    engine: EngineType,
    config: &LedgerConfig,
) -> Result<Box<dyn Ledger>, LedgerError> {
    let mut ledger: Box<dyn Ledger> = match engine {
        EngineType::Single => Box::new(LedgerManager::with_config(config)),
        EngineType::Shared => Box::new(SharedLedger::with_config(config)),
    };

    if config.seed_demo_data {
        seed_demo_data(ledger.as_mut())?;
    }

    tracing::debug!(?engine, "ledger created");
    Ok(ledger)
}
