//! Ledger configuration
//!
//! `LedgerConfig` collects the knobs a ledger is constructed with: where each
//! ID sequence starts and whether the demo customers and accounts are seeded.
//! The CLI builds one from its arguments; tests usually start from
//! `LedgerConfig::unseeded()`.

/// Configuration for constructing a ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// First customer ID handed out
    pub first_customer_id: u64,
    /// First account ID handed out
    pub first_account_id: u64,
    /// First transaction ID handed out
    pub first_transaction_id: u64,
    /// Whether to create the demo customers and accounts at startup
    pub seed_demo_data: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            first_customer_id: 1,
            first_account_id: 1001,
            first_transaction_id: 1,
            seed_demo_data: true,
        }
    }
}

impl LedgerConfig {
    /// Default ID starts, no demo data
    pub fn unseeded() -> Self {
        Self {
            seed_demo_data: false,
            ..Self::default()
        }
    }

    /// Create a LedgerConfig with custom ID starts
    ///
    /// Zero is reserved: a start of 0 falls back to the default for that
    /// sequence, with a warning.
    pub fn new(
        first_customer_id: u64,
        first_account_id: u64,
        first_transaction_id: u64,
        seed_demo_data: bool,
    ) -> Self {
        let default = Self::default();

        Self {
            first_customer_id: non_zero_or(
                "first_customer_id",
                first_customer_id,
                default.first_customer_id,
            ),
            first_account_id: non_zero_or(
                "first_account_id",
                first_account_id,
                default.first_account_id,
            ),
            first_transaction_id: non_zero_or(
                "first_transaction_id",
                first_transaction_id,
                default.first_transaction_id,
            ),
            seed_demo_data,
        }
    }
}

fn non_zero_or(field: &str, value: u64, default: u64) -> u64 {
    if value == 0 {
        tracing::warn!(field, default, "invalid ID start (0), using default");
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_matches_demo_program() {
        let config = LedgerConfig::default();
        assert_eq!(config.first_customer_id, 1);
        assert_eq!(config.first_account_id, 1001);
        assert_eq!(config.first_transaction_id, 1);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_unseeded_keeps_default_ids() {
        let config = LedgerConfig::unseeded();
        assert!(!config.seed_demo_data);
        assert_eq!(config.first_account_id, 1001);
    }

    #[rstest]
    #[case::custom(5, 2001, 100, (5, 2001, 100))]
    #[case::zero_customer(0, 2001, 100, (1, 2001, 100))]
    #[case::zero_account(5, 0, 100, (5, 1001, 100))]
    #[case::zero_transaction(5, 2001, 0, (5, 2001, 1))]
    #[case::all_zero(0, 0, 0, (1, 1001, 1))]
    fn test_new_falls_back_on_zero(
        #[case] customer: u64,
        #[case] account: u64,
        #[case] transaction: u64,
        #[case] expected: (u64, u64, u64),
    ) {
        let config = LedgerConfig::new(customer, account, transaction, false);
        assert_eq!(
            (
                config.first_customer_id,
                config.first_account_id,
                config.first_transaction_id
            ),
            expected
        );
    }
}
