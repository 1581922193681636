use crate::config::LedgerConfig;
use crate::types::AccountId;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// In-memory bank ledger with an interactive console and CSV scripts
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "In-memory bank ledger with an interactive console and CSV scripts", long_about = None)]
pub struct CliArgs {
    /// Script CSV file; without it the interactive console starts
    #[arg(
        long = "script",
        value_name = "FILE",
        help = "Run commands from a CSV script instead of the interactive console"
    )]
    pub script: Option<PathBuf>,

    /// Account whose statement is written after the script
    #[arg(
        long = "statement",
        value_name = "ACCOUNT",
        requires = "script",
        help = "After the script, print this account's transactions instead of the account table"
    )]
    pub statement: Option<AccountId>,

    /// Ledger implementation to use
    #[arg(
        long = "engine",
        value_name = "ENGINE",
        default_value = "single",
        help = "Ledger engine: 'single' for single-threaded or 'shared' for thread-safe"
    )]
    pub engine: EngineType,

    /// First customer ID handed out
    #[arg(
        long = "first-customer-id",
        value_name = "ID",
        help = "First customer ID (default: 1, 0 falls back to the default)"
    )]
    pub first_customer_id: Option<u64>,

    /// First account ID handed out
    #[arg(
        long = "first-account-id",
        value_name = "ID",
        help = "First account ID (default: 1001, 0 falls back to the default)"
    )]
    pub first_account_id: Option<u64>,

    /// First transaction ID handed out
    #[arg(
        long = "first-transaction-id",
        value_name = "ID",
        help = "First transaction ID (default: 1, 0 falls back to the default)"
    )]
    pub first_transaction_id: Option<u64>,

    /// Start with an empty ledger
    #[arg(long = "no-seed", help = "Do not create the demo customers and accounts")]
    pub no_seed: bool,

    /// Log applied operations
    #[arg(short = 'v', long = "verbose", help = "Enable debug logging on stderr")]
    pub verbose: bool,
}

/// Available ledger implementations
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineType {
    Single,
    Shared,
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    ///
    /// ID starts that were not given use the defaults, and a start of 0 falls
    /// back to the default with a warning. `--no-seed` turns off the demo data.
    pub fn to_ledger_config(&self) -> LedgerConfig {
        let default = LedgerConfig::default();

        LedgerConfig::new(
            self.first_customer_id.unwrap_or(default.first_customer_id),
            self.first_account_id.unwrap_or(default.first_account_id),
            self.first_transaction_id
                .unwrap_or(default.first_transaction_id),
            !self.no_seed,
        )
    }

    /// Default log filter directive for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Engine parsing tests
    #[rstest]
    #[case::default_engine(&["program"], EngineType::Single)]
    #[case::explicit_single(&["program", "--engine", "single"], EngineType::Single)]
    #[case::explicit_shared(&["program", "--engine", "shared"], EngineType::Shared)]
    fn test_engine_parsing(#[case] args: &[&str], #[case] expected: EngineType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.engine, expected);
    }

    #[rstest]
    #[case::console(&["program"], None, None)]
    #[case::script(&["program", "--script", "ops.csv"], Some("ops.csv"), None)]
    #[case::statement(
        &["program", "--script", "ops.csv", "--statement", "1001"],
        Some("ops.csv"),
        Some(1001)
    )]
    fn test_script_options(
        #[case] args: &[&str],
        #[case] script: Option<&str>,
        #[case] statement: Option<AccountId>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.script, script.map(PathBuf::from));
        assert_eq!(parsed.statement, statement);
    }

    #[rstest]
    #[case::seeded(&["program"], true)]
    #[case::no_seed(&["program", "--no-seed"], false)]
    fn test_ledger_config_conversion(#[case] args: &[&str], #[case] seed: bool) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_ledger_config();

        assert_eq!(config.seed_demo_data, seed);
        assert_eq!(config.first_account_id, 1001);
    }

    // ID start options are routed through LedgerConfig::new
    #[rstest]
    #[case::defaults(&["program"], (1, 1001, 1))]
    #[case::custom_account(&["program", "--first-account-id", "5001"], (1, 5001, 1))]
    #[case::all_custom(
        &[
            "program",
            "--first-customer-id", "10",
            "--first-account-id", "2001",
            "--first-transaction-id", "500",
        ],
        (10, 2001, 500)
    )]
    #[case::zero_falls_back(
        &["program", "--first-customer-id", "0", "--first-transaction-id", "0"],
        (1, 1001, 1)
    )]
    fn test_id_start_options(#[case] args: &[&str], #[case] expected: (u64, u64, u64)) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_ledger_config();

        assert_eq!(
            (
                config.first_customer_id,
                config.first_account_id,
                config.first_transaction_id
            ),
            expected
        );
    }

    #[rstest]
    #[case::quiet(&["program"], "warn")]
    #[case::short(&["program", "-v"], "debug")]
    #[case::long(&["program", "--verbose"], "debug")]
    fn test_log_level(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level(), expected);
    }

    // Error handling tests
    #[rstest]
    #[case::invalid_engine(&["program", "--engine", "async"])]
    #[case::statement_without_script(&["program", "--statement", "1001"])]
    #[case::non_numeric_statement(&["program", "--script", "ops.csv", "--statement", "abc"])]
    #[case::unknown_flag(&["program", "--batch-size", "10"])]
    #[case::negative_id_start(&["program", "--first-account-id", "-1"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
