//! Bank Ledger CLI
//!
//! Command-line front end for the in-memory bank ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run                                   # interactive console
//! cargo run -- --no-seed                      # console with an empty ledger
//! cargo run -- --script ops.csv > accounts.csv
//! cargo run -- --script ops.csv --statement 1001 > statement.csv
//! cargo run -- --engine shared --script ops.csv -v
//! cargo run -- --first-account-id 5001 --no-seed
//! ```
//!
//! Without `--script` the program runs the interactive menu on stdin/stdout.
//! With a script it applies every row and writes the account table (or one
//! account's statement) to stdout. Logs go to stderr; `RUST_LOG` overrides
//! the level chosen by `--verbose`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (script not readable, unknown statement account, I/O failure)

use bank_ledger::cli::{self, CliArgs, Console};
use bank_ledger::{create_ledger, process_script, LedgerError};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(args: &CliArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &CliArgs) -> Result<(), LedgerError> {
    let mut ledger = create_ledger(args.engine, &args.to_ledger_config())?;

    match &args.script {
        Some(script) => {
            let mut output = std::io::stdout();
            process_script(ledger.as_mut(), script, args.statement, &mut output)?;
        }
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Console::new(ledger.as_mut(), stdin.lock(), stdout.lock()).run()?;
        }
    }

    Ok(())
}
