//! I/O module
//!
//! Handles CSV scripts and reports.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, report serialization)
//! - `script_reader` - Streaming script reader with iterator interface
//! - `script_runner` - Applies a script to a ledger and writes the report

pub mod csv_format;
pub mod script_reader;
pub mod script_runner;

pub use csv_format::{convert_csv_command, write_accounts_csv, write_transactions_csv, CsvCommand};
pub use script_reader::ScriptReader;
pub use script_runner::{process_script, run_script, write_report, ScriptSummary};
