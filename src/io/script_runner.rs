//! Script processing
//!
//! Runs every command of a script against a ledger and writes the final
//! report. Orchestration only: parsing lives in `script_reader`, business
//! rules in the ledger and output format in `csv_format`.
//!
//! Rows that fail to parse or that the ledger rejects are logged as warnings
//! and skipped; they never abort the script.

use crate::core::Ledger;
use crate::io::csv_format::{write_accounts_csv, write_transactions_csv};
use crate::io::script_reader::ScriptReader;
use crate::types::{AccountId, LedgerError, Outcome};
use std::io::{Read, Write};
use std::path::Path;

/// Counts of what happened while running a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Commands that changed the ledger
    pub applied: usize,
    /// Rows that failed to parse, were rejected, or had no effect
    pub skipped: usize,
}

/// Run a script file and write the report
///
/// # Arguments
///
/// * `ledger` - The ledger to apply the commands to
/// * `path` - Path to the script CSV file
/// * `statement` - Write this account's transaction log instead of the
///   account table
/// * `output` - Writer for the report
///
/// # Errors
///
/// Returns an error if the script cannot be opened, the statement account
/// does not exist, or the report cannot be written.
pub fn process_script(
    ledger: &mut dyn Ledger,
    path: &Path,
    statement: Option<AccountId>,
    output: &mut dyn Write,
) -> Result<ScriptSummary, LedgerError> {
    let reader = ScriptReader::open(path)?;
    let summary = run_script(ledger, reader);

    tracing::info!(
        applied = summary.applied,
        skipped = summary.skipped,
        script = %path.display(),
        "script finished"
    );

    write_report(ledger, statement, output)?;
    Ok(summary)
}

/// Apply every command the reader yields
pub fn run_script<R: Read>(ledger: &mut dyn Ledger, reader: ScriptReader<R>) -> ScriptSummary {
    let mut summary = ScriptSummary::default();

    for result in reader {
        let command = match result {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(error = %e, "skipping script row");
                summary.skipped += 1;
                continue;
            }
        };

        let op = command.name();
        match ledger.execute(command) {
            Ok(Outcome::Closed { account, closed: false }) => {
                tracing::warn!(account, "account not closed: missing, inactive or not empty");
                summary.skipped += 1;
            }
            Ok(_) => summary.applied += 1,
            Err(e) => {
                tracing::warn!(op, error = %e, "command rejected");
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// Write the account table, or one account's statement
///
/// # Errors
///
/// Returns `AccountNotFound` for an unknown statement account, or an I/O error
/// if writing fails.
pub fn write_report(
    ledger: &dyn Ledger,
    statement: Option<AccountId>,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match statement {
        Some(account) => {
            ledger.account_details(account)?;
            write_transactions_csv(&ledger.transactions(account), output)
        }
        None => write_accounts_csv(&ledger.list_accounts(), output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::core::LedgerManager;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "op,customer,account,to,amount,name,email,type\n";

    fn create_temp_script(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn empty_ledger() -> LedgerManager {
        LedgerManager::with_config(&LedgerConfig::unseeded())
    }

    #[test]
    fn test_process_script_writes_account_table() {
        let file = create_temp_script(
            "create_customer,,,,,Alice,a@x.com,\n\
             open_account,1,,,100,,,SAVINGS\n\
             open_account,1,,,,,,CURRENT\n\
             transfer,,1001,1002,40,,,\n",
        );
        let mut ledger = empty_ledger();
        let mut output = Vec::new();

        let summary = process_script(&mut ledger, file.path(), None, &mut output).unwrap();

        assert_eq!(summary, ScriptSummary { applied: 4, skipped: 0 });
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,owner,type,balance,active\n\
             1001,1,SAVINGS,60.00,true\n\
             1002,1,CURRENT,40.00,true\n"
        );
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let file = create_temp_script(
            "create_customer,,,,,Alice,a@x.com,\n\
             open_account,1,,,100,,,SAVINGS\n\
             withdraw,,1001,,500,,,\n\
             deposit,,1001,,abc,,,\n\
             deposit,,9999,,10,,,\n\
             close_account,,1001,,,,,\n\
             deposit,,1001,,5,,,\n",
        );
        let mut ledger = empty_ledger();
        let mut output = Vec::new();

        let summary = process_script(&mut ledger, file.path(), None, &mut output).unwrap();

        assert_eq!(summary, ScriptSummary { applied: 3, skipped: 4 });
        assert_eq!(ledger.balance(1001).unwrap().to_string(), "105");
    }

    #[test]
    fn test_statement_output() {
        let file = create_temp_script(
            "create_customer,,,,,Alice,a@x.com,\n\
             open_account,1,,,100,,,SAVINGS\n\
             withdraw,,1001,,30,,,\n",
        );
        let mut ledger = empty_ledger();
        let mut output = Vec::new();

        process_script(&mut ledger, file.path(), Some(1001), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,1001,DEPOSIT,100.00,"));
        assert!(lines[2].starts_with("2,1001,WITHDRAW,30.00,"));
        assert!(lines[2].ends_with(",Withdrawal"));
    }

    #[test]
    fn test_statement_for_unknown_account_fails() {
        let file = create_temp_script("");
        let mut ledger = empty_ledger();
        let mut output = Vec::new();

        let err = process_script(&mut ledger, file.path(), Some(4242), &mut output).unwrap_err();

        assert_eq!(err, LedgerError::account_not_found(4242));
    }

    #[test]
    fn test_missing_script_is_fatal() {
        let mut ledger = empty_ledger();
        let mut output = Vec::new();

        let result = process_script(&mut ledger, Path::new("nonexistent.csv"), None, &mut output);

        assert!(result.is_err());
        assert!(output.is_empty());
    }
}
