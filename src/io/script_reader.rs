//! Script reader with iterator interface
//!
//! Provides a streaming iterator over ledger commands from a CSV script.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The ScriptReader uses csv::Reader to read and deserialize rows one at a
//! time, handing each row to `convert_csv_command`. The script is never loaded
//! into memory as a whole.
//!
//! ```no_run
//! use bank_ledger::io::script_reader::ScriptReader;
//! use std::path::Path;
//!
//! let reader = ScriptReader::open(Path::new("script.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `open()`
//! - Row errors are yielded as `ParseError` items carrying the line number
//!   (the header is line 1), and iteration continues with the next row

use crate::io::csv_format::{convert_csv_command, CsvCommand};
use crate::types::{Command, LedgerError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming reader of script commands
#[derive(Debug)]
pub struct ScriptReader<R = File> {
    reader: csv::Reader<R>,
    line_num: u64,
}

impl ScriptReader<File> {
    /// Open a script file for streaming iteration
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        Ok(Self::from_reader(file))
    }
}

impl<R: Read> ScriptReader<R> {
    /// Wrap any byte source holding a script with a header row
    ///
    /// The CSV reader is configured to trim whitespace from all fields and to
    /// allow rows with fewer columns than the header.
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Self {
            reader,
            line_num: 1,
        }
    }
}

impl<R: Read> Iterator for ScriptReader<R> {
    type Item = Result<Command, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvCommand>();
        let row = deserializer.next()?;
        self.line_num += 1;

        let line = Some(self.line_num);
        Some(match row {
            Ok(row) => convert_csv_command(row).map_err(|e| LedgerError::parse_error(line, e)),
            Err(e) => Err(LedgerError::parse_error(line, format!("CSV parse error: {}", e))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "op,customer,account,to,amount,name,email,type\n";

    fn read_all(body: &str) -> Vec<Result<Command, LedgerError>> {
        let script = format!("{}{}", HEADER, body);
        ScriptReader::from_reader(script.as_bytes()).collect()
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}deposit,,1001,,10,,,", HEADER).unwrap();
        file.flush().unwrap();

        let commands: Vec<_> = ScriptReader::open(file.path()).unwrap().collect();

        assert_eq!(commands.len(), 1);
        assert!(commands[0].is_ok());
    }

    #[test]
    fn test_open_fails_on_missing_file() {
        let err = ScriptReader::open(Path::new("nonexistent.csv")).unwrap_err();

        assert!(err.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_iterates_all_operations() {
        let commands: Vec<Command> = read_all(
            "create_customer,,,,,Alice,a@x.com,\n\
             open_account,1,,,100,,,SAVINGS\n\
             deposit,,1001,,50,,,\n\
             withdraw,,1001,,20,,,\n\
             transfer,,1001,1002,5,,,\n\
             close_account,,1002,,,,,\n",
        )
        .into_iter()
        .map(Result::unwrap)
        .collect();

        let names: Vec<&str> = commands.iter().map(Command::name).collect();
        assert_eq!(
            names,
            vec![
                "create_customer",
                "open_account",
                "deposit",
                "withdraw",
                "transfer",
                "close_account"
            ]
        );
    }

    #[test]
    fn test_short_rows_are_accepted() {
        let commands = read_all("close_account,,1002\n");

        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].as_ref().unwrap(),
            &Command::CloseAccount { account: 1002 }
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let commands = read_all("  Deposit , , 1001 , , 12.5 ,,,\n");

        assert_eq!(
            commands[0].as_ref().unwrap(),
            &Command::Deposit {
                account: 1001,
                amount: Decimal::new(125, 1),
            }
        );
    }

    #[test]
    fn test_errors_carry_line_numbers_and_iteration_continues() {
        let commands = read_all(
            "deposit,,1001,,10,,,\n\
             deposit,,1001,,ten,,,\n\
             deposit,,abc,,10,,,\n\
             deposit,,1001,,30,,,\n",
        );

        assert_eq!(commands.len(), 4);
        assert!(commands[0].is_ok());
        assert!(commands[3].is_ok());

        let invalid_amount = commands[1].as_ref().unwrap_err();
        assert!(matches!(invalid_amount, LedgerError::ParseError { line: Some(3), .. }));
        assert!(invalid_amount.to_string().contains("Invalid amount"));

        let invalid_id = commands[2].as_ref().unwrap_err();
        assert!(matches!(invalid_id, LedgerError::ParseError { line: Some(4), .. }));
    }

    #[test]
    fn test_empty_script_after_header() {
        assert!(read_all("").is_empty());
    }
}
