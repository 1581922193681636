//! CSV format handling for ledger scripts and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvCommand structure for deserializing script rows
//! - Conversion from script rows to ledger commands
//! - Account table and statement serialization
//!
//! All functions are pure (no file access) for easy testing.

use crate::types::{
    Account, AccountId, AccountType, Command, CustomerId, LedgerError, Transaction,
};
use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Script row structure for deserialization
///
/// Matches the script format with columns:
/// `op, customer, account, to, amount, name, email, type`.
/// Every column except `op` is optional because each operation only uses a
/// few of them.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvCommand {
    pub op: String,
    pub customer: Option<CustomerId>,
    pub account: Option<AccountId>,
    pub to: Option<AccountId>,
    pub amount: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

/// Convert a CsvCommand to a Command
///
/// This function:
/// - Matches the operation name case-insensitively
/// - Checks that the columns the operation needs are present
/// - Parses amounts into Decimal and account types into AccountType
///
/// Amount signs are not checked here; the ledger rejects non-positive amounts
/// with its own error.
///
/// # Arguments
///
/// * `row` - The deserialized script row
///
/// # Returns
///
/// Result containing either:
/// - Ok(Command) - Successfully converted row
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_command(row: CsvCommand) -> Result<Command, String> {
    let op = row.op.trim().to_lowercase();

    match op.as_str() {
        "create_customer" => Ok(Command::CreateCustomer {
            name: required_text(row.name, "name", &op)?,
            email: required_text(row.email, "email", &op)?,
        }),
        "open_account" => {
            let account_type = required_text(row.account_type, "type", &op)?;
            let initial_deposit = match optional_text(row.amount) {
                Some(amount) => parse_amount(&amount)?,
                None => Decimal::ZERO,
            };

            Ok(Command::OpenAccount {
                customer: required(row.customer, "customer", &op)?,
                account_type: AccountType::from_str(&account_type)?,
                initial_deposit,
            })
        }
        "deposit" => Ok(Command::Deposit {
            account: required(row.account, "account", &op)?,
            amount: required_amount(row.amount, &op)?,
        }),
        "withdraw" | "withdrawal" => Ok(Command::Withdraw {
            account: required(row.account, "account", &op)?,
            amount: required_amount(row.amount, &op)?,
        }),
        "transfer" => Ok(Command::Transfer {
            from: required(row.account, "account", &op)?,
            to: required(row.to, "to", &op)?,
            amount: required_amount(row.amount, &op)?,
        }),
        "close_account" => Ok(Command::CloseAccount {
            account: required(row.account, "account", &op)?,
        }),
        _ => Err(format!("Invalid operation: '{}'", row.op)),
    }
}

fn required<T>(value: Option<T>, column: &str, op: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("{} requires a '{}' column", op, column))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn required_text(value: Option<String>, column: &str, op: &str) -> Result<String, String> {
    required(optional_text(value), column, op)
}

fn required_amount(value: Option<String>, op: &str) -> Result<Decimal, String> {
    parse_amount(&required_text(value, "amount", op)?)
}

fn parse_amount(text: &str) -> Result<Decimal, String> {
    Decimal::from_str(text).map_err(|_| format!("Invalid amount '{}'", text))
}

/// Write account states to CSV format
///
/// Writes accounts with columns: account, owner, type, balance, active.
/// Accounts are sorted by account ID for deterministic output and balances
/// are written with two decimal places.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "owner", "type", "balance", "active"])?;

    let mut sorted_accounts: Vec<&Account> = accounts.iter().collect();
    sorted_accounts.sort_by_key(|account| account.id);

    for account in sorted_accounts {
        writer.write_record(&[
            account.id.to_string(),
            account.owner.to_string(),
            account.account_type.to_string(),
            format!("{:.2}", account.balance),
            account.active.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write an account statement to CSV format
///
/// Writes transactions in the given order with columns:
/// id, account, kind, amount, timestamp, note. Timestamps are RFC 3339 in UTC.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["id", "account", "kind", "amount", "timestamp", "note"])?;

    for tx in transactions {
        writer.write_record(&[
            tx.id.to_string(),
            tx.account.to_string(),
            tx.kind.to_string(),
            format!("{:.2}", tx.amount),
            tx.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            tx.note.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
