//! Interactive menu console
//!
//! Reads menu choices and their inputs line by line, runs them against a
//! ledger and prints the result. Any failure of a single action is printed as
//! `Error: <message>` and the loop continues. End of input exits the loop.

use crate::core::Ledger;
use crate::types::{AccountId, AccountType, Command, CustomerId, LedgerError, Outcome};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\
=== Bank Ledger ===
1. Create Customer
2. Open Account
3. Deposit
4. Withdraw
5. Transfer
6. Account Summary
7. Transaction History
8. Close Account
9. List Customers
0. Exit";

/// Why an action stopped early
#[derive(Debug)]
enum Interrupt {
    /// Input ended
    Eof,
    /// Console I/O failed
    Io(io::Error),
    /// The action failed; reported to the user
    Failed(LedgerError),
}

impl From<io::Error> for Interrupt {
    fn from(error: io::Error) -> Self {
        Interrupt::Io(error)
    }
}

impl From<LedgerError> for Interrupt {
    fn from(error: LedgerError) -> Self {
        Interrupt::Failed(error)
    }
}

/// Menu-driven console over any line source and writer
pub struct Console<'a, R, W> {
    ledger: &'a mut dyn Ledger,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(ledger: &'a mut dyn Ledger, input: R, output: W) -> Self {
        Console {
            ledger,
            input,
            output,
        }
    }

    /// Run the menu loop until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), LedgerError> {
        loop {
            writeln!(self.output, "{}", MENU)?;

            let choice = match self.prompt("Choose: ") {
                Ok(choice) => choice,
                Err(Interrupt::Io(e)) => return Err(e.into()),
                Err(_) => break,
            };

            let result = match choice.parse::<u8>() {
                Ok(0) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                Ok(choice @ 1..=9) => self.dispatch(choice),
                _ => {
                    writeln!(self.output, "Invalid option")?;
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(Interrupt::Eof) => break,
                Err(Interrupt::Io(e)) => return Err(e.into()),
                Err(Interrupt::Failed(e)) => {
                    tracing::debug!(choice = %choice, error = %e, "console action failed");
                    writeln!(self.output, "Error: {}", e)?;
                }
            }
            writeln!(self.output)?;
        }

        writeln!(self.output)?;
        Ok(())
    }

    fn dispatch(&mut self, choice: u8) -> Result<(), Interrupt> {
        match choice {
            1 => self.create_customer(),
            2 => self.open_account(),
            3 => self.deposit(),
            4 => self.withdraw(),
            5 => self.transfer(),
            6 => self.account_summary(),
            7 => self.transaction_history(),
            8 => self.close_account(),
            _ => self.list_customers(),
        }
    }

    fn create_customer(&mut self) -> Result<(), Interrupt> {
        let name = self.prompt("Customer name: ")?;
        let email = self.prompt("Email: ")?;
        self.execute(Command::CreateCustomer { name, email })
    }

    fn open_account(&mut self) -> Result<(), Interrupt> {
        self.list_customers()?;
        let customer: CustomerId = self.prompt_id("Customer id: ")?;
        let account_type = self.prompt("Account type (SAVINGS/CURRENT): ")?;
        let account_type =
            AccountType::from_str(&account_type).map_err(LedgerError::invalid_argument)?;
        let initial_deposit = self.prompt_amount("Initial deposit: ")?;

        self.execute(Command::OpenAccount {
            customer,
            account_type,
            initial_deposit,
        })
    }

    fn deposit(&mut self) -> Result<(), Interrupt> {
        let account = self.prompt_id("Account id: ")?;
        let amount = self.prompt_amount("Amount to deposit: ")?;
        self.execute(Command::Deposit { account, amount })
    }

    fn withdraw(&mut self) -> Result<(), Interrupt> {
        let account = self.prompt_id("Account id: ")?;
        let amount = self.prompt_amount("Amount to withdraw: ")?;
        self.execute(Command::Withdraw { account, amount })
    }

    fn transfer(&mut self) -> Result<(), Interrupt> {
        let from = self.prompt_id("From account id: ")?;
        let to = self.prompt_id("To account id: ")?;
        let amount = self.prompt_amount("Amount to transfer: ")?;
        self.execute(Command::Transfer { from, to, amount })
    }

    fn account_summary(&mut self) -> Result<(), Interrupt> {
        let account = self.prompt_id("Account id: ")?;
        let details = self.ledger.account_details(account)?;
        writeln!(self.output, "{}", details)?;
        Ok(())
    }

    fn transaction_history(&mut self) -> Result<(), Interrupt> {
        let account = self.prompt_id("Account id: ")?;
        let transactions = self.ledger.transactions(account);

        if transactions.is_empty() {
            writeln!(self.output, "No transactions found.")?;
        }
        for tx in transactions {
            writeln!(self.output, "{}", tx)?;
        }
        Ok(())
    }

    fn close_account(&mut self) -> Result<(), Interrupt> {
        let account = self.prompt_id("Account id to close: ")?;
        self.execute(Command::CloseAccount { account })
    }

    fn list_customers(&mut self) -> Result<(), Interrupt> {
        let customers = self.ledger.list_customers();

        if customers.is_empty() {
            writeln!(self.output, "No customers.")?;
        }
        for customer in customers {
            writeln!(self.output, "{}", customer)?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<(), Interrupt> {
        match self.ledger.execute(command)? {
            Outcome::CustomerCreated(customer) => writeln!(self.output, "Created: {}", customer)?,
            Outcome::AccountOpened(account) => writeln!(self.output, "Opened: {}", account)?,
            Outcome::Deposited { balance, .. } => writeln!(
                self.output,
                "Deposit successful. New balance: {:.2}",
                balance
            )?,
            Outcome::Withdrawn { balance, .. } => writeln!(
                self.output,
                "Withdrawal successful. New balance: {:.2}",
                balance
            )?,
            Outcome::Transferred {
                from_balance,
                to_balance,
                ..
            } => {
                writeln!(self.output, "Transfer successful.")?;
                writeln!(self.output, "From balance: {:.2}", from_balance)?;
                writeln!(self.output, "To balance: {:.2}", to_balance)?;
            }
            Outcome::Closed { closed: true, .. } => writeln!(self.output, "Account closed.")?,
            Outcome::Closed { closed: false, .. } => {
                writeln!(self.output, "Account not found or balance not zero.")?
            }
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line
    fn prompt(&mut self, prompt: &str) -> Result<String, Interrupt> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_id(&mut self, prompt: &str) -> Result<AccountId, Interrupt> {
        let text = self.prompt(prompt)?;
        text.parse().map_err(|_| {
            Interrupt::Failed(LedgerError::invalid_argument(format!(
                "'{}' is not a valid id",
                text
            )))
        })
    }

    fn prompt_amount(&mut self, prompt: &str) -> Result<Decimal, Interrupt> {
        let text = self.prompt(prompt)?;
        Decimal::from_str(&text).map_err(|_| {
            Interrupt::Failed(LedgerError::invalid_argument(format!(
                "'{}' is not a valid amount",
                text
            )))
        })
    }
}
