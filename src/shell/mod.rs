//! Interactive menu shell
//!
//! The shell turns typed input into ledger calls and ledger results into
//! messages. It owns the `Ledger` for the lifetime of the process and tracks
//! the login `Session`.
//!
//! # Responsibilities
//!
//! - Prompting and reading one line per answer
//! - Rejecting malformed numbers and non-positive amounts before any ledger call
//! - Verifying the current password before asking for a new one
//! - Saving the ledger on logout and on exit (end of input counts as exit)
//!
//! The shell is generic over `BufRead`/`Write` so sessions can be scripted.

pub mod input;
pub mod session;

pub use session::Session;

use crate::core::Ledger;
use crate::types::{AccountNumber, LedgerError};
use input::{parse_account_number, parse_amount, strip_line_ending};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use tracing::info;

/// Interactive front end over a `Ledger`
pub struct Shell<R, W> {
    ledger: Ledger,
    input: R,
    output: W,
    session: Session,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(ledger: Ledger, input: R, output: W) -> Self {
        Shell {
            ledger,
            input,
            output,
            session: Session::LoggedOut,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Hand back the ledger and the output sink
    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.output)
    }

    /// Run menus until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures end the loop early. Ledger failures are
    /// reported to the user and the menu is shown again.
    pub fn run(&mut self) -> Result<(), LedgerError> {
        loop {
            let keep_going = match self.session {
                Session::LoggedOut => self.main_menu()?,
                Session::LoggedIn(number) => self.account_menu(number)?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    /// Read one answer; `None` at end of input
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so the
    /// answer fails validation like any other bad input.
    fn read_line(&mut self) -> Result<Option<String>, LedgerError> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }

        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        strip_line_ending(&mut line);
        Ok(Some(line))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>, LedgerError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for an amount; invalid input is reported and yields `None`
    fn prompt_amount(&mut self, label: &str) -> Result<Option<Decimal>, LedgerError> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };

        let amount = parse_amount(&raw);
        if amount.is_none() {
            writeln!(self.output, "Invalid amount.")?;
        }
        Ok(amount)
    }

    /// Prompt for an account number; invalid input is reported and yields `None`
    fn prompt_account_number(&mut self, label: &str) -> Result<Option<AccountNumber>, LedgerError> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };

        let number = parse_account_number(&raw);
        if number.is_none() {
            writeln!(self.output, "Invalid account number.")?;
        }
        Ok(number)
    }

    fn main_menu(&mut self) -> Result<bool, LedgerError> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Personal Ledger ===")?;
        writeln!(self.output, "1. Register")?;
        writeln!(self.output, "2. Log in")?;
        writeln!(self.output, "3. Exit")?;

        let Some(choice) = self.prompt("Choose an option: ")? else {
            self.exit()?;
            return Ok(false);
        };

        match choice.trim() {
            "1" => self.register()?,
            "2" => self.login()?,
            "3" => {
                self.exit()?;
                return Ok(false);
            }
            _ => writeln!(self.output, "Invalid choice. Please try again.")?,
        }

        Ok(true)
    }

    fn account_menu(&mut self, number: AccountNumber) -> Result<bool, LedgerError> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Account {} ===", number)?;
        writeln!(self.output, "1. Deposit")?;
        writeln!(self.output, "2. Withdraw")?;
        writeln!(self.output, "3. Transfer")?;
        writeln!(self.output, "4. Transaction history")?;
        writeln!(self.output, "5. Update profile")?;
        writeln!(self.output, "6. Change password")?;
        writeln!(self.output, "7. Log out")?;

        let Some(choice) = self.prompt("Choose an option: ")? else {
            self.logout()?;
            self.exit()?;
            return Ok(false);
        };

        match choice.trim() {
            "1" => self.deposit(number)?,
            "2" => self.withdraw(number)?,
            "3" => self.transfer(number)?,
            "4" => self.history(number)?,
            "5" => self.update_profile(number)?,
            "6" => self.change_password(number)?,
            "7" => self.logout()?,
            _ => writeln!(self.output, "Invalid choice. Please try again.")?,
        }

        Ok(true)
    }

    fn register(&mut self) -> Result<(), LedgerError> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Phone: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Choose a password: ")? else {
            return Ok(());
        };

        match self.ledger.register(name, email, phone, password) {
            Ok(number) => writeln!(
                self.output,
                "Registration successful. Your account number is {}.",
                number
            )?,
            Err(e) => self.report(e)?,
        }

        Ok(())
    }

    fn login(&mut self) -> Result<(), LedgerError> {
        let Some(number) = self.prompt_account_number("Account number: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(());
        };

        match self.ledger.authenticate(number, &password) {
            Ok(account) => {
                writeln!(self.output, "Login successful. Welcome, {}!", account.name())?;
                self.session = Session::LoggedIn(number);
                info!(account = number, "Session started");
            }
            Err(_) => writeln!(self.output, "Invalid account number or password.")?,
        }

        Ok(())
    }

    fn deposit(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        let Some(amount) = self.prompt_amount("Amount to deposit: ")? else {
            return Ok(());
        };

        match self.ledger.deposit(number, amount) {
            Ok(balance) => writeln!(self.output, "Deposit successful. New balance: {}", balance)?,
            Err(e) => self.report(e)?,
        }

        Ok(())
    }

    fn withdraw(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        let Some(amount) = self.prompt_amount("Amount to withdraw: ")? else {
            return Ok(());
        };

        match self.ledger.withdraw(number, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Withdrawal successful. New balance: {}",
                balance
            )?,
            Err(e) => self.report(e)?,
        }

        Ok(())
    }

    fn transfer(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        let Some(recipient) = self.prompt_account_number("Recipient account number: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount("Amount to transfer: ")? else {
            return Ok(());
        };

        match self.ledger.transfer(number, recipient, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Transfer successful. Your new balance: {}",
                balance
            )?,
            Err(e) => self.report(e)?,
        }

        Ok(())
    }

    fn history(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        let account = self
            .ledger
            .account(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;

        writeln!(self.output, "--- Transaction History ---")?;
        if account.transactions().is_empty() {
            writeln!(self.output, "No transactions found.")?;
        } else {
            for tx in account.transactions() {
                writeln!(self.output, "{}", tx)?;
            }
        }
        writeln!(self.output, "Balance: {}", account.balance())?;

        Ok(())
    }

    fn update_profile(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        let Some(name) = self.prompt("New name: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("New email: ")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("New phone: ")? else {
            return Ok(());
        };

        match self.ledger.update_profile(number, name, email, phone) {
            Ok(()) => writeln!(self.output, "Profile updated.")?,
            Err(e) => self.report(e)?,
        }

        Ok(())
    }

    fn change_password(&mut self, number: AccountNumber) -> Result<(), LedgerError> {
        let Some(current) = self.prompt("Current password: ")? else {
            return Ok(());
        };
        if self.ledger.authenticate(number, &current).is_err() {
            writeln!(self.output, "Incorrect password.")?;
            return Ok(());
        }

        let Some(new_password) = self.prompt("New password: ")? else {
            return Ok(());
        };

        match self.ledger.change_password(number, &current, new_password) {
            Ok(()) => writeln!(self.output, "Password changed.")?,
            Err(e) => self.report(e)?,
        }

        Ok(())
    }

    fn logout(&mut self) -> Result<(), LedgerError> {
        if let Some(number) = self.session.account() {
            info!(account = number, "Session ended");
        }
        self.session = Session::LoggedOut;
        self.save_with_notice()?;
        writeln!(self.output, "Logged out.")?;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), LedgerError> {
        self.save_with_notice()?;
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn save_with_notice(&mut self) -> Result<(), LedgerError> {
        if !self.ledger.persist() {
            writeln!(self.output, "Warning: changes could not be saved.")?;
        }
        Ok(())
    }

    /// Turn a ledger failure into a user-facing message
    fn report(&mut self, error: LedgerError) -> Result<(), LedgerError> {
        match error {
            LedgerError::InvalidAmount { .. } => writeln!(self.output, "Invalid amount.")?,
            LedgerError::InsufficientFunds { .. } => {
                writeln!(self.output, "Insufficient balance.")?
            }
            LedgerError::RecipientNotFound { .. } => {
                writeln!(self.output, "Recipient account not found.")?
            }
            LedgerError::InvalidCredentials { .. } => writeln!(self.output, "Incorrect password.")?,
            other => writeln!(self.output, "Operation failed: {}", other)?,
        }
        Ok(())
    }
}
