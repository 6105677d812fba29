//! Account-related types for the personal ledger
//!
//! This module defines the Account structure: profile fields, credential,
//! balance, and the append-only transaction history.

use super::error::LedgerError;
use super::transaction::{AccountNumber, Transaction, TransactionKind};
use rust_decimal::Decimal;

/// A single customer account
///
/// Fields are private so the balance can only move through `deposit` and
/// `withdraw`, which keeps `balance >= 0` and records every change in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    number: AccountNumber,
    name: String,
    email: String,
    phone: String,
    password: String,
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Create a new account with zero balance and empty history
    ///
    /// # Arguments
    ///
    /// * `number` - The number allocated by the ledger
    /// * `name`, `email`, `phone` - Profile fields (empty strings are accepted)
    /// * `password` - Opaque credential compared by exact match
    pub fn new(
        number: AccountNumber,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Account {
            number,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Rebuild an account from a snapshot
    ///
    /// History is attached afterwards with `restore_transaction`. The balance is
    /// taken as stored; it is not recomputed from the history.
    pub(crate) fn restore(
        number: AccountNumber,
        name: String,
        email: String,
        phone: String,
        password: String,
        balance: Decimal,
    ) -> Result<Self, LedgerError> {
        if balance < Decimal::ZERO {
            return Err(LedgerError::corrupt_snapshot(
                None,
                format!("account {} has negative balance {}", number, balance),
            ));
        }

        Ok(Account {
            number,
            name,
            email,
            phone,
            password,
            balance,
            transactions: Vec::new(),
        })
    }

    pub(crate) fn restore_transaction(&mut self, tx: Transaction) -> Result<(), LedgerError> {
        if tx.amount() <= Decimal::ZERO {
            return Err(LedgerError::corrupt_snapshot(
                None,
                format!(
                    "account {} has non-positive {} amount {}",
                    self.number,
                    tx.kind(),
                    tx.amount()
                ),
            ));
        }
        self.transactions.push(tx);
        Ok(())
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Stored credential, exposed for persistence only
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Transaction history in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Exact, case-sensitive credential comparison
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Check that `amount` could be deposited without overflowing the balance
    pub fn can_accept(&self, amount: Decimal) -> bool {
        self.balance.checked_add(amount).is_some()
    }

    /// Credit funds to this account
    ///
    /// Increases the balance and appends a Deposit record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - Adding the amount would overflow the balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;

        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", self.number))?;

        self.balance = new_balance;
        self.transactions
            .push(Transaction::new(TransactionKind::Deposit, amount));

        Ok(())
    }

    /// Debit funds from this account
    ///
    /// Succeeds only when the balance covers the amount. On failure the balance
    /// and history are left exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - The amount exceeds the current balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        ensure_positive(amount)?;

        if self.balance < amount {
            return Err(LedgerError::insufficient_funds(
                self.number,
                self.balance,
                amount,
            ));
        }

        self.balance -= amount;
        self.transactions
            .push(Transaction::new(TransactionKind::Withdrawal, amount));

        Ok(())
    }

    /// Overwrite the three profile fields
    pub fn update_profile(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) {
        self.name = name.into();
        self.email = email.into();
        self.phone = phone.into();
    }

    /// Replace the credential
    ///
    /// The caller is responsible for having verified the current password.
    pub fn change_password(&mut self, new_password: impl Into<String>) {
        self.password = new_password.into();
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(())
}
