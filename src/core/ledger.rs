//! Ledger store
//!
//! This module provides the `Ledger`, which exclusively owns every account,
//! allocates account numbers, and persists the full account set after each
//! successful mutation.
//!
//! The Ledger is responsible for:
//! - Loading the snapshot at start-up (falling back to an empty ledger)
//! - Allocating strictly increasing, never reused account numbers
//! - Routing balance operations to accounts by account number
//! - Orchestrating transfers so a failed transfer changes nothing
//! - Saving the whole account set after every committed change

use crate::config::{positive_or_default, LedgerConfig};
use crate::core::traits::SnapshotStore;
use crate::io::SnapshotFile;
use crate::types::{Account, AccountNumber, LedgerError, Transaction};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Owns all accounts and their persistence
///
/// Operations take account numbers rather than account references, so callers
/// never hold a borrow into the ledger across operations.
pub struct Ledger {
    /// Accounts keyed by number, kept ordered for deterministic snapshots
    accounts: BTreeMap<AccountNumber, Account>,

    /// Next number to hand out; `None` once the number space is used up
    next_account_number: Option<AccountNumber>,

    store: Box<dyn SnapshotStore>,
}

impl Ledger {
    /// Create an empty ledger backed by `store`
    ///
    /// Nothing is read from the store; see `load` for start-up. A first
    /// account number of zero is replaced by the default.
    pub fn new(store: Box<dyn SnapshotStore>, first_account_number: AccountNumber) -> Self {
        Ledger {
            accounts: BTreeMap::new(),
            next_account_number: Some(positive_or_default(first_account_number)),
            store,
        }
    }

    /// Open the ledger described by `config`, using a snapshot file
    pub fn open(config: &LedgerConfig) -> Self {
        Self::load(
            Box::new(SnapshotFile::new(config.data_file.clone())),
            config.first_account_number,
        )
    }

    /// Load the ledger from `store`
    ///
    /// A missing snapshot yields an empty ledger. An unreadable or corrupt
    /// snapshot is logged and also yields an empty ledger; start-up never fails.
    pub fn load(store: Box<dyn SnapshotStore>, first_account_number: AccountNumber) -> Self {
        let mut ledger = Ledger::new(store, first_account_number);

        if let Err(e) = ledger.reload() {
            warn!(
                store = %ledger.store.describe(),
                error = %e,
                "Failed to load ledger snapshot, starting with an empty ledger"
            );
        }

        ledger
    }

    /// Load the ledger from `store`, returning any snapshot error
    pub fn try_load(
        store: Box<dyn SnapshotStore>,
        first_account_number: AccountNumber,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Ledger::new(store, first_account_number);
        ledger.reload()?;
        Ok(ledger)
    }

    /// Replace in-memory state with the stored snapshot
    ///
    /// State is only replaced once the whole snapshot has been validated.
    fn reload(&mut self) -> Result<(), LedgerError> {
        let Some(loaded) = self.store.load()? else {
            debug!(store = %self.store.describe(), "No ledger snapshot found");
            return Ok(());
        };

        let mut accounts = BTreeMap::new();
        for account in loaded {
            let number = account.number();
            if accounts.insert(number, account).is_some() {
                return Err(LedgerError::corrupt_snapshot(
                    None,
                    format!("duplicate account {}", number),
                ));
            }
        }

        // Recompute from the data rather than trusting any stored counter
        if let Some(&highest) = accounts.keys().next_back() {
            self.next_account_number = highest.checked_add(1);
        }
        self.accounts = accounts;

        info!(
            store = %self.store.describe(),
            accounts = self.accounts.len(),
            "Loaded ledger snapshot"
        );

        Ok(())
    }

    /// Write the full account set to the store
    ///
    /// # Errors
    ///
    /// Returns the store's error. In-memory state is unaffected either way.
    pub fn save(&self) -> Result<(), LedgerError> {
        let accounts: Vec<&Account> = self.accounts.values().collect();
        self.store.save(&accounts)
    }

    /// Save, logging instead of returning a failure
    ///
    /// Returns whether the snapshot was written.
    pub fn persist(&self) -> bool {
        match self.save() {
            Ok(()) => {
                debug!(accounts = self.accounts.len(), "Saved ledger snapshot");
                true
            }
            Err(e) => {
                warn!(
                    store = %self.store.describe(),
                    error = %e,
                    "Failed to save ledger snapshot, changes are only held in memory"
                );
                false
            }
        }
    }

    /// Open a new account with zero balance
    ///
    /// # Returns
    ///
    /// The newly allocated account number
    ///
    /// # Errors
    ///
    /// Returns `AccountNumbersExhausted` if no numbers are left.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AccountNumber, LedgerError> {
        let number = self
            .next_account_number
            .ok_or(LedgerError::AccountNumbersExhausted)?;

        self.accounts
            .insert(number, Account::new(number, name, email, phone, password));
        self.next_account_number = number.checked_add(1);

        info!(account = number, "Registered account");
        self.persist();

        Ok(number)
    }

    /// Check credentials and return the account on success
    ///
    /// Unknown numbers and wrong passwords produce the same error.
    pub fn authenticate(
        &self,
        number: AccountNumber,
        password: &str,
    ) -> Result<&Account, LedgerError> {
        match self.accounts.get(&number) {
            Some(account) if account.password_matches(password) => Ok(account),
            _ => {
                debug!(account = number, "Authentication failed");
                Err(LedgerError::invalid_credentials(number))
            }
        }
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    /// All accounts in ascending account-number order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Number the next `register` will use, if any remain
    pub fn next_account_number(&self) -> Option<AccountNumber> {
        self.next_account_number
    }

    fn account_mut(&mut self, number: AccountNumber) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&number)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    pub fn balance(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        self.account(number)
            .map(Account::balance)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    pub fn transaction_history(
        &self,
        number: AccountNumber,
    ) -> Result<&[Transaction], LedgerError> {
        self.account(number)
            .map(Account::transactions)
            .ok_or_else(|| LedgerError::account_not_found(number))
    }

    /// Credit `amount` to an account
    ///
    /// # Returns
    ///
    /// The account's new balance
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let account = self.account_mut(number)?;
        account.deposit(amount)?;
        let balance = account.balance();

        debug!(account = number, %amount, %balance, "Deposit");
        self.persist();

        Ok(balance)
    }

    /// Debit `amount` from an account
    ///
    /// # Returns
    ///
    /// The account's new balance
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` when the balance does not cover the amount;
    /// nothing is changed or saved in that case.
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let account = self.account_mut(number)?;
        account.withdraw(amount)?;
        let balance = account.balance();

        debug!(account = number, %amount, %balance, "Withdrawal");
        self.persist();

        Ok(balance)
    }

    /// Move `amount` from one account to another
    ///
    /// Every check runs before the sender is debited, so the credit to the
    /// recipient cannot fail once the withdrawal has happened.
    ///
    /// # Returns
    ///
    /// The sender's new balance
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is zero or negative
    /// - The sender does not exist
    /// - The recipient does not exist (`RecipientNotFound`)
    /// - The recipient's balance would overflow
    /// - The sender's balance does not cover the amount (`InsufficientFunds`)
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        if !self.accounts.contains_key(&from) {
            return Err(LedgerError::account_not_found(from));
        }

        let recipient = self
            .accounts
            .get(&to)
            .ok_or_else(|| LedgerError::recipient_not_found(to))?;
        if !recipient.can_accept(amount) {
            return Err(LedgerError::arithmetic_overflow("transfer", to));
        }

        self.account_mut(from)?.withdraw(amount)?;
        self.account_mut(to)?.deposit(amount)?;

        let balance = self.balance(from)?;
        info!(from, to, %amount, "Transfer");
        self.persist();

        Ok(balance)
    }

    /// Overwrite name, email and phone
    pub fn update_profile(
        &mut self,
        number: AccountNumber,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.account_mut(number)?.update_profile(name, email, phone);

        debug!(account = number, "Updated profile");
        self.persist();

        Ok(())
    }

    /// Replace the password after verifying the current one
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if `current` does not match.
    pub fn change_password(
        &mut self,
        number: AccountNumber,
        current: &str,
        new_password: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let account = self.account_mut(number)?;
        if !account.password_matches(current) {
            return Err(LedgerError::invalid_credentials(number));
        }
        account.change_password(new_password);

        debug!(account = number, "Changed password");
        self.persist();

        Ok(())
    }
}
