//! Thread-safe ledger handle
//!
//! This module provides `SharedLedger`, a cloneable handle that lets several
//! tasks drive one `Ledger`.
//!
//! # Design
//!
//! The whole ledger sits behind a single `tokio::sync::Mutex`. Every operation
//! holds that lock from its first check to its final save, so two transfers can
//! never interleave between a withdrawal and the matching deposit, and no task
//! can observe a balance below zero.

use crate::core::ledger::Ledger;
use crate::types::{AccountNumber, LedgerError};
use rust_decimal::Decimal;
use std::panic;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;

/// Cloneable, serialized access to a `Ledger`
///
/// Clones share the same underlying ledger.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger
    ///
    /// The lock is held for the whole closure, which makes any sequence of
    /// ledger calls inside it atomic with respect to other handles. Mutations
    /// save the snapshot synchronously, so the closure runs on tokio's
    /// blocking pool rather than on an async worker.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from `f` on the calling task.
    pub async fn with_ledger<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Ledger) -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut ledger = Arc::clone(&self.inner).lock_owned().await;

        match task::spawn_blocking(move || f(&mut ledger)).await {
            Ok(value) => value,
            Err(e) => panic::resume_unwind(e.into_panic()),
        }
    }

    pub async fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AccountNumber, LedgerError> {
        let (name, email, phone, password) =
            (name.into(), email.into(), phone.into(), password.into());
        self.with_ledger(move |ledger| ledger.register(name, email, phone, password))
            .await
    }

    pub async fn deposit(
        &self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.with_ledger(move |ledger| ledger.deposit(number, amount))
            .await
    }

    pub async fn withdraw(
        &self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.with_ledger(move |ledger| ledger.withdraw(number, amount))
            .await
    }

    pub async fn transfer(
        &self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.with_ledger(move |ledger| ledger.transfer(from, to, amount))
            .await
    }

    pub async fn balance(&self, number: AccountNumber) -> Result<Decimal, LedgerError> {
        self.with_ledger(move |ledger| ledger.balance(number)).await
    }

    /// Recover the ledger once this is the last handle
    ///
    /// Returns the handle unchanged if other clones are still alive.
    pub fn into_inner(self) -> Result<Ledger, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{MemorySnapshot, SnapshotFile};
    use crate::types::TransactionKind;

    fn shared() -> SharedLedger {
        SharedLedger::new(Ledger::new(Box::new(MemorySnapshot::new()), 1001))
    }

    #[tokio::test]
    async fn test_operations_through_handle() {
        let handle = shared();

        let alice = handle.register("Alice", "", "", "a").await.unwrap();
        let bob = handle.register("Bob", "", "", "b").await.unwrap();
        handle.deposit(alice, Decimal::new(500, 0)).await.unwrap();
        handle.transfer(alice, bob, Decimal::new(200, 0)).await.unwrap();

        assert_eq!(handle.balance(alice).await.unwrap(), Decimal::new(300, 0));
        assert_eq!(handle.balance(bob).await.unwrap(), Decimal::new(200, 0));
        assert!(matches!(
            handle.withdraw(bob, Decimal::new(201, 0)).await,
            Err(LedgerError::InsufficientFunds { .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_transfers_preserve_invariants() {
        let handle = shared();
        let a = handle.register("A", "", "", "").await.unwrap();
        let b = handle.register("B", "", "", "").await.unwrap();
        handle.deposit(a, Decimal::new(100, 0)).await.unwrap();
        handle.deposit(b, Decimal::new(100, 0)).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..200 {
            let handle = handle.clone();
            let (from, to) = if i % 2 == 0 { (a, b) } else { (b, a) };
            tasks.push(tokio::spawn(async move {
                // Some of these fail for insufficient funds; that is expected
                let _ = handle.transfer(from, to, Decimal::new(7, 0)).await;
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let ledger = handle.into_inner().ok().unwrap();
        let balance_a = ledger.balance(a).unwrap();
        let balance_b = ledger.balance(b).unwrap();

        assert!(balance_a >= Decimal::ZERO);
        assert!(balance_b >= Decimal::ZERO);
        assert_eq!(balance_a + balance_b, Decimal::new(200, 0));

        // Each successful a -> b transfer left one record on each side
        let count = |number: AccountNumber, kind: TransactionKind| {
            ledger
                .transaction_history(number)
                .unwrap()
                .iter()
                .filter(|t| t.kind() == kind)
                .count()
        };
        assert_eq!(
            count(a, TransactionKind::Withdrawal),
            count(b, TransactionKind::Deposit) - 1
        );
    }

    #[tokio::test]
    async fn test_closures_run_off_the_async_thread() {
        let handle = shared();
        let async_thread = std::thread::current().id();

        let ledger_thread = handle
            .with_ledger(|_ledger| std::thread::current().id())
            .await;

        assert_ne!(ledger_thread, async_thread);
    }

    #[tokio::test]
    async fn test_file_backed_handle_saves_every_mutation() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("accounts.csv");
        let handle = SharedLedger::new(Ledger::new(Box::new(SnapshotFile::new(&path)), 1001));

        let alice = handle.register("Alice", "", "", "pw").await.unwrap();
        handle.deposit(alice, Decimal::new(40, 0)).await.unwrap();

        let reloaded = Ledger::try_load(Box::new(SnapshotFile::new(&path)), 1001).unwrap();
        assert_eq!(reloaded.balance(alice).unwrap(), Decimal::new(40, 0));
    }

    #[tokio::test]
    #[should_panic(expected = "closure failed")]
    async fn test_panic_in_closure_reaches_caller() {
        let handle = shared();
        handle
            .with_ledger::<_, ()>(|_ledger| panic!("closure failed"))
            .await;
    }

    #[tokio::test]
    async fn test_into_inner_fails_while_shared() {
        let handle = shared();
        let other = handle.clone();

        let handle = handle.into_inner().err().unwrap();
        drop(other);

        assert!(handle.into_inner().is_ok());
    }
}
