//! Core traits for ledger persistence
//!
//! The ledger never touches the filesystem directly; it reads and writes full
//! snapshots through a `SnapshotStore`. This keeps the durable file, in-memory
//! test buffers, and any future medium interchangeable.

use crate::types::{Account, LedgerError};

/// Trait for loading and saving complete ledger snapshots
///
/// Implementations must be `Send` so a ledger can be moved behind a shared handle.
pub trait SnapshotStore: Send {
    /// Read the full account set
    ///
    /// Returns `Ok(None)` when no snapshot has ever been written, which is
    /// distinct from a snapshot that holds zero accounts.
    fn load(&self) -> Result<Option<Vec<Account>>, LedgerError>;

    /// Overwrite the stored snapshot with `accounts`
    ///
    /// Accounts are supplied in ascending account-number order.
    fn save(&self, accounts: &[&Account]) -> Result<(), LedgerError>;

    /// Human-readable location for log messages
    fn describe(&self) -> String;
}
