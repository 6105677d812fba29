//! Personal Ledger Library
//! # Overview
//!
//! This library provides a small personal banking ledger: customers register
//! accounts, log in, move money, and review their history. The full account
//! set is persisted to a CSV snapshot after every committed change.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Runtime configuration for opening a ledger
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account ownership, number allocation and transfers
//!   - [`core::traits`] - The `SnapshotStore` persistence seam
//!   - [`core::async`] - A `SharedLedger` handle for concurrent callers
//! - [`io`] - Snapshot encoding and snapshot stores (file and in-memory)
//! - [`shell`] - The interactive menu front end
//! - [`logging`] - Tracing subscriber set-up
//!
//! # Transaction Types
//!
//! Every balance change is recorded on the affected account:
//!
//! - **Deposit**: Credit funds to an account
//! - **Withdrawal**: Debit funds from an account (requires sufficient balance)
//!
//! A transfer is recorded as a withdrawal on the sender and a deposit on the
//! recipient, and either both happen or neither does.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod logging;
pub mod shell;
pub mod types;

pub use config::LedgerConfig;
pub use crate::core::{Ledger, SharedLedger, SnapshotStore};
pub use io::{MemorySnapshot, SnapshotFile};
pub use shell::{Session, Shell};
pub use types::{Account, AccountNumber, LedgerError, Transaction, TransactionKind};
