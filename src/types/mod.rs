//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and balance operations
//! - `transaction`: Transaction records and identifiers
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod transaction;

pub use account::Account;
pub use error::LedgerError;
pub use transaction::{AccountNumber, Transaction, TransactionKind};
