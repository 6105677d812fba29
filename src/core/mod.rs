//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Persistence seam (`SnapshotStore`)
//! - `ledger` - Account ownership, number allocation, balance operations, transfers
//! - `async` - Shared handle for concurrent callers

pub mod r#async;
pub mod ledger;
pub mod traits;

pub use ledger::Ledger;
pub use r#async::SharedLedger;
pub use traits::SnapshotStore;
