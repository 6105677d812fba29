//! Asynchronous access to the ledger
//!
//! - **SharedLedger**: cloneable handle that serializes every operation behind
//!   one store-wide lock, keeping balance and transfer invariants intact when
//!   several tasks use the ledger at once

pub mod shared_ledger;

pub use shared_ledger::SharedLedger;
