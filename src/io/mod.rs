//! I/O module
//!
//! Handles snapshot encoding and storage.
//!
//! # Components
//!
//! - `snapshot_format` - CSV snapshot format (row conversion, invariant checks)
//! - `snapshot_store` - File-backed and in-memory `SnapshotStore` implementations

pub mod snapshot_format;
pub mod snapshot_store;

pub use snapshot_format::{read_snapshot, write_snapshot, SnapshotRow};
pub use snapshot_store::{MemorySnapshot, SnapshotFile};
