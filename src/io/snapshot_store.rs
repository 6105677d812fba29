//! Snapshot storage backends
//!
//! - `SnapshotFile` - durable CSV file, replaced atomically on every save
//! - `MemorySnapshot` - shared in-memory buffer using the same CSV encoding
//!
//! Both delegate format concerns to `snapshot_format`.

use crate::core::traits::SnapshotStore;
use crate::io::snapshot_format::{read_snapshot, write_snapshot};
use crate::types::{Account, LedgerError};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Snapshot kept in a single file on disk
///
/// Saves write a sibling temporary file and rename it over the target, so the
/// previous snapshot stays intact until the new one is complete.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for SnapshotFile {
    fn load(&self) -> Result<Option<Vec<Account>>, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LedgerError::IoError {
                    message: format!("Failed to open '{}': {}", self.path.display(), e),
                })
            }
        };

        let mut reader = BufReader::new(file);
        read_snapshot(&mut reader).map(Some)
    }

    fn save(&self, accounts: &[&Account]) -> Result<(), LedgerError> {
        let mut temp = NamedTempFile::new_in(self.directory())?;

        write_snapshot(accounts, &mut temp)?;
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| LedgerError::IoError {
            message: format!("Failed to replace '{}': {}", self.path.display(), e.error),
        })?;

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot kept in memory
///
/// Clones share one buffer, so a second ledger built from a clone sees what
/// the first one saved. `None` means nothing has been saved yet.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    buffer: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously encoded snapshot bytes
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        MemorySnapshot {
            buffer: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Copy of the encoded snapshot, if one was saved
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.buffer.lock().ok().and_then(|guard| guard.clone())
    }

    fn poisoned() -> LedgerError {
        LedgerError::IoError {
            message: "in-memory snapshot buffer is poisoned".to_string(),
        }
    }
}

impl SnapshotStore for MemorySnapshot {
    fn load(&self) -> Result<Option<Vec<Account>>, LedgerError> {
        let guard = self.buffer.lock().map_err(|_| Self::poisoned())?;

        match guard.as_ref() {
            Some(bytes) => read_snapshot(&mut bytes.as_slice()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, accounts: &[&Account]) -> Result<(), LedgerError> {
        let mut encoded = Vec::new();
        write_snapshot(accounts, &mut encoded)?;

        let mut guard = self.buffer.lock().map_err(|_| Self::poisoned())?;
        *guard = Some(encoded);

        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory snapshot".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::TempDir;

    fn funded(number: u32, amount: i64) -> Account {
        let mut account = Account::new(number, "Name", "mail", "phone", "pw");
        account.deposit(Decimal::new(amount, 0)).unwrap();
        account
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotFile::new(dir.path().join("absent.csv"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotFile::new(dir.path().join("accounts.csv"));
        let a = funded(1001, 10);
        let b = funded(1002, 20);

        store.save(&[&a, &b]).unwrap();

        assert_eq!(store.load().unwrap(), Some(vec![a, b]));
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotFile::new(dir.path().join("accounts.csv"));
        let a = funded(1001, 10);
        let b = funded(1002, 20);

        store.save(&[&a, &b]).unwrap();
        store.save(&[&b]).unwrap();

        assert_eq!(store.load().unwrap(), Some(vec![b]));
        // Only the snapshot itself remains; temporary files were renamed away
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotFile::new(dir.path().join("missing").join("accounts.csv"));

        let result = store.save(&[]);

        assert!(matches!(result, Err(LedgerError::IoError { .. })));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accounts.csv");
        fs::write(&path, "not,a,snapshot\n1,2,3\n").unwrap();

        let result = SnapshotFile::new(&path).load();

        assert!(result.unwrap_err().is_persistence());
    }

    #[test]
    fn test_memory_snapshot_is_shared_between_clones() {
        let store = MemorySnapshot::new();
        let other = store.clone();
        assert_eq!(other.load().unwrap(), None);

        let a = funded(1001, 5);
        store.save(&[&a]).unwrap();

        assert_eq!(other.load().unwrap(), Some(vec![a]));
        assert!(other.contents().is_some());
    }
}
