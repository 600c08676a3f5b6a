//! In-memory storage backend for testing.

use crate::backend::{validate_name, StorageBackend};
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory storage backend.
///
/// This backend stores all blobs in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral databases that don't need persistence
///
/// # Example
///
/// ```rust
/// use docdb_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.write("users", b"[]").unwrap();
/// assert_eq!(backend.list().unwrap(), vec!["users".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with one blob.
    ///
    /// Useful for testing load and corruption scenarios.
    #[must_use]
    pub fn with_blob(name: &str, data: Vec<u8>) -> Self {
        let backend = Self::new();
        backend.blobs.write().insert(name.to_string(), data);
        backend
    }

    /// Returns a copy of the blob stored under `name`.
    #[must_use]
    pub fn blob(&self, name: &str) -> Option<Vec<u8>> {
        self.blobs.read().get(name).cloned()
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_name(name)?;
        Ok(self.blobs.read().get(name).cloned())
    }

    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        validate_name(name)?;
        self.blobs.write().insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.blobs.read().keys().cloned().collect())
    }
}
