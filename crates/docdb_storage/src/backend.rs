//! Storage backend trait definition.

use crate::error::{StorageError, StorageResult};

/// A whole-blob storage backend for docdb.
///
/// Backends map a collection name to a single opaque byte blob. docdb
/// serializes the full record sequence of a collection and hands it to
/// [`write`](Self::write) after every mutation; there is no append path.
///
/// # Invariants
///
/// - `read` returns exactly the bytes of the last successful `write`
/// - `read` returns `None` if nothing was ever written under that name
/// - `write` replaces the previous blob as a unit
/// - Operations on one name never affect any other name
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads the blob stored under `name`.
    ///
    /// Returns `Ok(None)` if no blob exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn read(&self, name: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the blob stored under `name` with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn write(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Lists the names of all stored blobs, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be produced.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Returns the size in bytes of the blob under `name`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an I/O error occurs.
    fn size(&self, name: &str) -> StorageResult<Option<u64>> {
        Ok(self.read(name)?.map(|data| data.len() as u64))
    }
}

/// Checks that `name` can be used as a collection name.
///
/// Names become file stems, so they must be non-empty and must not contain
/// path separators or be a relative path component.
///
/// # Errors
///
/// Returns [`StorageError::InvalidName`] describing the first problem found.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name is a relative path component"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(StorageError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
