//! Error types for docdb core.

use docdb_codec::CodecError;
use docdb_storage::StorageError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in docdb core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error. I/O failures surface here unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Encoding a collection failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The stored bytes of a collection are not a well-formed record sequence.
    ///
    /// The collection is not opened; fix or remove the file and retry.
    #[error("collection {collection:?} is corrupt: {message}")]
    CorruptData {
        /// The collection whose file failed to decode.
        collection: String,
        /// Description of the decoding failure.
        message: String,
    },

    /// A saved record no longer exists (only with `Config::strict_saves`).
    #[error("record {id} not found in collection {collection:?}")]
    RecordNotFound {
        /// The collection searched.
        collection: String,
        /// Display form of the record id.
        id: String,
    },

    /// A caller-supplied id is already taken (only with `Config::unique_ids`).
    #[error("duplicate id {id} in collection {collection:?}")]
    DuplicateId {
        /// The collection written to.
        collection: String,
        /// Display form of the record id.
        id: String,
    },
}

impl CoreError {
    /// Creates a corrupt data error.
    pub fn corrupt_data(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptData {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Creates a record not found error.
    pub fn record_not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a duplicate id error.
    pub fn duplicate_id(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Returns true if the underlying failure was an I/O error.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_io())
    }

    /// Returns true if this is a corrupt data error.
    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }
}
