//! Record store: whole-collection load and save.

use crate::error::{CoreError, CoreResult};
use docdb_codec::{decode_documents, encode_documents, Document};
use docdb_storage::StorageBackend;
use std::fmt;
use std::sync::Arc;

/// Reads and writes the full record sequence of a collection.
///
/// The store is the only component that touches the storage backend. It
/// pairs a [`StorageBackend`] with the JSON codec and knows nothing about
/// queries or record handles.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    pretty: bool,
}

impl RecordStore {
    /// Creates a store over `backend`.
    ///
    /// With `pretty` set, collections are written as indented JSON.
    pub fn new(backend: Arc<dyn StorageBackend>, pretty: bool) -> Self {
        Self { backend, pretty }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Loads every record of collection `name`.
    ///
    /// A missing or empty blob is an empty collection.
    ///
    /// # Errors
    ///
    /// - [`CoreError::CorruptData`] if the stored bytes do not decode
    /// - [`CoreError::Storage`] if the backend read fails
    pub fn load(&self, name: &str) -> CoreResult<Vec<Document>> {
        let Some(bytes) = self.backend.read(name)? else {
            return Ok(Vec::new());
        };

        decode_documents(&bytes).map_err(|e| {
            tracing::warn!(collection = name, error = %e, "collection data is corrupt");
            CoreError::corrupt_data(name, e.to_string())
        })
    }

    /// Replaces the stored records of collection `name` with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save(&self, name: &str, records: &[Document]) -> CoreResult<()> {
        let bytes = encode_documents(records, self.pretty)?;
        self.backend.write(name, &bytes)?;
        tracing::debug!(
            collection = name,
            records = records.len(),
            bytes = bytes.len(),
            "persisted collection"
        );
        Ok(())
    }
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("pretty", &self.pretty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdb_codec::Value;
    use docdb_storage::{FileBackend, InMemoryBackend};
    use tempfile::tempdir;

    fn memory_store() -> (Arc<InMemoryBackend>, RecordStore) {
        let backend = Arc::new(InMemoryBackend::new());
        let store = RecordStore::new(backend.clone(), true);
        (backend, store)
    }

    #[test]
    fn missing_collection_loads_empty() {
        let (_, store) = memory_store();
        assert!(store.load("users").unwrap().is_empty());
    }

    #[test]
    fn empty_blob_loads_empty() {
        let backend = Arc::new(InMemoryBackend::with_blob("users", Vec::new()));
        let store = RecordStore::new(backend, true);
        assert!(store.load("users").unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let (_, store) = memory_store();
        let records = vec![
            Document::from([("id", Value::from("1")), ("name", Value::from("A"))]),
            Document::from([("id", Value::from("2")), ("name", Value::from("B"))]),
        ];

        store.save("users", &records).unwrap();
        assert_eq!(store.load("users").unwrap(), records);
    }

    #[test]
    fn saves_indented_json() {
        let (backend, store) = memory_store();
        store
            .save("users", &[Document::from([("name", "A")])])
            .unwrap();

        let text = String::from_utf8(backend.blob("users").unwrap()).unwrap();
        assert_eq!(text, "[\n  {\n    \"name\": \"A\"\n  }\n]");
    }

    #[test]
    fn corrupt_blob_is_reported() {
        let backend = Arc::new(InMemoryBackend::with_blob("users", b"[{".to_vec()));
        let store = RecordStore::new(backend, true);

        let err = store.load("users").unwrap_err();
        assert!(matches!(err, CoreError::CorruptData { ref collection, .. } if collection == "users"));
    }

    #[test]
    fn collections_do_not_share_files() {
        let dir = tempdir().unwrap();
        let backend = Arc::new(FileBackend::open(dir.path()).unwrap());
        let store = RecordStore::new(backend, true);

        store.save("a", &[Document::from([("n", 1)])]).unwrap();
        assert!(store.load("b").unwrap().is_empty());
        assert!(dir.path().join("a.json").exists());
        assert!(!dir.path().join("b.json").exists());
    }
}
