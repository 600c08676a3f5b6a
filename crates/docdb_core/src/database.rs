//! Database handle: storage bootstrap and the collection registry.

use crate::collection::{Collection, CollectionOptions};
use crate::config::Config;
use crate::error::CoreResult;
use crate::store::RecordStore;
use docdb_storage::{FileBackend, InMemoryBackend, StorageBackend};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// The main database handle.
///
/// `Database` owns the storage backend and a registry holding exactly one
/// [`Collection`] per name. Collections are opened lazily on first use and
/// stay cached for the lifetime of the handle; there is no way to evict
/// one. Construct a single `Database` at the top of the program and pass it
/// (or the collections it hands out) to whatever needs them.
///
/// # Opening a Database
///
/// ```rust,no_run
/// use docdb_core::{Config, Database, Document};
///
/// let db = Database::open(Config::default().dir("my_data"))?;
/// let users = db.collection("users")?;
/// users.create(Document::from([("name", "Alice")]))?;
/// # Ok::<(), docdb_core::CoreError>(())
/// ```
///
/// # In-Memory Databases
///
/// For testing, use `Database::open_in_memory()`:
///
/// ```rust
/// let db = docdb_core::Database::open_in_memory();
/// assert!(db.collection("scratch").unwrap().is_empty());
/// ```
pub struct Database {
    /// Configuration.
    config: Config,
    /// Record store shared by every collection.
    store: RecordStore,
    /// Opened collections by name.
    collections: RwLock<HashMap<String, Collection>>,
}

impl Database {
    /// Opens a database rooted at `config.dir`.
    ///
    /// The directory is created if missing, unless `create_if_missing` is
    /// false. Collection files are not read until each collection is first
    /// requested.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory cannot be created or does
    /// not exist and `create_if_missing` is false.
    pub fn open(config: Config) -> CoreResult<Self> {
        let backend = if config.create_if_missing {
            FileBackend::open_with_create_dirs(&config.dir)?
        } else {
            FileBackend::open(&config.dir)?
        };
        tracing::debug!(dir = %config.dir.display(), "opened database directory");
        Ok(Self::open_with_backend(config, Arc::new(backend)))
    }

    /// Opens a database over an explicit backend.
    ///
    /// `config.dir` and `config.create_if_missing` are ignored.
    pub fn open_with_backend(config: Config, backend: Arc<dyn StorageBackend>) -> Self {
        let store = RecordStore::new(backend, config.pretty);
        Self {
            config,
            store,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a fresh in-memory database for testing.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::open_in_memory_with_config(Config::default())
    }

    /// Opens a fresh in-memory database with custom behaviour switches.
    #[must_use]
    pub fn open_in_memory_with_config(config: Config) -> Self {
        Self::open_with_backend(config, Arc::new(InMemoryBackend::new()))
    }

    /// Returns the collection called `name`, opening it on first use.
    ///
    /// The first call loads the collection's stored records; later calls
    /// return the cached collection. A collection that fails to load is not
    /// cached, so a later call retries the load.
    ///
    /// # Errors
    ///
    /// - [`CoreError::CorruptData`](crate::CoreError::CorruptData) if the
    ///   stored records cannot be decoded
    /// - a storage error for invalid names or failed reads
    pub fn collection(&self, name: &str) -> CoreResult<Collection> {
        if let Some(collection) = self.collections.read().get(name) {
            return Ok(collection.clone());
        }

        let mut collections = self.collections.write();
        if let Some(collection) = collections.get(name) {
            return Ok(collection.clone());
        }

        let collection = Collection::open(name, self.store.clone(), self.collection_options())?;
        collections.insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    /// Returns the names of the collections opened so far, sorted.
    #[must_use]
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the names of all collections present in storage, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot list its contents.
    pub fn stored_collections(&self) -> CoreResult<Vec<String>> {
        Ok(self.store.backend().list()?)
    }

    /// Returns database configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the configured storage directory.
    ///
    /// Backends other than the file backend do not use it.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.dir
    }

    fn collection_options(&self) -> CollectionOptions {
        CollectionOptions {
            strict_saves: self.config.strict_saves,
            unique_ids: self.config.unique_ids,
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("dir", &self.config.dir)
            .field("collections", &self.collection_names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use docdb_codec::{Document, Value};
    use tempfile::tempdir;

    #[test]
    fn collection_is_cached() {
        let db = Database::open_in_memory();
        let first = db.collection("users").unwrap();
        first.create(Document::from([("name", "A")])).unwrap();

        let second = db.collection("users").unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(db.collection_names(), vec!["users"]);
    }

    #[test]
    fn collections_are_separate() {
        let db = Database::open_in_memory();
        db.collection("a").unwrap().create(Document::new()).unwrap();
        assert!(db.collection("b").unwrap().is_empty());
        assert_eq!(db.collection_names(), vec!["a", "b"]);
    }

    #[test]
    fn open_creates_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("db");

        let db = Database::open(Config::default().dir(&root)).unwrap();
        assert!(root.is_dir());
        assert!(db.stored_collections().unwrap().is_empty());
    }

    #[test]
    fn open_without_create_requires_directory() {
        let dir = tempdir().unwrap();
        let config = Config::default()
            .dir(dir.path().join("missing"))
            .create_if_missing(false);

        let err = Database::open(config).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn collection_file_layout() {
        let dir = tempdir().unwrap();
        let db = Database::open(Config::default().dir(dir.path())).unwrap();

        db.collection("users")
            .unwrap()
            .create(Document::from([("name", "A")]))
            .unwrap();

        assert!(dir.path().join("users.json").is_file());
        assert_eq!(db.stored_collections().unwrap(), vec!["users"]);
    }

    #[test]
    fn corrupt_collection_is_not_cached() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("users.json"), b"[{\"broken\": ").unwrap();
        let db = Database::open(Config::default().dir(dir.path())).unwrap();

        let err = db.collection("users").unwrap_err();
        assert!(err.is_corrupt());
        assert!(db.collection_names().is_empty());

        std::fs::write(dir.path().join("users.json"), b"[{\"name\": \"A\"}]").unwrap();
        let users = db.collection("users").unwrap();
        assert_eq!(users.all()[0].get("name"), Some(&Value::from("A")));
    }

    #[test]
    fn empty_file_is_empty_collection() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("users.json"), b"").unwrap();
        let db = Database::open(Config::default().dir(dir.path())).unwrap();

        assert!(db.collection("users").unwrap().is_empty());
    }

    #[test]
    fn invalid_collection_name() {
        let db = Database::open_in_memory();
        let err = db.collection("../etc").unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
