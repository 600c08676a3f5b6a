//! Collections: the canonical in-memory record sequence of one name.

use crate::error::{CoreError, CoreResult};
use crate::id::{generate_id, Clock};
use crate::query::Query;
use crate::record::{Record, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};
use crate::store::RecordStore;
use docdb_codec::{Document, Value};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Behaviour switches a collection inherits from its database's `Config`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CollectionOptions {
    pub(crate) strict_saves: bool,
    pub(crate) unique_ids: bool,
}

/// A named, file-backed, ordered set of records.
///
/// `Collection` is a cheap handle: clones share the same canonical record
/// sequence. That sequence is the sole authority; the stored file is a
/// mirror rewritten in full, synchronously, after every mutation
/// (`create`, `Record::save`, `Record::delete`, `clear`, `compact`).
///
/// If a persist fails, the in-memory change has already been applied and
/// the error is returned to the caller.
///
/// # Example
///
/// ```rust
/// use docdb_core::{Database, Document, SortOrder};
///
/// let db = Database::open_in_memory();
/// let users = db.collection("users").unwrap();
///
/// users.create(Document::from([("name", "Alice")])).unwrap();
/// users.create(Document::from([("name", "Bob")])).unwrap();
///
/// let names: Vec<_> = users
///     .find()
///     .order_by("name", SortOrder::Descending)
///     .all()
///     .into_iter()
///     .map(|r| r.get("name").unwrap().to_string())
///     .collect();
/// assert_eq!(names, ["Bob", "Alice"]);
/// ```
#[derive(Clone)]
pub struct Collection {
    inner: Arc<CollectionInner>,
}

struct CollectionInner {
    name: String,
    store: RecordStore,
    records: RwLock<Vec<Document>>,
    clock: Clock,
    options: CollectionOptions,
}

impl Collection {
    /// Opens collection `name`, loading whatever `store` holds for it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CorruptData`] or a storage error if loading fails.
    pub(crate) fn open(
        name: &str,
        store: RecordStore,
        options: CollectionOptions,
    ) -> CoreResult<Self> {
        let records = store.load(name)?;
        tracing::info!(collection = name, records = records.len(), "opened collection");

        Ok(Self {
            inner: Arc::new(CollectionInner {
                name: name.to_string(),
                store,
                records: RwLock::new(records),
                clock: Clock::new(),
                options,
            }),
        })
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.records.read().is_empty()
    }

    /// Returns the number of records. Same as [`len`](Self::len).
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Inserts a new record and persists the collection.
    ///
    /// An `id` is generated unless `fields` already has a non-null one;
    /// caller-supplied ids are stored as-is. `createdAt` and `updatedAt`
    /// are set to the current time, replacing any supplied values.
    ///
    /// Duplicate ids are accepted unless the database was opened with
    /// `Config::unique_ids`, in which case nothing is written and
    /// [`CoreError::DuplicateId`] is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails (the record stays in memory).
    pub fn create(&self, fields: Document) -> CoreResult<Record> {
        let mut fields = fields;
        let mut records = self.inner.records.write();

        let supplied = fields.get(ID_FIELD).filter(|id| !id.is_null()).cloned();
        match supplied {
            None => {
                fields.insert(ID_FIELD, generate_id());
            }
            Some(id) if self.inner.options.unique_ids => {
                if records.iter().any(|r| r.get(ID_FIELD) == Some(&id)) {
                    return Err(CoreError::duplicate_id(self.name(), id.to_string()));
                }
            }
            Some(_) => {}
        }

        let now = self.inner.clock.tick();
        fields.insert(CREATED_AT_FIELD, now);
        fields.insert(UPDATED_AT_FIELD, now);

        records.push(fields.clone());
        self.inner.store.save(&self.inner.name, &records)?;

        Ok(Record::new(self.clone(), fields))
    }

    /// Starts a query over a snapshot of every record.
    ///
    /// Later changes to the collection are not visible to the query.
    pub fn find(&self) -> Query {
        Query::new(self.clone(), self.snapshot())
    }

    /// Starts a query over the records whose `field` strictly equals `value`.
    ///
    /// Records lacking `field` never match, not even a `Value::Null`.
    pub fn where_eq(&self, field: &str, value: impl Into<Value>) -> Query {
        let value = value.into();
        let matching = self
            .inner
            .records
            .read()
            .iter()
            .filter(|r| r.get(field) == Some(&value))
            .cloned()
            .collect();
        Query::new(self.clone(), matching)
    }

    /// Returns a handle for every record, in insertion order.
    pub fn all(&self) -> Vec<Record> {
        self.snapshot()
            .into_iter()
            .map(|fields| Record::new(self.clone(), fields))
            .collect()
    }

    /// Returns a handle for the first record whose id equals `id`.
    pub fn get(&self, id: impl Into<Value>) -> Option<Record> {
        let id = id.into();
        let fields = self
            .inner
            .records
            .read()
            .iter()
            .find(|r| r.get(ID_FIELD) == Some(&id))
            .cloned()?;
        Some(Record::new(self.clone(), fields))
    }

    /// Returns a copy of every stored field-set, in insertion order.
    pub fn documents(&self) -> Vec<Document> {
        self.snapshot()
    }

    /// Removes every record and persists the empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails (memory is already cleared).
    pub fn clear(&self) -> CoreResult<()> {
        let mut records = self.inner.records.write();
        let removed = records.len();
        records.clear();
        tracing::debug!(collection = %self.inner.name, removed, "cleared collection");
        self.inner.store.save(&self.inner.name, &records)
    }

    /// Rewrites the stored file from the in-memory records.
    ///
    /// Record contents and order are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn compact(&self) -> CoreResult<()> {
        let records = self.inner.records.write();
        self.inner.store.save(&self.inner.name, &records)
    }

    /// Writes `fields` over the canonical record with the same id.
    ///
    /// If no record matches, `fields` is appended, or with `strict_saves`
    /// [`CoreError::RecordNotFound`] is returned without touching anything.
    pub(crate) fn save_record(&self, fields: &Document) -> CoreResult<()> {
        let mut records = self.inner.records.write();
        let id = fields.get(ID_FIELD);
        let position = id.and_then(|id| records.iter().position(|r| r.get(ID_FIELD) == Some(id)));

        match position {
            Some(index) => records[index] = fields.clone(),
            None if self.inner.options.strict_saves => {
                let id = id.map_or_else(|| "<none>".to_string(), Value::to_string);
                return Err(CoreError::record_not_found(self.name(), id));
            }
            None => {
                tracing::warn!(
                    collection = %self.inner.name,
                    id = ?id,
                    "saved record was not in the collection, appending it"
                );
                records.push(fields.clone());
            }
        }

        self.inner.store.save(&self.inner.name, &records)
    }

    /// Removes every canonical record whose id equals `id`.
    ///
    /// The collection is persisted even if nothing matched.
    pub(crate) fn delete_record(&self, id: Option<&Value>) -> CoreResult<usize> {
        let mut records = self.inner.records.write();
        let before = records.len();
        if let Some(id) = id {
            records.retain(|r| r.get(ID_FIELD) != Some(id));
        }
        let removed = before - records.len();

        self.inner.store.save(&self.inner.name, &records)?;
        Ok(removed)
    }

    pub(crate) fn tick(&self) -> i64 {
        self.inner.clock.tick()
    }

    fn snapshot(&self) -> Vec<Document> {
        self.inner.records.read().clone()
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.inner.name)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
