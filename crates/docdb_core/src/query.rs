//! Fluent queries over a collection snapshot.

use crate::collection::Collection;
use crate::record::Record;
use docdb_codec::{Document, Value};
use std::cmp::Ordering;
use std::fmt;

/// Stands in for a missing field when sorting.
static MISSING: Value = Value::Null;

/// Direction of [`Query::order_by`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// `Descending` if `desc` is true, `Ascending` otherwise.
    #[must_use]
    pub const fn from_desc(desc: bool) -> Self {
        if desc {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// A filter / sort / limit chain over a snapshot of a collection.
///
/// The snapshot is copied from the collection when the query is created and
/// is narrowed, reordered and truncated in place by each chained call.
/// Nothing is ever written back. [`all`](Self::all) and
/// [`first`](Self::first) turn the remaining entries into [`Record`]
/// handles; they borrow the query, so chaining may continue afterwards on
/// the already reduced snapshot.
///
/// ```rust
/// use docdb_core::{Database, Document, SortOrder, Value};
///
/// let db = Database::open_in_memory();
/// let tasks = db.collection("tasks").unwrap();
/// for (title, priority) in [("a", 2), ("b", 1), ("c", 3)] {
///     tasks
///         .create(Document::from([("title", Value::from(title)), ("priority", Value::from(priority))]))
///         .unwrap();
/// }
///
/// let top = tasks
///     .find()
///     .order_by("priority", SortOrder::Descending)
///     .limit(1)
///     .first()
///     .unwrap();
/// assert_eq!(top.get("title").unwrap().as_text(), Some("c"));
/// ```
pub struct Query {
    collection: Collection,
    snapshot: Vec<Document>,
}

impl Query {
    pub(crate) fn new(collection: Collection, snapshot: Vec<Document>) -> Self {
        Self {
            collection,
            snapshot,
        }
    }

    /// Keeps only entries whose `field` strictly equals `value`.
    ///
    /// Relative order is preserved. Entries lacking `field` are dropped.
    #[must_use]
    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.snapshot.retain(|doc| doc.get(field) == Some(&value));
        self
    }

    /// Sorts entries by `field`.
    ///
    /// The sort is stable: entries with equal values keep their relative
    /// order in both directions. Values are ordered by [`Value::compare`];
    /// a missing field sorts as null.
    #[must_use]
    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.snapshot.sort_by(|a, b| {
            let ord = compare_field(a, b, field);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        self
    }

    /// Keeps only the first `n` entries.
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.snapshot.truncate(n);
        self
    }

    /// Returns a handle for every remaining entry, in snapshot order.
    pub fn all(&self) -> Vec<Record> {
        self.snapshot
            .iter()
            .map(|fields| Record::new(self.collection.clone(), fields.clone()))
            .collect()
    }

    /// Returns a handle for the first remaining entry, if any.
    pub fn first(&self) -> Option<Record> {
        self.snapshot
            .first()
            .map(|fields| Record::new(self.collection.clone(), fields.clone()))
    }

    /// Returns the number of remaining entries.
    pub fn count(&self) -> usize {
        self.snapshot.len()
    }

    /// Consumes the query, returning the remaining field-sets.
    pub fn into_documents(self) -> Vec<Document> {
        self.snapshot
    }
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    a.get(field)
        .unwrap_or(&MISSING)
        .compare(b.get(field).unwrap_or(&MISSING))
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("collection", &self.collection.name())
            .field("remaining", &self.snapshot.len())
            .finish()
    }
}
