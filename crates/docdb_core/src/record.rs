//! Record handles.

use crate::collection::Collection;
use crate::error::{CoreError, CoreResult};
use docdb_codec::{Document, Value};
use std::fmt;

/// Field holding the record identifier.
pub const ID_FIELD: &str = "id";
/// Field holding the creation stamp (Unix milliseconds).
pub const CREATED_AT_FIELD: &str = "createdAt";
/// Field holding the last-save stamp (Unix milliseconds).
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// A live, mutable view of one record, bound to its collection.
///
/// Each handle owns its own copy of the field-set, taken when the handle
/// was made. Edits through [`set`](Self::set) stay local until
/// [`save`](Self::save) writes them over the collection's record with the
/// same id. Two handles for one id do not see each other's unsaved edits.
#[derive(Clone)]
pub struct Record {
    collection: Collection,
    fields: Document,
}

impl Record {
    pub(crate) fn new(collection: Collection, fields: Document) -> Self {
        Self { collection, fields }
    }

    /// Returns the record id, if the record has one.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get(ID_FIELD)
    }

    /// Returns the creation stamp.
    pub fn created_at(&self) -> Option<i64> {
        self.fields.get(CREATED_AT_FIELD).and_then(Value::as_integer)
    }

    /// Returns the last-save stamp.
    pub fn updated_at(&self) -> Option<i64> {
        self.fields.get(UPDATED_AT_FIELD).and_then(Value::as_integer)
    }

    /// Returns the value of `field`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets `field` on this handle. Call [`save`](Self::save) to persist.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field, value);
        self
    }

    /// Removes `field` from this handle, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns the handle's field-set.
    pub fn fields(&self) -> &Document {
        &self.fields
    }

    /// Consumes the handle, returning its field-set.
    pub fn into_fields(self) -> Document {
        self.fields
    }

    /// Returns the name of the owning collection.
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Stamps `updatedAt` and writes this handle over the stored record.
    ///
    /// The stored record with the same id is replaced in place. If there is
    /// none (for example it was deleted through another handle), the record
    /// is appended again, unless the database uses `Config::strict_saves`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::RecordNotFound`](crate::CoreError::RecordNotFound) in
    ///   strict mode when the record is gone
    /// - a storage error if persisting fails
    ///
    /// A rejected save leaves the handle as it was. After a storage error
    /// the handle carries the new stamp, matching the collection's memory.
    pub fn save(&mut self) -> CoreResult<&mut Self> {
        let mut fields = self.fields.clone();
        fields.insert(UPDATED_AT_FIELD, self.collection.tick());
        let result = self.collection.save_record(&fields);
        if !matches!(result, Err(CoreError::RecordNotFound { .. })) {
            self.fields = fields;
        }
        result?;
        Ok(self)
    }

    /// Removes every stored record with this handle's id.
    ///
    /// Deleting a record that is already gone is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn delete(&self) -> CoreResult<()> {
        let removed = self.collection.delete_record(self.id())?;
        tracing::debug!(collection = %self.collection.name(), removed, "deleted record");
        Ok(())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("collection", &self.collection.name())
            .field("fields", &self.fields)
            .finish()
    }
}
