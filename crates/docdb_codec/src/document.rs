//! Document field-sets.

use crate::error::{CodecError, CodecResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// A record's field-set: a mapping from field name to [`Value`].
///
/// Fields are kept sorted by name, so the encoded form of a document is
/// deterministic regardless of the order in which fields were set.
///
/// # Example
///
/// ```
/// use docdb_codec::{Document, Value};
///
/// let mut doc = Document::from([("name", Value::from("Alice"))]);
/// doc.insert("age", 30);
/// assert_eq!(doc.get("age"), Some(&Value::Integer(30)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(BTreeMap<String, Value>);

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a JSON object into a document.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NotAnObject`] if `json` is not an object.
    pub fn from_json(json: serde_json::Value) -> CodecResult<Self> {
        match Value::from(json) {
            Value::Map(doc) => Ok(doc),
            other => Err(CodecError::NotAnObject {
                found: other.type_name(),
            }),
        }
    }

    /// Returns the value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a mutable reference to the value of `field`, if present.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// Sets `field` to `value`, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Removes `field`, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Returns true if `field` is present (even if it holds null).
    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over fields in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterates over field names in order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.0.keys()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Document {
    fn from(fields: [(K, V); N]) -> Self {
        fields.into_iter().collect()
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_iterate_in_name_order() {
        let doc = Document::from([("zeta", 1), ("alpha", 2), ("mid", 3)]);
        let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn insert_returns_previous() {
        let mut doc = Document::new();
        assert_eq!(doc.insert("n", 1), None);
        assert_eq!(doc.insert("n", 2), Some(Value::from(1)));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn null_field_is_present() {
        let doc = Document::from([("gone", Value::Null)]);
        assert!(doc.contains_key("gone"));
        assert!(!doc.contains_key("never"));
    }

    #[test]
    fn from_json_requires_object() {
        let doc = Document::from_json(json!({"name": "A", "tags": ["x"]})).unwrap();
        assert_eq!(doc.get("name"), Some(&Value::from("A")));

        let err = Document::from_json(json!([1, 2])).unwrap_err();
        assert_eq!(err, CodecError::NotAnObject { found: "array" });
    }

    #[test]
    fn serializes_as_plain_object() {
        let doc = Document::from([("b", Value::from(true)), ("a", Value::Null)]);
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":null,"b":true}"#);
    }
}
