//! Dump command implementation.

use docdb_core::{Database, Document, SortOrder, Value};
use std::path::Path;

/// Query options for the dump command.
#[derive(Debug, Default)]
pub struct DumpOptions {
    /// Field and raw value to filter on.
    pub filter: Option<(String, String)>,
    /// Field to sort by.
    pub order_by: Option<String>,
    /// Sort descending.
    pub desc: bool,
    /// Maximum number of records.
    pub limit: Option<usize>,
}

/// Runs the dump command.
pub fn run(
    path: &Path,
    collection: &str,
    options: &DumpOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = super::open_existing(path)?;
    let records = dump(&db, collection, options)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Runs the query described by `options` against `collection`.
pub fn dump(
    db: &Database,
    collection: &str,
    options: &DumpOptions,
) -> Result<Vec<Document>, Box<dyn std::error::Error>> {
    let mut query = db.collection(collection)?.find();

    if let Some((field, raw)) = &options.filter {
        query = query.where_eq(field, parse_value(raw));
    }
    if let Some(field) = &options.order_by {
        query = query.order_by(field, SortOrder::from_desc(options.desc));
    }
    if let Some(n) = options.limit {
        query = query.limit(n);
    }

    Ok(query.into_documents())
}

/// Parses a command-line value as JSON, falling back to plain text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<serde_json::Value>(raw).map_or_else(|_| Value::from(raw), Value::from)
}
