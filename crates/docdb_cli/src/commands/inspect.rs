//! Inspect command implementation.

use docdb_codec::decode_documents;
use docdb_storage::{FileBackend, StorageBackend};
use serde::Serialize;
use std::path::Path;

/// Data directory inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Data directory path.
    pub path: String,
    /// Total size of all collection files in bytes.
    pub total_size: u64,
    /// Total number of records across readable collections.
    pub total_records: usize,
    /// Per-collection statistics.
    pub collections: Vec<CollectionStats>,
}

/// Statistics for a single collection.
#[derive(Debug, Serialize)]
pub struct CollectionStats {
    /// Collection name.
    pub name: String,
    /// Number of records, or `None` if the file does not decode.
    pub record_count: Option<usize>,
    /// File size in bytes.
    pub file_size: u64,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(path)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => print_text(&result),
        other => return Err(format!("Unknown format: {other}").into()),
    }

    Ok(())
}

/// Collects statistics for every collection under `path`.
pub fn inspect(path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let backend = FileBackend::open(path)?;
    let mut result = InspectResult {
        path: path.display().to_string(),
        total_size: 0,
        total_records: 0,
        collections: Vec::new(),
    };

    for name in backend.list()? {
        let file_size = backend.size(&name)?.unwrap_or(0);
        let record_count = backend
            .read(&name)?
            .and_then(|bytes| decode_documents(&bytes).ok())
            .map(|records| records.len());

        result.total_size += file_size;
        result.total_records += record_count.unwrap_or(0);
        result.collections.push(CollectionStats {
            name,
            record_count,
            file_size,
        });
    }

    Ok(result)
}

fn print_text(result: &InspectResult) {
    println!("Data directory: {}", result.path);
    println!();
    println!("Collections: {}", result.collections.len());
    for stats in &result.collections {
        let count = stats
            .record_count
            .map_or_else(|| "corrupt".to_string(), |n| format!("{n} records"));
        println!("  {:<24} {:>14}  {:>10} bytes", stats.name, count, stats.file_size);
    }
    println!();
    println!("Total records: {}", result.total_records);
    println!("Total size:    {} bytes", result.total_size);
}
