//! Compact command implementation.

use docdb_core::Database;
use std::path::Path;
use tracing::info;

/// Compaction statistics for one collection.
#[derive(Debug)]
pub struct CompactStats {
    /// Collection name.
    pub name: String,
    /// Number of records rewritten.
    pub records: usize,
}

/// Runs the compact command.
pub fn run(path: &Path, collection: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Compacting collections in {:?}", path);

    let db = super::open_existing(path)?;
    let stats = compact(&db, collection)?;

    for entry in &stats {
        println!("  {:<24} {} records", entry.name, entry.records);
    }
    println!("✓ Compacted {} collection(s)", stats.len());
    Ok(())
}

/// Re-persists one collection, or every stored collection.
pub fn compact(
    db: &Database,
    collection: Option<&str>,
) -> Result<Vec<CompactStats>, Box<dyn std::error::Error>> {
    let stored = db.stored_collections()?;
    let names = match collection {
        Some(name) if stored.iter().any(|s| s == name) => vec![name.to_string()],
        Some(name) => return Err(format!("Collection not found: {name}").into()),
        None => stored,
    };

    let mut stats = Vec::with_capacity(names.len());
    for name in names {
        let collection = db.collection(&name)?;
        collection.compact()?;
        stats.push(CompactStats {
            records: collection.len(),
            name,
        });
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdb_core::Config;
    use tempfile::tempdir;

    #[test]
    fn compact_rewrites_pretty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"[{"id":"a","name":"Ada"}]"#).unwrap();

        let db = Database::open(Config::default().dir(dir.path())).unwrap();
        let stats = compact(&db, None).unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].records, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"name\": \"Ada\""));
    }

    #[test]
    fn compact_stops_on_corrupt_collection() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[").unwrap();

        let db = Database::open(Config::default().dir(dir.path())).unwrap();
        assert!(compact(&db, Some("bad")).is_err());
        assert_eq!(std::fs::read_to_string(dir.path().join("bad.json")).unwrap(), "[");
    }

    #[test]
    fn compact_unknown_collection_creates_nothing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("users.json"), "[]").unwrap();

        let db = Database::open(Config::default().dir(dir.path())).unwrap();
        let err = compact(&db, Some("ghosts")).unwrap_err();

        assert!(err.to_string().contains("ghosts"));
        assert!(!dir.path().join("ghosts.json").exists());
        assert_eq!(db.stored_collections().unwrap(), vec!["users"]);
    }
}
