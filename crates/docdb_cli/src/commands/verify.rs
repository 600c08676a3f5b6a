//! Verify command implementation.

use docdb_codec::decode_documents;
use docdb_storage::{FileBackend, StorageBackend};
use std::path::Path;

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Number of collections checked.
    pub collections_checked: usize,
    /// Number of records decoded.
    pub records_checked: usize,
    /// Collections that failed to decode, with the reason.
    pub errors: Vec<(String, String)>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying data directory {:?}", path);
    println!();

    let result = verify(path)?;
    println!("  Collections checked: {}", result.collections_checked);
    println!("  Records checked:     {}", result.records_checked);
    for (name, error) in &result.errors {
        println!("  ✗ {name}: {error}");
    }

    println!();
    if result.is_ok() {
        println!("✓ Verification passed");
        Ok(())
    } else {
        println!("✗ Verification failed");
        Err("Verification failed".into())
    }
}

/// Decodes every collection file under `path`.
pub fn verify(path: &Path) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let backend = FileBackend::open(path)?;
    let mut result = VerifyResult::default();

    for name in backend.list()? {
        result.collections_checked += 1;
        let Some(bytes) = backend.read(&name)? else {
            continue;
        };
        match decode_documents(&bytes) {
            Ok(records) => result.records_checked += records.len(),
            Err(e) => {
                tracing::warn!(collection = %name, error = %e, "collection failed to decode");
                result.errors.push((name, e.to_string()));
            }
        }
    }

    Ok(result)
}
