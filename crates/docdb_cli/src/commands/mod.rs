//! CLI command implementations.

pub mod compact;
pub mod dump;
pub mod inspect;
pub mod verify;

use docdb_core::{Config, CoreResult, Database};
use std::path::Path;

/// Opens the data directory without creating it.
pub fn open_existing(path: &Path) -> CoreResult<Database> {
    Database::open(Config::default().dir(path).create_if_missing(false))
}
