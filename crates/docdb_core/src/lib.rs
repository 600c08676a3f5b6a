//! # docdb Core
//!
//! Embedded, file-backed document store for docdb.
//!
//! This crate provides:
//! - [`Database`]: storage bootstrap and a registry of collections by name
//! - [`Collection`]: the canonical in-memory record sequence of one name,
//!   rewritten to its `<name>.json` file after every mutation
//! - [`Record`]: a handle binding a field-set to its collection, with
//!   `save` and `delete`
//! - [`Query`]: `where_eq` / `order_by` / `limit` over a snapshot
//!
//! There are no indexes, transactions or cross-process locks: each
//! mutation rewrites the whole collection file, and the last writer wins.
//!
//! ## Example
//!
//! ```rust
//! use docdb_core::{Database, Document, SortOrder};
//!
//! let db = Database::open_in_memory();
//! let people = db.collection("people").unwrap();
//! for name in ["A", "B", "C"] {
//!     people.create(Document::from([("name", name)])).unwrap();
//! }
//!
//! let b = people.where_eq("name", "B").first().unwrap();
//! b.delete().unwrap();
//!
//! let names: Vec<String> = people
//!     .find()
//!     .order_by("name", SortOrder::Ascending)
//!     .all()
//!     .iter()
//!     .map(|r| r.get("name").unwrap().to_string())
//!     .collect();
//! assert_eq!(names, ["A", "C"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod database;
mod error;
mod id;
mod query;
mod record;
mod store;

pub use collection::Collection;
pub use config::{Config, DEFAULT_DIR};
pub use database::Database;
pub use error::{CoreError, CoreResult};
pub use id::{generate_id, is_generated_id};
pub use query::{Query, SortOrder};
pub use record::{Record, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};
pub use store::RecordStore;

pub use docdb_codec::{Document, Value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
