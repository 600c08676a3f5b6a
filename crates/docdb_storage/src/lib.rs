//! # docdb Storage
//!
//! Storage backends for docdb.
//!
//! This crate is the lowest layer of docdb. A backend stores one **opaque
//! blob per collection name** and knows nothing about records, JSON or
//! queries. Every write replaces the whole blob.
//!
//! ## Design Principles
//!
//! - Backends are whole-blob stores (read, write, list)
//! - A backend never touches any blob other than the one it was asked for
//! - Must be `Send + Sync` so collections can share one backend
//! - docdb owns all format interpretation
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - One `<name>.json` file per collection in a directory
//!
//! ## Example
//!
//! ```rust
//! use docdb_storage::{StorageBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.write("users", b"[]").unwrap();
//! assert_eq!(backend.read("users").unwrap(), Some(b"[]".to_vec()));
//! assert_eq!(backend.read("posts").unwrap(), None);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::{validate_name, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use file::{FileBackend, FILE_EXTENSION};
pub use memory::InMemoryBackend;
