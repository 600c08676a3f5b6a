//! # docdb Codec
//!
//! Document values and on-disk encoding for docdb.
//!
//! This crate provides:
//! - [`Value`]: the tagged value type a record field can hold
//! - [`Document`]: a record's field-set
//! - [`encode_documents`] / [`decode_documents`]: the JSON array format of
//!   a collection file
//!
//! ## Usage
//!
//! ```
//! use docdb_codec::{decode_documents, encode_documents, Document, Value};
//!
//! let docs = vec![Document::from([("name", Value::from("Alice"))])];
//! let bytes = encode_documents(&docs, true).unwrap();
//!
//! let decoded = decode_documents(&bytes).unwrap();
//! assert_eq!(decoded, docs);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod json;
mod value;

pub use document::Document;
pub use error::{CodecError, CodecResult};
pub use json::{decode_documents, encode_documents};
pub use value::Value;
