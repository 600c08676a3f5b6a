//! Record identifiers and timestamps.

use docdb_codec::Value;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Generates a new random record id.
///
/// Ids are version 4 UUIDs in their hyphenated text form, e.g.
/// `"67e55044-10b1-426f-9247-bb680e5fe0c8"`.
#[must_use]
pub fn generate_id() -> Value {
    Value::Text(Uuid::new_v4().to_string())
}

/// Returns true if `id` is text in the form produced by [`generate_id`].
#[must_use]
pub fn is_generated_id(id: &Value) -> bool {
    id.as_text()
        .and_then(|s| Uuid::parse_str(s).ok())
        .is_some_and(|uuid| uuid.get_version_num() == 4)
}

/// Milliseconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Source of `createdAt` / `updatedAt` stamps.
///
/// Stamps are Unix milliseconds and never go backwards for a given clock,
/// even if the wall clock does.
#[derive(Debug, Default)]
pub(crate) struct Clock {
    last: AtomicI64,
}

impl Clock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the next stamp.
    pub(crate) fn tick(&self) -> i64 {
        let now = now_millis();
        self.last.fetch_max(now, Ordering::SeqCst).max(now)
    }
}
