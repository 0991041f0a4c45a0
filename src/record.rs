//! The stored unit: an opaque JSON value plus its logical timestamp.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// One stored entry.
///
/// Replaced wholesale on every accepted write — there is no partial mutation
/// and no delete in the record lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque payload. Anything `serde_json` can represent.
    pub value: Value,
    /// Logical clock used only for ordering comparisons. Defaults to
    /// wall-clock milliseconds at write time.
    pub timestamp: u64,
}

impl Record {
    /// Build a record with an explicit timestamp.
    #[must_use]
    pub fn new(value: Value, timestamp: u64) -> Self {
        Self { value, timestamp }
    }
}

/// Milliseconds since the Unix epoch — the default write timestamp.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
