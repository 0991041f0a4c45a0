//! In-memory backend over a pluggable map substrate.
//!
//! Implement [`MapStore`] to bring your own concurrent map; ShardMap (the
//! default), `RwLock<HashMap>`, and DashMap (feature-gated) are wired up
//! here. A backend either owns a fresh private map or attaches to a
//! process-wide *named* map — sharing is opt-in, never implicit.

use crate::backend::Backend;
use crate::error::Result;
use crate::merge::should_update;
use crate::record::Record;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use shardmap::ShardMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Map substrate for the in-memory backend.
///
/// Works with owned `Record`s so the backend stays uniform regardless of how
/// the map stores things internally. Maps that keep values behind an `Arc`
/// (like ShardMap) clone on read — cheap for small records.
pub trait MapStore: Send + Sync {
    /// Look up the record for `key`.
    fn get(&self, key: &str) -> Option<Record>;

    /// Store `record` under `key`, returning the previous record if any.
    fn insert(&self, key: String, record: Record) -> Option<Record>;
}

// ---- ShardMap ----------------------------------------------------------------

impl MapStore for ShardMap<String, Record> {
    fn get(&self, key: &str) -> Option<Record> {
        self.get(&key.to_owned()).map(|arc| (*arc).clone())
    }

    fn insert(&self, key: String, record: Record) -> Option<Record> {
        self.insert(key, record).map(|arc| (*arc).clone())
    }
}

// ---- RwLock<HashMap> ---------------------------------------------------------

impl MapStore for RwLock<HashMap<String, Record>> {
    fn get(&self, key: &str) -> Option<Record> {
        self.read().get(key).cloned()
    }

    fn insert(&self, key: String, record: Record) -> Option<Record> {
        self.write().insert(key, record)
    }
}

// ---- DashMap (feature-gated) -------------------------------------------------

#[cfg(feature = "dashmap")]
impl MapStore for dashmap::DashMap<String, Record> {
    fn get(&self, key: &str) -> Option<Record> {
        self.get(key).map(|r| r.value().clone())
    }

    fn insert(&self, key: String, record: Record) -> Option<Record> {
        self.insert(key, record)
    }
}

// ---- backend -----------------------------------------------------------------

/// Registry of named shared maps. Two stores opened with the same name
/// observe the same entries; private maps never touch this.
static SHARED_MAPS: Lazy<RwLock<HashMap<String, Arc<ShardMap<String, Record>>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Volatile in-process backend.
pub struct MemoryBackend {
    map: Arc<dyn MapStore>,
}

impl MemoryBackend {
    /// Fresh private map (ShardMap), owned by this backend alone.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: Arc::new(ShardMap::default()),
        }
    }

    /// Run on a caller-owned map substrate.
    #[must_use]
    pub fn with_map(map: Arc<dyn MapStore>) -> Self {
        Self { map }
    }

    /// Attach to the process-wide shared map registered under `name`,
    /// creating it on first use.
    #[must_use]
    pub fn shared(name: &str) -> Self {
        let mut registry = SHARED_MAPS.write();
        let map = registry
            .entry(name.to_owned())
            .or_insert_with(|| Arc::new(ShardMap::default()))
            .clone();
        Self { map }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Record>> {
        Ok(self.map.get(key))
    }

    // Get-then-insert: a concurrent writer can slip in between the read and
    // the write. Fine for single-writer setups; callers that need more
    // serialize their own writes.
    fn set(&self, key: &str, record: Record) -> Result<bool> {
        let existing = self.map.get(key).map(|r| r.timestamp);
        if should_update(existing, record.timestamp) {
            self.map.insert(key.to_owned(), record);
            return Ok(true);
        }
        Ok(false)
    }
}
