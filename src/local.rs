//! Blob-store backend: each key maps 1:1 to a JSON-encoded record string.
//!
//! This is the shape of a browser `localStorage` binding — an opaque
//! key→string store the embedder provides. The platform binding itself is out
//! of scope here: implement [`BlobStore`] over whatever your host offers and
//! inject it at build time. [`MemoryBlobStore`] is the in-process reference
//! binding used by tests and demos.

use crate::backend::Backend;
use crate::error::Result;
use crate::merge::should_update;
use crate::record::Record;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Opaque key→string store the embedder binds to its platform.
///
/// Keys pass through unprefixed; blobs are the JSON encoding of the full
/// `{value, timestamp}` record.
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous blob.
    fn write(&self, key: &str, blob: &str) -> Result<()>;
}

/// In-process reference binding. Handy for tests; real embedders bind their
/// platform store instead.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.read().get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.blobs.write().insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}

/// Backend over an injected [`BlobStore`].
pub struct LocalBackend {
    store: Box<dyn BlobStore>,
}

impl LocalBackend {
    /// Wrap an embedder-provided blob store.
    #[must_use]
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        Self { store }
    }

    fn read_record(&self, key: &str) -> Result<Option<Record>> {
        match self.store.read(key)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }
}

impl Backend for LocalBackend {
    fn get(&self, key: &str) -> Result<Option<Record>> {
        self.read_record(key)
    }

    fn set(&self, key: &str, record: Record) -> Result<bool> {
        let existing = self.read_record(key)?.map(|r| r.timestamp);
        if should_update(existing, record.timestamp) {
            let blob = serde_json::to_string(&record)?;
            self.store.write(key, &blob)?;
            return Ok(true);
        }
        Ok(false)
    }
}
