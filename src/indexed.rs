//! Object-store backend: structured records in a named database.
//!
//! Mirrors an IndexedDB-style binding. The embedder implements
//! [`ObjectStoreDriver`] to open a versioned database and [`ObjectStore`] for
//! get/put against the single `"keyvalue"` store; records are stored as
//! structured data, not stringified. Open and transaction failures surface to
//! the caller and are never retried. There is no close — the handle lives as
//! long as the process.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::merge::should_update;
use crate::record::Record;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the single object store every database carries.
pub const OBJECT_STORE: &str = "keyvalue";

/// Schema version requested on open.
pub const DB_VERSION: u32 = 1;

/// Opens a named, versioned object database.
pub trait ObjectStoreDriver: Send + Sync {
    /// Open (creating if needed) the database `db_name` at `version`.
    fn open(&self, db_name: &str, version: u32) -> Result<Box<dyn ObjectStore>>;
}

/// One open object database.
pub trait ObjectStore: Send + Sync {
    /// Fetch the record under `key` from `store`.
    fn get(&self, store: &str, key: &str) -> Result<Option<Record>>;

    /// Put `record` under `key` in `store`, replacing any previous record.
    fn put(&self, store: &str, key: &str, record: Record) -> Result<()>;
}

// ---- reference driver --------------------------------------------------------

type Db = Arc<RwLock<HashMap<String, Record>>>;

/// Databases live in a process-wide registry keyed by name, so re-opening a
/// name reconnects to the same data — the same shape a browser database has.
static DATABASES: Lazy<RwLock<HashMap<String, Db>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// In-process reference driver. Real embedders bind their platform's object
/// database instead.
#[derive(Debug, Default)]
pub struct MemoryObjectDriver;

impl MemoryObjectDriver {
    /// Driver handle. Stateless; all data hangs off the process registry.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ObjectStoreDriver for MemoryObjectDriver {
    fn open(&self, db_name: &str, _version: u32) -> Result<Box<dyn ObjectStore>> {
        let db = DATABASES
            .write()
            .entry(db_name.to_owned())
            .or_default()
            .clone();
        Ok(Box::new(MemoryObjectStore { db }))
    }
}

struct MemoryObjectStore {
    db: Db,
}

impl ObjectStore for MemoryObjectStore {
    fn get(&self, store: &str, key: &str) -> Result<Option<Record>> {
        if store != OBJECT_STORE {
            return Err(Error::BackendIo(format!("no such object store: {store}")));
        }
        Ok(self.db.read().get(key).cloned())
    }

    fn put(&self, store: &str, key: &str, record: Record) -> Result<()> {
        if store != OBJECT_STORE {
            return Err(Error::BackendIo(format!("no such object store: {store}")));
        }
        self.db.write().insert(key.to_owned(), record);
        Ok(())
    }
}

// ---- backend -----------------------------------------------------------------

/// Backend over an opened object database.
pub struct IndexedBackend {
    db: Box<dyn ObjectStore>,
}

impl IndexedBackend {
    /// Open `db_name` through `driver`. Open failures propagate to the
    /// caller.
    pub fn open(driver: &dyn ObjectStoreDriver, db_name: &str) -> Result<Self> {
        let db = driver.open(db_name, DB_VERSION)?;
        Ok(Self { db })
    }
}

impl Backend for IndexedBackend {
    fn get(&self, key: &str) -> Result<Option<Record>> {
        self.db.get(OBJECT_STORE, key)
    }

    fn set(&self, key: &str, record: Record) -> Result<bool> {
        let existing = self.db.get(OBJECT_STORE, key)?.map(|r| r.timestamp);
        if should_update(existing, record.timestamp) {
            self.db.put(OBJECT_STORE, key, record)?;
            return Ok(true);
        }
        Ok(false)
    }
}
