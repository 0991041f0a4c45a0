//! The storage facade: backend selection, builder, and the get/set API.

use crate::backend::BackendKind;
use crate::error::{Error, Result};
use crate::file::FileBackend;
use crate::indexed::{IndexedBackend, MemoryObjectDriver, ObjectStoreDriver};
use crate::local::{BlobStore, LocalBackend, MemoryBlobStore};
use crate::memory::{MapStore, MemoryBackend};
use crate::record::{now_millis, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Database name used by the object-store backend when none is configured.
pub const DEFAULT_DB_NAME: &str = "ep-store";

/// The four backend variants a store can run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Volatile in-process map.
    Memory,
    /// Embedder-bound key→string blob store.
    Local,
    /// Embedder-bound structured object store.
    #[serde(rename = "idb")]
    Indexed,
    /// Single on-disk JSON document.
    File,
}

impl StorageType {
    /// Default variant for a platform: GUI hosts get the blob store,
    /// headless hosts the file document.
    #[must_use]
    pub fn default_for(platform: Platform) -> Self {
        match platform {
            Platform::Gui => StorageType::Local,
            Platform::Headless => StorageType::File,
        }
    }
}

impl FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(StorageType::Memory),
            "local" => Ok(StorageType::Local),
            "idb" => Ok(StorageType::Indexed),
            "file" => Ok(StorageType::File),
            other => Err(Error::UnsupportedBackend(other.to_owned())),
        }
    }
}

/// Capability descriptor resolved by the embedding application.
///
/// Replaces in-library environment sniffing: the embedder says what kind of
/// host it is, and the builder picks the default backend from that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    /// Interactive GUI host (browser-like). Defaults to the blob store.
    Gui,
    /// Headless process. Defaults to the file document.
    #[default]
    Headless,
}

/// Uniform get/set over one backend chosen at build time.
///
/// ```rust
/// use ep_store::{Storage, StorageType};
///
/// let db = Storage::open(StorageType::Memory)?;
/// db.set("greeting", "hello")?;
/// assert_eq!(db.get("greeting")?, Some("hello".into()));
/// # Ok::<(), ep_store::Error>(())
/// ```
pub struct Storage {
    backend: BackendKind,
    storage_type: StorageType,
    db_name: String,
}

impl Storage {
    /// Start configuring a store. Call [`build`](StorageBuilder::build) when
    /// ready.
    #[must_use]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Open a store on `storage_type` with defaults. Shorthand for
    /// `builder().storage_type(t).build()`.
    pub fn open(storage_type: StorageType) -> Result<Storage> {
        Self::builder().storage_type(storage_type).build()
    }

    /// Value stored under `key`, or `None` when no record exists — including
    /// when the backend itself signals absence.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.backend.as_backend().get(key)?.map(|r| r.value))
    }

    /// Full record under `key`: value plus timestamp.
    pub fn get_record(&self, key: &str) -> Result<Option<Record>> {
        self.backend.as_backend().get(key)
    }

    /// Write `value` under `key`, timestamped with the current wall clock.
    /// Returns whether the last-write-wins rule accepted the write.
    pub fn set(&self, key: &str, value: impl Serialize) -> Result<bool> {
        self.set_at(key, value, now_millis())
    }

    /// Write with an explicit logical timestamp. The backend re-reads the
    /// existing record and lands the write only if `timestamp` is strictly
    /// newer, or the key has never been written.
    pub fn set_at(&self, key: &str, value: impl Serialize, timestamp: u64) -> Result<bool> {
        let value = serde_json::to_value(value)?;
        self.backend
            .as_backend()
            .set(key, Record::new(value, timestamp))
    }

    /// The variant this store was built on.
    #[must_use]
    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    /// Configured database name (object-store backend only).
    #[must_use]
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("storage_type", &self.storage_type)
            .field("db_name", &self.db_name)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and builds a [`Storage`].
///
/// Exactly one backend is selected and initialized; an unknown type name
/// fails before any backend state is touched.
///
/// ```rust,no_run
/// use ep_store::{Storage, StorageType};
///
/// let db = Storage::builder()
///     .storage_type(StorageType::Indexed)
///     .db_name("app-cache")
///     .build()?;
/// # Ok::<(), ep_store::Error>(())
/// ```
pub struct StorageBuilder {
    storage_type: Option<StorageType>,
    storage_type_name: Option<String>,
    db_name: String,
    platform: Platform,
    path: Option<PathBuf>,
    map: Option<Arc<dyn MapStore>>,
    shared_map: Option<String>,
    blob_store: Option<Box<dyn BlobStore>>,
    driver: Option<Box<dyn ObjectStoreDriver>>,
}

impl StorageBuilder {
    fn new() -> Self {
        Self {
            storage_type: None,
            storage_type_name: None,
            db_name: DEFAULT_DB_NAME.to_owned(),
            platform: Platform::default(),
            path: None,
            map: None,
            shared_map: None,
            blob_store: None,
            driver: None,
        }
    }

    /// Select a backend variant.
    #[must_use]
    pub fn storage_type(mut self, storage_type: StorageType) -> Self {
        self.storage_type = Some(storage_type);
        self
    }

    /// Select a backend variant by its wire name (`memory`, `local`, `idb`,
    /// `file`). Unknown names fail at [`build`](Self::build) with
    /// [`Error::UnsupportedBackend`].
    #[must_use]
    pub fn storage_type_name(mut self, name: impl Into<String>) -> Self {
        self.storage_type_name = Some(name.into());
        self
    }

    /// Database name for the object-store backend (default `"ep-store"`).
    #[must_use]
    pub fn db_name(mut self, name: impl Into<String>) -> Self {
        self.db_name = name.into();
        self
    }

    /// Platform descriptor consulted when no explicit storage type is set.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Document path for the file backend (default `./ep-store.json`).
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Inject a map substrate for the memory backend.
    #[must_use]
    pub fn map(mut self, map: Arc<dyn MapStore>) -> Self {
        self.map = Some(map);
        self
    }

    /// Attach the memory backend to the process-wide shared map `name`
    /// instead of a fresh private map.
    #[must_use]
    pub fn shared_map(mut self, name: impl Into<String>) -> Self {
        self.shared_map = Some(name.into());
        self
    }

    /// Inject the blob-store binding for the local backend (default: the
    /// in-process reference store).
    #[must_use]
    pub fn blob_store(mut self, store: Box<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    /// Inject the object-store driver for the indexed backend (default: the
    /// in-process reference driver).
    #[must_use]
    pub fn driver(mut self, driver: Box<dyn ObjectStoreDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Resolve the backend variant and initialize it.
    pub fn build(self) -> Result<Storage> {
        let storage_type = match (self.storage_type, &self.storage_type_name) {
            (Some(t), _) => t,
            (None, Some(name)) => name.parse()?,
            (None, None) => StorageType::default_for(self.platform),
        };

        let backend = match storage_type {
            StorageType::Memory => {
                let backend = if let Some(map) = self.map {
                    MemoryBackend::with_map(map)
                } else if let Some(name) = self.shared_map {
                    MemoryBackend::shared(&name)
                } else {
                    MemoryBackend::new()
                };
                BackendKind::Memory(backend)
            }
            StorageType::Local => {
                let store = self
                    .blob_store
                    .unwrap_or_else(|| Box::new(MemoryBlobStore::new()));
                BackendKind::Local(LocalBackend::new(store))
            }
            StorageType::Indexed => {
                let driver = self
                    .driver
                    .unwrap_or_else(|| Box::new(MemoryObjectDriver::new()));
                BackendKind::Indexed(IndexedBackend::open(driver.as_ref(), &self.db_name)?)
            }
            StorageType::File => {
                let backend = match self.path {
                    Some(p) => FileBackend::at(p),
                    None => FileBackend::new(),
                };
                BackendKind::File(backend)
            }
        };

        Ok(Storage {
            backend,
            storage_type,
            db_name: self.db_name,
        })
    }
}

impl std::fmt::Debug for StorageBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBuilder")
            .field("storage_type", &self.storage_type)
            .field("storage_type_name", &self.storage_type_name)
            .field("db_name", &self.db_name)
            .field("platform", &self.platform)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
