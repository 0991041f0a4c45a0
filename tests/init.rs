use ep_store::indexed::{ObjectStore, ObjectStoreDriver};
use ep_store::local::BlobStore;
use ep_store::memory::MapStore;
use ep_store::{Error, Platform, Record, Result, Storage, StorageType};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

// ---- storage type selection -------------------------------------------------

#[test]
fn unknown_type_name_fails() {
    let err = Storage::builder()
        .storage_type_name("bogus")
        .build()
        .unwrap_err();
    assert_eq!(err, Error::UnsupportedBackend("bogus".into()));
}

#[test]
fn wire_tokens_parse() {
    assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::Memory);
    assert_eq!("local".parse::<StorageType>().unwrap(), StorageType::Local);
    assert_eq!("idb".parse::<StorageType>().unwrap(), StorageType::Indexed);
    assert_eq!("file".parse::<StorageType>().unwrap(), StorageType::File);
    assert!("localStorage".parse::<StorageType>().is_err());
    assert!("".parse::<StorageType>().is_err());
}

#[test]
fn type_name_selects_backend() {
    let db = Storage::builder()
        .storage_type_name("memory")
        .build()
        .unwrap();
    assert_eq!(db.storage_type(), StorageType::Memory);
}

#[test]
fn platform_picks_the_default() {
    let db = Storage::builder().platform(Platform::Gui).build().unwrap();
    assert_eq!(db.storage_type(), StorageType::Local);

    let db = Storage::builder()
        .platform(Platform::Headless)
        .build()
        .unwrap();
    assert_eq!(db.storage_type(), StorageType::File);
}

#[test]
fn explicit_type_overrides_platform() {
    let db = Storage::builder()
        .platform(Platform::Gui)
        .storage_type(StorageType::Memory)
        .build()
        .unwrap();
    assert_eq!(db.storage_type(), StorageType::Memory);
}

// ---- indexed backend init ---------------------------------------------------

struct FailingDriver;

impl ObjectStoreDriver for FailingDriver {
    fn open(&self, db_name: &str, _version: u32) -> Result<Box<dyn ObjectStore>> {
        Err(Error::BackendIo(format!("cannot open {db_name}")))
    }
}

#[test]
fn failing_driver_surfaces_through_build() {
    let err = Storage::builder()
        .storage_type(StorageType::Indexed)
        .driver(Box::new(FailingDriver))
        .build()
        .unwrap_err();
    assert_eq!(err, Error::BackendIo("cannot open ep-store".into()));
}

#[test]
fn indexed_same_db_name_reconnects() {
    {
        let db = Storage::builder()
            .storage_type(StorageType::Indexed)
            .db_name("init_reconnect")
            .build()
            .unwrap();
        db.set_at("k", "v", 5).unwrap();
    }
    let db = Storage::builder()
        .storage_type(StorageType::Indexed)
        .db_name("init_reconnect")
        .build()
        .unwrap();
    assert_eq!(db.get("k").unwrap(), Some("v".into()));
}

#[test]
fn indexed_distinct_db_names_isolated() {
    let a = Storage::builder()
        .storage_type(StorageType::Indexed)
        .db_name("init_iso_a")
        .build()
        .unwrap();
    let b = Storage::builder()
        .storage_type(StorageType::Indexed)
        .db_name("init_iso_b")
        .build()
        .unwrap();
    a.set_at("k", 1, 10).unwrap();
    assert_eq!(b.get("k").unwrap(), None);
}

// ---- memory backend sharing -------------------------------------------------

#[test]
fn private_maps_are_isolated() {
    let a = Storage::open(StorageType::Memory).unwrap();
    let b = Storage::open(StorageType::Memory).unwrap();
    a.set_at("k", 1, 10).unwrap();
    assert_eq!(b.get("k").unwrap(), None);
}

#[test]
fn shared_map_connects_instances() {
    let a = Storage::builder()
        .storage_type(StorageType::Memory)
        .shared_map("init_shared")
        .build()
        .unwrap();
    let b = Storage::builder()
        .storage_type(StorageType::Memory)
        .shared_map("init_shared")
        .build()
        .unwrap();

    a.set_at("k", "v", 10).unwrap();
    assert_eq!(b.get("k").unwrap(), Some("v".into()));
    // the rule applies across instances too
    assert!(!b.set_at("k", "w", 10).unwrap());
}

#[test]
fn injected_map_is_observed() {
    let map: Arc<RwLock<HashMap<String, Record>>> = Arc::new(RwLock::new(HashMap::new()));
    let db = Storage::builder()
        .storage_type(StorageType::Memory)
        .map(map.clone())
        .build()
        .unwrap();

    db.set_at("k", "v", 1).unwrap();
    assert_eq!(map.read().get("k").map(|r| r.timestamp), Some(1));

    // pre-seeded entries are visible through the facade
    MapStore::insert(
        map.as_ref(),
        "seeded".to_owned(),
        Record::new("x".into(), 9),
    );
    assert_eq!(db.get("seeded").unwrap(), Some("x".into()));
}

// ---- local backend binding --------------------------------------------------

#[derive(Clone, Default)]
struct SpyBlobStore(Arc<RwLock<HashMap<String, String>>>);

impl BlobStore for SpyBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.read().get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.0.write().insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}

#[test]
fn local_backend_framing() {
    let spy = SpyBlobStore::default();
    let db = Storage::builder()
        .storage_type(StorageType::Local)
        .blob_store(Box::new(spy.clone()))
        .build()
        .unwrap();
    db.set_at("plain", "v", 3).unwrap();

    // keys map 1:1 with no prefix; blobs are the JSON-encoded record
    let blob = spy.0.read().get("plain").cloned().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(parsed["value"], "v");
    assert_eq!(parsed["timestamp"], 3);
}
