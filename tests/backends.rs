use ep_store::{Storage, StorageType};
use serde_json::json;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("ep_store_test_{}.json", name))
}

// One store per backend variant. The indexed db name and the file path carry
// the tag so tests in this binary stay isolated from each other.
fn open_all(tag: &str) -> Vec<Storage> {
    let path = temp_path(tag);
    let _ = std::fs::remove_file(&path);
    vec![
        Storage::open(StorageType::Memory).unwrap(),
        Storage::open(StorageType::Local).unwrap(),
        Storage::builder()
            .storage_type(StorageType::Indexed)
            .db_name(format!("parity_{tag}"))
            .build()
            .unwrap(),
        Storage::builder()
            .storage_type(StorageType::File)
            .path(&path)
            .build()
            .unwrap(),
    ]
}

fn cleanup(tag: &str) {
    let _ = std::fs::remove_file(temp_path(tag));
}

// ---- parity -----------------------------------------------------------------

#[test]
fn unwritten_key_is_none_everywhere() {
    for db in open_all("absent") {
        assert_eq!(db.get("never").unwrap(), None, "{:?}", db.storage_type());
    }
    cleanup("absent");
}

#[test]
fn roundtrip_nested_value_everywhere() {
    let value = json!({
        "subkey1": "value1",
        "nested": { "list": [1, 2, 3], "flag": true }
    });
    for db in open_all("roundtrip") {
        assert!(db.set("doc", &value).unwrap());
        assert_eq!(
            db.get("doc").unwrap(),
            Some(value.clone()),
            "{:?}",
            db.storage_type()
        );
    }
    cleanup("roundtrip");
}

#[test]
fn newer_timestamp_wins_everywhere() {
    for db in open_all("newer") {
        assert!(db.set_at("k", "v1", 100).unwrap());
        assert!(db.set_at("k", "v2", 200).unwrap());
        assert_eq!(db.get("k").unwrap(), Some("v2".into()), "{:?}", db.storage_type());
    }
    cleanup("newer");
}

#[test]
fn equal_timestamp_keeps_existing_everywhere() {
    for db in open_all("tie") {
        assert!(db.set_at("k", "v1", 100).unwrap());
        assert!(!db.set_at("k", "v2", 100).unwrap());
        assert_eq!(db.get("k").unwrap(), Some("v1".into()), "{:?}", db.storage_type());
    }
    cleanup("tie");
}

#[test]
fn older_timestamp_rejected_everywhere() {
    for db in open_all("older") {
        assert!(db.set_at("k", "v1", 200).unwrap());
        assert!(!db.set_at("k", "v2", 100).unwrap());
        assert_eq!(db.get("k").unwrap(), Some("v1".into()), "{:?}", db.storage_type());
    }
    cleanup("older");
}

#[test]
fn stored_timestamp_is_max_accepted_everywhere() {
    for db in open_all("maxts") {
        db.set_at("k", "a", 10).unwrap();
        db.set_at("k", "b", 30).unwrap();
        db.set_at("k", "c", 20).unwrap();
        let record = db.get_record("k").unwrap().unwrap();
        assert_eq!(record.timestamp, 30, "{:?}", db.storage_type());
        assert_eq!(record.value, "b", "{:?}", db.storage_type());
    }
    cleanup("maxts");
}

#[test]
fn keys_are_independent_everywhere() {
    for db in open_all("independent") {
        db.set_at("key1", "value1", 100).unwrap();
        db.set_at("key2", json!({ "subkey1": "value1" }), 100).unwrap();
        assert_eq!(db.get("key2").unwrap(), Some(json!({ "subkey1": "value1" })));
        assert_eq!(db.get("key1").unwrap(), Some("value1".into()));
    }
    cleanup("independent");
}
