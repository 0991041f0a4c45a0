use ep_store::{Storage, StorageType};
use serde_json::json;

fn main() -> Result<(), ep_store::Error> {
    let db = Storage::open(StorageType::Memory)?;

    // set / get
    db.set("key1", "value1")?;
    db.set("key2", json!({ "subkey1": "value1" }))?;
    println!("key1 = {:?}", db.get("key1")?);
    println!("key2 = {:?}", db.get("key2")?);

    // last-write-wins with explicit timestamps
    db.set_at("contested", "first", 100)?;
    let accepted = db.set_at("contested", "stale", 50)?;
    println!("stale write accepted? {accepted}");
    println!("contested = {:?}", db.get("contested")?);

    // the stored record carries the winning timestamp
    let record = db.get_record("contested")?.unwrap();
    println!("timestamp = {}", record.timestamp);

    Ok(())
}
