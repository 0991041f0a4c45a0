use dashmap::DashMap;
use ep_store::{Record, Storage, StorageType};
use std::sync::Arc;

fn main() -> Result<(), ep_store::Error> {
    // run the memory backend on an injected DashMap substrate
    let map: Arc<DashMap<String, Record>> = Arc::new(DashMap::new());
    let db = Storage::builder()
        .storage_type(StorageType::Memory)
        .map(map.clone())
        .build()?;

    for i in 0..10u64 {
        db.set_at(&format!("k{i}"), i, i + 1)?;
    }
    println!("k3 = {:?}", db.get("k3")?);
    println!("entries in the injected map = {}", map.len());

    Ok(())
}
