use ep_store::{Storage, StorageType};

fn main() -> Result<(), ep_store::Error> {
    let path = std::env::temp_dir().join("ep_store_demo_builder.json");
    let _ = std::fs::remove_file(&path);

    let db = Storage::builder()
        .storage_type(StorageType::File)
        .path(&path)
        .build()?;

    db.set("name", "ep-store")?;
    db.set("version", "0.1.0")?;

    // the document on disk: one "ep-store" envelope, 4-space indented
    let contents = std::fs::read_to_string(&path)?;
    println!("On-disk JSON:\n{contents}");

    println!("\nDebug output: {db:?}");

    let _ = std::fs::remove_file(&path);
    Ok(())
}
