//! Last-write-wins key-value store with pluggable storage backends.
//!
//! One rule, four substrates: a write lands only when its timestamp is
//! strictly newer than whatever the key already holds (absent keys always
//! accept; ties keep the existing record). Pick a backend — in-memory map,
//! embedder-bound blob store, embedder-bound object store, or a single JSON
//! document on disk — and the get/set surface behaves identically on all of
//! them.
//!
//! ```rust
//! use ep_store::{Storage, StorageType};
//!
//! let db = Storage::open(StorageType::Memory).unwrap();
//! db.set("key1", "value1").unwrap();
//! db.set("key2", serde_json::json!({ "subkey1": "value1" })).unwrap();
//! assert_eq!(db.get("key1").unwrap(), Some("value1".into()));
//! ```
//!
//! **Single-process only.** The file backend rewrites its whole document on
//! every accepted write with no locking or rename; two processes sharing a
//! file can lose updates to each other. Timestamps break ties between
//! writers, but nothing protects the read-modify-write cycle itself.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod file;
pub mod indexed;
pub mod local;
pub mod memory;
pub mod merge;
pub mod record;
pub mod store;

pub use backend::Backend;
pub use error::{Error, Result};
pub use merge::should_update;
pub use record::{now_millis, Record};
pub use store::{Platform, Storage, StorageBuilder, StorageType};

/// Default map substrate for the memory backend: ShardMap.
pub type DefaultMap = shardmap::ShardMap<String, Record>;
