//! File backend: the whole keyspace as one JSON document on disk.
//!
//! Every accepted write re-reads the document, merges, and rewrites it in
//! full — O(total stored data) per set, as a plain overwrite with no
//! temp-file rename and no locking. Two processes writing the same file can
//! lose updates to each other at the file level; that race is a documented
//! constraint of the format, not something this backend papers over.
//! Missing, unreadable, or unparseable files read as empty.

use crate::backend::Backend;
use crate::error::Result;
use crate::merge::should_update;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default document path, relative to the process working directory.
pub const DEFAULT_PATH: &str = "./ep-store.json";

/// On-disk envelope: one top-level `"ep-store"` key holding all entries.
#[derive(Default, Serialize, Deserialize)]
struct Document {
    #[serde(rename = "ep-store")]
    entries: HashMap<String, Record>,
}

/// Single-file backend.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend at the default `./ep-store.json`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
        }
    }

    /// Backend at an explicit path.
    #[must_use]
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // Any read problem means "no data yet": an absent file, a permission
    // error, and truncated or invalid JSON all load as an empty document.
    fn load(&self) -> Document {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(_) => return Document::default(),
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    fn save(&self, doc: &Document) -> Result<()> {
        // The format fixes 4-space indentation; serde_json's stock pretty
        // printer uses 2, so drive the formatter directly.
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        doc.serialize(&mut ser)?;
        std::fs::write(&self.path, &buf)?;
        Ok(())
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Record>> {
        Ok(self.load().entries.get(key).cloned())
    }

    fn set(&self, key: &str, record: Record) -> Result<bool> {
        let mut doc = self.load();
        let existing = doc.entries.get(key).map(|r| r.timestamp);
        if should_update(existing, record.timestamp) {
            doc.entries.insert(key.to_owned(), record);
            self.save(&doc)?;
            return Ok(true);
        }
        Ok(false)
    }
}
