//! The backend seam: one capability trait, a closed set of variants.

use crate::error::Result;
use crate::file::FileBackend;
use crate::indexed::IndexedBackend;
use crate::local::LocalBackend;
use crate::memory::MemoryBackend;
use crate::record::Record;

/// Contract every storage substrate implements.
///
/// All four variants expose identical observable semantics: `get` reports the
/// stored record or absence, and `set` re-reads the existing record for the
/// key and applies the last-write-wins rule itself, as close to the substrate
/// as possible.
pub trait Backend: Send + Sync {
    /// Fetch the record stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Record>>;

    /// Store `record` under `key` if the last-write-wins rule accepts it.
    /// Returns whether the write landed.
    fn set(&self, key: &str, record: Record) -> Result<bool>;
}

/// The closed set of backend variants. One is selected when the store is
/// built; call sites never branch on a type tag again.
pub(crate) enum BackendKind {
    Memory(MemoryBackend),
    Local(LocalBackend),
    Indexed(IndexedBackend),
    File(FileBackend),
}

impl BackendKind {
    pub(crate) fn as_backend(&self) -> &dyn Backend {
        match self {
            BackendKind::Memory(b) => b,
            BackendKind::Local(b) => b,
            BackendKind::Indexed(b) => b,
            BackendKind::File(b) => b,
        }
    }
}
