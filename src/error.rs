//! Unified error type for all store operations.

/// Things that can go wrong when building or using a store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The configured storage type names none of the four backend variants.
    UnsupportedBackend(String),
    /// Backend I/O failure: object-store open or transaction errors, file
    /// write errors. Not retried.
    BackendIo(String),
    /// Failed to serialize a value or document.
    Serialize(String),
    /// Failed to deserialize stored bytes back into a record.
    Deserialize(String),
    /// Bad builder configuration.
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedBackend(name) => write!(f, "unsupported storage type: {name}"),
            Error::BackendIo(msg) => write!(f, "backend i/o error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Deserialize(msg) => write!(f, "deserialization error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::BackendIo(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::BackendIo(err.to_string())
        } else if err.is_syntax() || err.is_eof() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
