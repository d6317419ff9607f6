//! Error types for the storage layer
use thiserror::Error;

/// Failures of the underlying storage medium.
///
/// `Unavailable` surfaces through the auth and table error enums when a
/// write is attempted against a medium that cannot be reached. `Corrupt`
/// never crosses the public boundary: damaged JSON is logged and the
/// affected value treated as absent for the session.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage medium is not available")]
    Unavailable,

    #[error("corrupt data persisted under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}
