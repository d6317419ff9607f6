//! Storage media for Homebase state
//!
//! This module provides the core [`Storage`] trait and the built-in media
//! implementations. The trait abstracts the durable key-value store that
//! all Homebase state is persisted through, so the higher-level stores
//! (auth, table) stay independent of the specific storage mechanism.
//!
//! Storage operations are deliberately infallible: when the medium is
//! unavailable or a write fails, the operation degrades to a no-op and the
//! failure is reported to the diagnostic channel only. Callers that need a
//! healthy medium probe [`Storage::is_available`] once at startup and act
//! on the answer, typically by switching into a degraded mode.

mod in_memory;
mod json_file;

pub mod errors;

pub use errors::StorageError;
pub use in_memory::InMemory;
pub use json_file::JsonFile;

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// Durable key-value medium holding one string value per key.
///
/// All implementations must be `Send + Sync` so the stores built on top can
/// be shared across tasks behind an `Arc`.
pub trait Storage: Send + Sync + Debug {
    /// Whether the underlying medium can currently be read and written.
    ///
    /// Probed once by [`Client::open`](crate::Client::open); an unavailable
    /// medium puts the client into degraded mode permanently.
    fn is_available(&self) -> bool;

    /// Read the value stored under `key`, if any.
    ///
    /// Returns `None` both for an absent key and for an unavailable medium.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Delete the value stored under `key`. Succeeds silently if absent.
    fn remove(&self, key: &str);
}

/// Read and JSON-decode the value under `key`.
///
/// Corrupt persisted JSON is reported to the diagnostic channel and treated
/// as absent, so one damaged key never poisons the rest of the store.
pub(crate) fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            let err = StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            };
            warn!("{err}, treating as empty");
            None
        }
    }
}

/// JSON-encode `value` and store it under `key`.
///
/// An unserializable value is reported and skipped; the previously persisted
/// state stays untouched.
pub(crate) fn write_json<T: Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set(key, &raw),
        Err(e) => warn!(key, "failed to serialize value for persistence: {e}"),
    }
}
