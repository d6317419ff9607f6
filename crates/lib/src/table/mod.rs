//! Named-table storage
//!
//! `TableStore` manages named, lazily-created collections of arbitrary JSON
//! rows. Each collection persists as a single JSON blob under a prefixed
//! storage key and is rewritten whole on every insert, so a collection is
//! never partially persisted.
//!
//! There is no schema and no query layer: [`Table::select`] returns the
//! full collection in insertion order and callers filter after retrieval.
//! A caller that reads, mutates, and inserts the result back gets
//! last-write-wins semantics on the whole collection.

pub mod errors;

pub use errors::TableError;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::Result;
use crate::constants::TABLE_PREFIX;
use crate::storage::{self, Storage, StorageError};

/// Generic named-collection store persisted through the storage medium.
///
/// Cheap-to-clone handle; clones share the same cache and medium.
#[derive(Debug, Clone)]
pub struct TableStore {
    inner: Arc<TableStoreInternal>,
}

#[derive(Debug)]
struct TableStoreInternal {
    storage: Arc<dyn Storage>,
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl TableStore {
    /// Create a store over the given medium.
    ///
    /// Collections are loaded lazily on first access, not up front.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: Arc::new(TableStoreInternal {
                storage,
                tables: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Access the named table, creating it if it has never been seen.
    ///
    /// First access to a new name initializes the collection to empty and
    /// persists that empty state immediately, so a later restart observes
    /// an existing collection rather than an absent key.
    pub async fn table(&self, name: impl Into<String>) -> Table {
        let name = name.into();
        self.ensure_loaded(&name);
        Table {
            name,
            store: self.clone(),
        }
    }

    fn ensure_loaded(&self, name: &str) {
        let mut tables = self.inner.tables.lock().unwrap();
        if tables.contains_key(name) {
            return;
        }
        let key = storage_key(name);
        match storage::read_json::<Vec<Value>>(self.inner.storage.as_ref(), &key) {
            Some(rows) => {
                tables.insert(name.to_string(), rows);
            }
            None => {
                tables.insert(name.to_string(), Vec::new());
                storage::write_json(self.inner.storage.as_ref(), &key, &Vec::<Value>::new());
            }
        }
    }
}

/// Handle to one named collection.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    store: TableStore,
}

impl Table {
    /// Name of the collection this handle addresses.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append rows to the collection and persist it as one blob.
    ///
    /// The in-memory collection is only updated once the new state has been
    /// serialized, so a failure leaves both memory and disk at the previous
    /// state.
    ///
    /// # Errors
    /// Returns a storage-unavailable error when the medium cannot be
    /// reached, or a serialization error if the combined collection cannot
    /// be encoded.
    pub async fn insert(&self, rows: Vec<Value>) -> Result<()> {
        let internal = &self.store.inner;
        if !internal.storage.is_available() {
            return Err(TableError::from(StorageError::Unavailable).into());
        }

        let mut tables = internal.tables.lock().unwrap();
        let collection = tables.entry(self.name.clone()).or_default();

        let mut candidate = collection.clone();
        candidate.extend(rows);
        let raw =
            serde_json::to_string(&candidate).map_err(|e| TableError::SerializationFailed {
                table: self.name.clone(),
                reason: e.to_string(),
            })?;

        internal.storage.set(&storage_key(&self.name), &raw);
        *collection = candidate;
        Ok(())
    }

    /// The full collection, in insertion order.
    pub async fn select(&self) -> Vec<Value> {
        let tables = self.store.inner.tables.lock().unwrap();
        tables.get(&self.name).cloned().unwrap_or_default()
    }
}

fn storage_key(name: &str) -> String {
    format!("{TABLE_PREFIX}{name}")
}
