//! JSON-file storage implementation
//!
//! Persists the whole key map as one JSON document, rewritten on every
//! mutation. This is the durable medium for real deployments: state
//! survives process restarts and lives wherever the host application
//! points the path.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use super::Storage;

/// A file-backed storage medium.
///
/// The full key map is loaded once at open and mirrored in memory; every
/// `set`/`remove` rewrites the file through a temp-file-then-rename so a
/// crash mid-write never leaves a half-written document behind.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
    available: AtomicBool,
}

impl JsonFile {
    /// Open the storage file at `path`, creating it if missing.
    ///
    /// A missing file means an empty map. A file that exists but does not
    /// parse is reported and treated as empty. A path that cannot be
    /// written marks the medium unavailable, which callers detect through
    /// [`is_available`](Storage::is_available).
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), "corrupt storage file, starting empty: {e}");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(path = %path.display(), "cannot read storage file: {e}");
                let storage = Self {
                    path,
                    values: RwLock::new(HashMap::new()),
                    available: AtomicBool::new(false),
                };
                return storage;
            }
        };

        let storage = Self {
            path,
            values: RwLock::new(values),
            available: AtomicBool::new(true),
        };
        // Availability probe: the map must be writable back to disk.
        if !storage.write_file(&storage.values.read().unwrap()) {
            storage.available.store(false, Ordering::SeqCst);
        }
        storage
    }

    /// The file this medium persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, values: &HashMap<String, String>) -> bool {
        let raw = match serde_json::to_string(values) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), "failed to serialize storage map: {e}");
                return false;
            }
        };
        let tmp = self.path.with_extension("tmp");
        if let Err(e) = fs::write(&tmp, raw) {
            warn!(path = %self.path.display(), "failed to write storage file: {e}");
            return false;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(path = %self.path.display(), "failed to replace storage file: {e}");
            return false;
        }
        true
    }
}

impl Storage for JsonFile {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn get(&self, key: &str) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if !self.is_available() {
            return;
        }
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.write_file(&values);
    }

    fn remove(&self, key: &str) {
        if !self.is_available() {
            return;
        }
        let mut values = self.values.write().unwrap();
        values.remove(key);
        self.write_file(&values);
    }
}
