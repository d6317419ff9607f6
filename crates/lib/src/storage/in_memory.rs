//! In-memory storage implementation
//!
//! A `HashMap`-backed medium for testing, development, or scenarios where
//! durability is handled externally. Contents live only as long as the
//! process.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::Storage;

/// A simple in-memory storage medium.
///
/// The availability toggle exists so degraded-mode behavior can be
/// exercised without a real revoked medium: after
/// [`set_available(false)`](InMemory::set_available) every operation
/// behaves exactly like a disabled browser store: reads answer `None`,
/// writes do nothing.
#[derive(Debug)]
pub struct InMemory {
    values: RwLock<HashMap<String, String>>,
    available: AtomicBool,
}

impl InMemory {
    /// Creates a new, empty, available `InMemory` medium.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Flip the simulated availability of the medium.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    /// Whether the medium holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemory {
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
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        if !self.is_available() {
            return;
        }
        self.values.write().unwrap().remove(key);
    }
}
