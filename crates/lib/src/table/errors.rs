//! Error types for the table store
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to serialize rows for table '{table}': {reason}")]
    SerializationFailed { table: String, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TableError {
    /// Check if this error indicates the storage medium cannot be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TableError::Storage(StorageError::Unavailable))
    }
}
