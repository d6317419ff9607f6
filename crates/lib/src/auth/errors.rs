//! Error types for the auth system
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("no account registered for email: {email}")]
    UserNotFound { email: String },

    #[error("email already registered: {email}")]
    EmailTaken { email: String },

    #[error("invalid password")]
    InvalidPassword,

    #[error("no user is signed in")]
    NotSignedIn,

    #[error("password hashing failed: {reason}")]
    PasswordHash { reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuthError::UserNotFound { .. })
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_duplicate(&self) -> bool {
        matches!(self, AuthError::EmailTaken { .. })
    }

    /// Check if this error indicates missing or malformed input.
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::MissingCredentials)
    }

    /// Check if this error indicates the storage medium cannot be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AuthError::Storage(StorageError::Unavailable))
    }
}
