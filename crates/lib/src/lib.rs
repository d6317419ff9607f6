//!
//! Homebase: a client-side stand-in for a hosted auth + row-store backend.
//! Everything such a service would keep server-side (registered accounts,
//! the current session, named row collections, analytics events) lives in
//! durable local key-value storage on the device instead.
//!
//! ## Core Concepts
//!
//! * **Storage (`storage::Storage`)**: The pluggable durable key-value medium everything persists through. [`JsonFile`](storage::JsonFile) survives process restarts; [`InMemory`](storage::InMemory) backs tests and development.
//! * **AuthStore (`auth::AuthStore`)**: Session and account lifecycle: sign-up, sign-in, idempotent sign-out, credential hashing, and synchronous ordered change notification.
//! * **TableStore (`table::TableStore`)**: Named, lazily-created collections of arbitrary JSON rows, each persisted whole as a single blob on every insert.
//! * **RateLimiter (`ratelimit::RateLimiter`)**: In-memory sliding-window throttle for sensitive operations.
//! * **AnalyticsLogger (`analytics::AnalyticsLogger`)**: Fire-and-forget event writer that tags rows with the signed-in user.
//! * **Client (`client::Client`)**: The facade applications construct once via [`Client::open`]. It probes the medium a single time and degrades gracefully to empty reads and typed write errors when storage is unavailable.

pub mod analytics;
pub mod auth;
pub mod client;
pub mod clock;
pub mod constants;
pub mod ratelimit;
pub mod storage;
pub mod table;

pub use auth::{AuthEvent, AuthStore, Session, SignUpOptions, User, UserMetadata};
pub use client::Client;
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use ratelimit::RateLimiter;
pub use storage::{InMemory, JsonFile, Storage};
pub use table::TableStore;

/// Result type used throughout the Homebase library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Homebase library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured auth errors from the auth module
    #[error(transparent)]
    Auth(#[from] auth::AuthError),

    /// Structured table errors from the table module
    #[error(transparent)]
    Table(#[from] table::TableError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Auth(_) => "auth",
            Error::Table(_) => "table",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_duplicate(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_duplicate(),
            _ => false,
        }
    }

    /// Check if this error indicates missing or malformed input.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_validation(),
            _ => false,
        }
    }

    /// Check if this error indicates the storage medium cannot be reached.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_unavailable(),
            Error::Table(table_err) => table_err.is_unavailable(),
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}
