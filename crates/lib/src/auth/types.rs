//! Core data types for the auth system

use serde::{Deserialize, Serialize};

/// Learning preferences carried on every account.
///
/// Opaque to the store itself. Consumers read it off [`User`] and replace
/// it through [`AuthStore::update_user_metadata`](super::AuthStore::update_user_metadata).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Self-reported pace, e.g. "steady" or "intensive"
    pub learning_speed: String,

    /// Preferred content style, e.g. "visual"
    pub preferred_learning_style: String,

    /// Target lessons per day
    pub daily_goal: u32,
}

/// Public view of a registered account.
///
/// Created at sign-up and never deleted; signing out only dereferences
/// the account. Only the metadata is mutable, through the explicit
/// update operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique, stable identifier (UUIDv4 string)
    pub id: String,

    /// Login identifier, unique across the collection (case-sensitive)
    pub email: String,

    /// Display name chosen at sign-up
    pub username: String,

    /// Account creation timestamp (Unix seconds)
    pub created_at: i64,

    /// Learning preferences
    pub metadata: UserMetadata,
}

/// Persisted row of the user collection.
///
/// Carries the credential hash alongside the public fields. The hash never
/// leaves this record: the public [`User`] is handed out without it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,

    /// Argon2id hash in PHC string format
    pub password_hash: String,
}

/// Optional profile payload supplied at sign-up.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SignUpOptions {
    /// Display name for the new account
    pub username: String,

    /// Initial learning preferences
    pub metadata: UserMetadata,
}

/// The current authenticated-user pointer.
///
/// Derived state: always reconstructable from the persisted current-user
/// record. A `Some` user implies a matching record exists in the user
/// collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
}

/// Auth state transition delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    UserUpdated,
}

impl AuthEvent {
    /// Wire-style event name, matching the emulated hosted service.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthEvent::SignedIn => "SIGNED_IN",
            AuthEvent::SignedOut => "SIGNED_OUT",
            AuthEvent::UserUpdated => "USER_UPDATED",
        }
    }
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
