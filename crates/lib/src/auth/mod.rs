//! Session and account lifecycle
//!
//! `AuthStore` exclusively owns the current-session pointer and the
//! registered-user collection. It persists both through the storage medium,
//! verifies credentials on sign-in, and notifies subscribers synchronously
//! on every state transition, after the new state has been persisted, so a
//! subscriber always observes the store post-transition.

pub mod crypto;
pub mod errors;
pub mod types;


pub use errors::AuthError;
pub use types::{AuthEvent, Session, SignUpOptions, User, UserMetadata, UserRecord};

use std::sync::{Arc, Mutex, Weak};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::Result;
use crate::clock::Clock;
use crate::constants::{CURRENT_SESSION, CURRENT_USER, USERS};
use crate::storage::{self, Storage, StorageError};

/// Callback invoked on every auth state transition.
pub type AuthCallback = Arc<dyn Fn(AuthEvent, &Session) + Send + Sync>;

struct Subscriber {
    id: u64,
    callback: AuthCallback,
}

/// Mutable auth state, guarded by one mutex.
struct AuthState {
    current: Option<User>,
    users: Vec<UserRecord>,
    subscribers: Vec<Subscriber>,
    next_subscriber_id: u64,
}

pub(crate) struct AuthInternal {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    state: Mutex<AuthState>,
}

/// Session/user lifecycle manager.
///
/// Cheap-to-clone handle around shared internal state; construct one with
/// [`AuthStore::load`] (or let [`Client::open`](crate::Client::open) do it)
/// and pass clones around.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthInternal>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock().unwrap();
        f.debug_struct("AuthStore")
            .field("current", &state.current.as_ref().map(|u| u.id.as_str()))
            .field("users", &state.users.len())
            .field("subscribers", &state.subscribers.len())
            .finish()
    }
}

impl AuthStore {
    /// Load persisted auth state from the storage medium.
    ///
    /// Reads the user collection and the current-user record. A persisted
    /// current user with no matching collection record is discarded: the
    /// session must always be derivable from the collection.
    pub fn load(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        let users: Vec<UserRecord> =
            storage::read_json(storage.as_ref(), USERS).unwrap_or_default();

        let mut current: Option<User> = storage::read_json(storage.as_ref(), CURRENT_USER);
        if let Some(user) = &current
            && !users.iter().any(|r| r.user.id == user.id)
        {
            warn!(id = %user.id, "persisted current user has no record in the user collection, discarding session");
            current = None;
        }

        Self {
            inner: Arc::new(AuthInternal {
                storage,
                clock,
                state: Mutex::new(AuthState {
                    current,
                    users,
                    subscribers: Vec::new(),
                    next_subscriber_id: 0,
                }),
            }),
        }
    }

    /// The currently cached session.
    ///
    /// Never blocks and never fails: when nobody is signed in (or the
    /// medium was unavailable at load) the session simply holds no user.
    pub async fn session(&self) -> Session {
        let state = self.inner.state.lock().unwrap();
        Session {
            user: state.current.clone(),
        }
    }

    /// The currently signed-in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.inner.state.lock().unwrap().current.clone()
    }

    /// Sign in with an email and password.
    ///
    /// On success the matched user becomes the current session, the session
    /// is persisted, and subscribers observe a [`AuthEvent::SignedIn`]
    /// transition.
    ///
    /// # Errors
    /// * [`AuthError::MissingCredentials`] if either field is empty
    /// * [`AuthError::UserNotFound`] if no account has that email
    /// * [`AuthError::InvalidPassword`] if the password does not match
    /// * a storage-unavailable error when the medium cannot be reached
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }
        if !self.inner.storage.is_available() {
            return Err(AuthError::from(StorageError::Unavailable).into());
        }

        let record = {
            let state = self.inner.state.lock().unwrap();
            state.users.iter().find(|r| r.user.email == email).cloned()
        };
        let record = record.ok_or_else(|| AuthError::UserNotFound {
            email: email.to_string(),
        })?;

        crypto::verify_password(password, &record.password_hash)?;

        self.set_current(Some(record.user.clone()), AuthEvent::SignedIn);
        debug!(id = %record.user.id, "signed in");
        Ok(record.user)
    }

    /// Register a new account and sign it in.
    ///
    /// Synthesizes a fresh UUIDv4 id, hashes the password, appends the
    /// record to the user collection, persists the collection, makes the
    /// new user the current session, and notifies subscribers with
    /// [`AuthEvent::SignedIn`].
    ///
    /// # Errors
    /// * [`AuthError::MissingCredentials`] if email or password is empty
    /// * [`AuthError::EmailTaken`] if the email is already registered,
    ///   regardless of any other field differing
    /// * a storage-unavailable error when the medium cannot be reached
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }
        if !self.inner.storage.is_available() {
            return Err(AuthError::from(StorageError::Unavailable).into());
        }

        // Hash before taking the lock; Argon2 is deliberately slow.
        let password_hash = crypto::hash_password(password)?;

        let user = {
            let mut state = self.inner.state.lock().unwrap();
            if state.users.iter().any(|r| r.user.email == email) {
                return Err(AuthError::EmailTaken {
                    email: email.to_string(),
                }
                .into());
            }

            let user = User {
                id: Uuid::new_v4().to_string(),
                email: email.to_string(),
                username: options.username,
                created_at: self.inner.clock.now_secs(),
                metadata: options.metadata,
            };
            state.users.push(UserRecord {
                user: user.clone(),
                password_hash,
            });
            storage::write_json(self.inner.storage.as_ref(), USERS, &state.users);
            user
        };

        self.set_current(Some(user.clone()), AuthEvent::SignedIn);
        debug!(id = %user.id, "account created");
        Ok(user)
    }

    /// Clear the current session.
    ///
    /// Idempotent: signing out while already signed out still clears the
    /// persisted state and notifies subscribers with
    /// [`AuthEvent::SignedOut`], without error.
    pub async fn sign_out(&self) {
        self.set_current(None, AuthEvent::SignedOut);
        debug!("signed out");
    }

    /// Replace the signed-in user's preference metadata.
    ///
    /// Rewrites both the collection record and the current-user record,
    /// persists them, and notifies subscribers with
    /// [`AuthEvent::UserUpdated`].
    ///
    /// # Errors
    /// * [`AuthError::NotSignedIn`] when no session is active
    /// * a storage-unavailable error when the medium cannot be reached
    pub async fn update_user_metadata(&self, metadata: UserMetadata) -> Result<User> {
        if !self.inner.storage.is_available() {
            return Err(AuthError::from(StorageError::Unavailable).into());
        }

        let updated = {
            let mut state = self.inner.state.lock().unwrap();
            let Some(current) = state.current.clone() else {
                return Err(AuthError::NotSignedIn.into());
            };
            let Some(record) = state.users.iter_mut().find(|r| r.user.id == current.id) else {
                return Err(AuthError::NotSignedIn.into());
            };

            record.user.metadata = metadata;
            let updated = record.user.clone();
            storage::write_json(self.inner.storage.as_ref(), USERS, &state.users);
            updated
        };

        self.set_current(Some(updated.clone()), AuthEvent::UserUpdated);
        debug!(id = %updated.id, "user metadata updated");
        Ok(updated)
    }

    /// Subscribe to auth state transitions.
    ///
    /// The callback fires synchronously on every subsequent sign-in,
    /// sign-out, and user update (never for past transitions), and always
    /// after the new state has been persisted, so the session passed in is
    /// the post-transition state. Subscribers are notified in registration
    /// order, each exactly once per transition.
    pub fn on_auth_state_change(
        &self,
        callback: impl Fn(AuthEvent, &Session) + Send + Sync + 'static,
    ) -> AuthSubscription {
        let mut state = self.inner.state.lock().unwrap();
        let id = state.next_subscriber_id;
        state.next_subscriber_id += 1;
        state.subscribers.push(Subscriber {
            id,
            callback: Arc::new(callback),
        });
        AuthSubscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Swap the current session, persist it, then notify subscribers.
    ///
    /// The subscriber list is snapshotted and the lock released before any
    /// callback runs, and each subscription's liveness is re-checked right
    /// before its callback fires: an unsubscribe from inside a callback
    /// suppresses delivery even for the sweep already in progress.
    fn set_current(&self, user: Option<User>, event: AuthEvent) {
        let (session, snapshot) = {
            let mut state = self.inner.state.lock().unwrap();
            state.current = user;
            let session = Session {
                user: state.current.clone(),
            };
            self.persist_session(&session);
            let snapshot: Vec<(u64, AuthCallback)> = state
                .subscribers
                .iter()
                .map(|s| (s.id, s.callback.clone()))
                .collect();
            (session, snapshot)
        };

        for (id, callback) in snapshot {
            let live = {
                let state = self.inner.state.lock().unwrap();
                state.subscribers.iter().any(|s| s.id == id)
            };
            if live {
                callback(event, &session);
            }
        }
    }

    fn persist_session(&self, session: &Session) {
        let storage = self.inner.storage.as_ref();
        match &session.user {
            Some(user) => {
                storage::write_json(storage, CURRENT_USER, user);
                storage::write_json(storage, CURRENT_SESSION, session);
            }
            None => {
                storage.remove(CURRENT_USER);
                storage.remove(CURRENT_SESSION);
            }
        }
    }
}

/// Handle returned by [`AuthStore::on_auth_state_change`].
///
/// Dropping the handle does not cancel delivery; call
/// [`unsubscribe`](AuthSubscription::unsubscribe) to stop receiving
/// callbacks.
#[derive(Debug)]
pub struct AuthSubscription {
    id: u64,
    store: Weak<AuthInternal>,
}

impl AuthSubscription {
    /// Cancel the subscription. The callback is never invoked afterwards.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.store.upgrade() {
            let mut state = inner.state.lock().unwrap();
            state.subscribers.retain(|s| s.id != self.id);
        }
    }

    /// A handle that is not attached to any store; unsubscribing is a no-op.
    pub(crate) fn detached() -> Self {
        Self {
            id: 0,
            store: Weak::new(),
        }
    }
}
