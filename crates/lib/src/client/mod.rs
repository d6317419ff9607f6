//! Client facade and initialization
//!
//! [`Client::open`] probes the storage medium exactly once and installs
//! either the live stores or a permanent degraded mode. Every public
//! method delegates through the facade, so callers always get a
//! well-defined answer, possibly empty, and never an exception or a
//! hang, whatever state the medium is in.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::analytics::AnalyticsLogger;
use crate::auth::{
    AuthError, AuthEvent, AuthStore, AuthSubscription, Session, SignUpOptions, User, UserMetadata,
};
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::ratelimit::RateLimiter;
use crate::storage::{Storage, StorageError};
use crate::table::{Table, TableError, TableStore};

enum Stores {
    Ready {
        auth: AuthStore,
        tables: TableStore,
        analytics: AnalyticsLogger,
    },
    /// Permanent stand-in installed when the medium probe fails.
    Unavailable,
}

struct ClientInternal {
    stores: Stores,
    limiter: RateLimiter,
}

/// Facade over the auth, table, analytics, and rate-limit components.
///
/// Cheap-to-clone handle: construct one at the application entry point with
/// [`Client::open`] and pass clones to consumers. There is no hidden global
/// instance and no implicit initialization: a `Client` you hold is always
/// fully initialized, either live or degraded.
///
/// ## Example
///
/// ```
/// # use homebase::{Client, InMemory, SignUpOptions};
/// # #[tokio::main]
/// # async fn main() -> homebase::Result<()> {
/// let client = Client::open(Box::new(InMemory::new())).await;
///
/// let user = client
///     .sign_up("ada@example.com", "hunter2", SignUpOptions::default())
///     .await?;
/// assert_eq!(client.session().await.user, Some(user));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInternal>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.inner.stores {
            Stores::Ready { .. } => "ready",
            Stores::Unavailable => "unavailable",
        };
        f.debug_struct("Client").field("mode", &mode).finish()
    }
}

impl Client {
    /// Open a client over the given storage medium.
    ///
    /// The medium is probed exactly once. When it is available the auth and
    /// table stores are loaded from the persisted state; when it is not,
    /// the client stays usable in degraded mode: reads answer empty, writes
    /// answer a storage-unavailable error, analytics events are dropped,
    /// and rate limiting keeps working.
    pub async fn open(storage: Box<dyn Storage>) -> Self {
        Self::open_impl(Arc::from(storage), Arc::new(SystemClock))
    }

    /// Open a client with a custom clock.
    ///
    /// Same as [`Client::open`] but with an injected time source for
    /// controllable timestamps. Only available with the `testing` feature
    /// or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub async fn open_with_clock(storage: Box<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self::open_impl(Arc::from(storage), clock)
    }

    fn open_impl(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        let stores = if storage.is_available() {
            let auth = AuthStore::load(storage.clone(), clock.clone());
            let tables = TableStore::new(storage);
            let analytics = AnalyticsLogger::new(auth.clone(), tables.clone(), clock.clone());
            Stores::Ready {
                auth,
                tables,
                analytics,
            }
        } else {
            warn!("storage medium unavailable, client will run degraded");
            Stores::Unavailable
        };

        Self {
            inner: Arc::new(ClientInternal {
                stores,
                limiter: RateLimiter::with_clock(clock),
            }),
        }
    }

    /// The current session; `Session { user: None }` when signed out or
    /// degraded.
    pub async fn session(&self) -> Session {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.session().await,
            Stores::Unavailable => Session::default(),
        }
    }

    /// The signed-in user, if any.
    pub async fn user(&self) -> Option<User> {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.user().await,
            Stores::Unavailable => None,
        }
    }

    /// Sign in with an email and password.
    ///
    /// See [`AuthStore::sign_in`] for the error contract; a degraded client
    /// answers with a storage-unavailable error.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.sign_in(email, password).await,
            Stores::Unavailable => Err(AuthError::from(StorageError::Unavailable).into()),
        }
    }

    /// Register a new account and sign it in.
    ///
    /// See [`AuthStore::sign_up`] for the error contract; a degraded client
    /// answers with a storage-unavailable error.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> Result<User> {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.sign_up(email, password, options).await,
            Stores::Unavailable => Err(AuthError::from(StorageError::Unavailable).into()),
        }
    }

    /// Clear the current session. Idempotent, and a no-op when degraded.
    pub async fn sign_out(&self) {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.sign_out().await,
            Stores::Unavailable => {}
        }
    }

    /// Replace the signed-in user's preference metadata.
    pub async fn update_user_metadata(&self, metadata: UserMetadata) -> Result<User> {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.update_user_metadata(metadata).await,
            Stores::Unavailable => Err(AuthError::from(StorageError::Unavailable).into()),
        }
    }

    /// Subscribe to auth state transitions.
    ///
    /// On a degraded client the returned handle is valid but inert: no
    /// transitions can occur, so the callback never fires.
    pub fn on_auth_state_change(
        &self,
        callback: impl Fn(AuthEvent, &Session) + Send + Sync + 'static,
    ) -> AuthSubscription {
        match &self.inner.stores {
            Stores::Ready { auth, .. } => auth.on_auth_state_change(callback),
            Stores::Unavailable => AuthSubscription::detached(),
        }
    }

    /// Access the named table.
    pub async fn table(&self, name: impl Into<String>) -> TableHandle {
        match &self.inner.stores {
            Stores::Ready { tables, .. } => TableHandle {
                table: Some(tables.table(name).await),
            },
            Stores::Unavailable => TableHandle { table: None },
        }
    }

    /// Sliding-window rate limit check.
    ///
    /// Purely in-memory, so it keeps working on a degraded client.
    pub fn check_rate_limit(&self, key: &str, limit: u32, window: Duration) -> bool {
        self.inner.limiter.check(key, limit, window)
    }

    /// Record an analytics event.
    ///
    /// Fire-and-forget; on a degraded client the event is dropped.
    pub async fn log_event(&self, event: &str, data: Value) {
        match &self.inner.stores {
            Stores::Ready { analytics, .. } => analytics.log_event(event, data).await,
            Stores::Unavailable => {
                debug!("analytics event '{event}' dropped, storage unavailable");
            }
        }
    }
}

/// Table accessor returned by [`Client::table`].
///
/// On a degraded client inserts answer a storage-unavailable error and
/// selects answer empty.
#[derive(Debug, Clone)]
pub struct TableHandle {
    table: Option<Table>,
}

impl TableHandle {
    /// Append rows to the collection and persist it as one blob.
    pub async fn insert(&self, rows: Vec<Value>) -> Result<()> {
        match &self.table {
            Some(table) => table.insert(rows).await,
            None => Err(TableError::from(StorageError::Unavailable).into()),
        }
    }

    /// The full collection, in insertion order.
    pub async fn select(&self) -> Vec<Value> {
        match &self.table {
            Some(table) => table.select().await,
            None => Vec::new(),
        }
    }
}
