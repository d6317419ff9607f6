//! Fire-and-forget analytics logging
//!
//! Events are appended to the `analytics` table, tagged with the id of the
//! signed-in user (or nothing when signed out) and an RFC3339 timestamp.
//! Logging never surfaces an error: a write that cannot complete is
//! reported to the diagnostic channel and the event is dropped, not queued.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::auth::AuthStore;
use crate::clock::Clock;
use crate::constants::ANALYTICS_TABLE;
use crate::table::TableStore;

/// Row shape written to the analytics table.
#[derive(Clone, Debug, Serialize)]
struct AnalyticsEvent {
    event: String,
    data: Value,
    user_id: Option<String>,
    timestamp: String,
}

/// Event writer built on [`TableStore`] + [`AuthStore`].
#[derive(Clone, Debug)]
pub struct AnalyticsLogger {
    auth: AuthStore,
    tables: TableStore,
    clock: Arc<dyn Clock>,
}

impl AnalyticsLogger {
    /// Create a logger that tags events with the given auth store's
    /// current user and writes them through the given table store.
    pub fn new(auth: AuthStore, tables: TableStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            auth,
            tables,
            clock,
        }
    }

    /// Record an event.
    ///
    /// Best-effort, at-most-once: failures are logged and the event is
    /// dropped. Callers never see an error.
    pub async fn log_event(&self, event: &str, data: Value) {
        let user_id = self.auth.user().await.map(|u| u.id);
        let row = AnalyticsEvent {
            event: event.to_string(),
            data,
            user_id,
            timestamp: self.clock.now_rfc3339(),
        };

        let row = match serde_json::to_value(&row) {
            Ok(value) => value,
            Err(e) => {
                warn!("analytics event '{event}' could not be encoded: {e}");
                return;
            }
        };

        let table = self.tables.table(ANALYTICS_TABLE).await;
        if let Err(e) = table.insert(vec![row]).await {
            warn!("analytics event '{event}' dropped: {e}");
        }
    }
}
