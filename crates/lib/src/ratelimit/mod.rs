//! Sliding-window rate limiting
//!
//! Throttles sensitive operations by counting recent attempts under a key.
//! Attempts live in memory only, so limits reset when the process restarts;
//! that is an accepted tradeoff for a single-process client and is not
//! persisted state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// One recorded attempt.
#[derive(Debug, Clone)]
struct Attempt {
    key: String,
    timestamp_ms: u64,
}

/// Sliding-window request counter keyed by arbitrary strings.
///
/// Cheap-to-clone handle; clones share the same attempt set.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    inner: Arc<RateLimiterInternal>,
}

#[derive(Debug)]
struct RateLimiterInternal {
    attempts: Mutex<Vec<Attempt>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter driven by real system time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a limiter with an injected time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RateLimiterInternal {
                attempts: Mutex::new(Vec::new()),
                clock,
            }),
        }
    }

    /// Check whether an operation under `key` is allowed right now.
    ///
    /// Attempts older than `window` are purged first. The survivors whose
    /// composite key starts with `key` are counted: at `limit` or more the
    /// call is denied and nothing is recorded, otherwise the attempt is
    /// recorded with the current timestamp and allowed.
    ///
    /// A `limit` of zero always denies.
    pub fn check(&self, key: &str, limit: u32, window: Duration) -> bool {
        let now = self.inner.clock.now_millis();
        let window_start = now.saturating_sub(window.as_millis() as u64);

        let mut attempts = self.inner.attempts.lock().unwrap();
        attempts.retain(|a| a.timestamp_ms >= window_start);

        let count = attempts.iter().filter(|a| a.key.starts_with(key)).count();
        if count as u64 >= u64::from(limit) {
            debug!(key, limit, "rate limit exceeded");
            return false;
        }

        attempts.push(Attempt {
            key: format!("{key}_{now}"),
            timestamp_ms: now,
        });
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
