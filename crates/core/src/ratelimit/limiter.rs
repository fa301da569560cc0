//! Fixed-window limiter.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tempo_shared::AppError;

use super::store::{CounterStore, WindowState};
use crate::clock::Clock;

/// An allowed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window closes.
    pub reset_at: DateTime<Utc>,
}

/// A rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Too many requests. Try again in {retry_after_secs} seconds")]
pub struct RateLimitExceeded {
    /// Seconds until the window closes.
    pub retry_after_secs: i64,
}

/// Allows at most `max_requests` per key per window.
///
/// The first request after a window closes opens a new one. Rejected
/// requests do not count.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    store: Arc<dyn CounterStore>,
    clock: Arc<dyn Clock>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// Creates a limiter.
    #[must_use]
    pub fn new(
        store: Arc<dyn CounterStore>,
        clock: Arc<dyn Clock>,
        max_requests: u32,
        window: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            max_requests,
            window,
        }
    }

    /// Counts a request for `key`.
    pub fn check(&self, key: &str) -> Result<RateDecision, RateLimitExceeded> {
        let now = self.clock.now();
        let mut allowed = false;

        let state = self.store.update(key, &mut |current| match current {
            Some(state) if now <= state.reset_at => {
                if state.count >= self.max_requests {
                    allowed = false;
                    state
                } else {
                    allowed = true;
                    WindowState {
                        count: state.count + 1,
                        reset_at: state.reset_at,
                    }
                }
            }
            _ => {
                allowed = true;
                WindowState {
                    count: 1,
                    reset_at: now + self.window,
                }
            }
        });

        if allowed {
            Ok(RateDecision {
                remaining: self.max_requests.saturating_sub(state.count),
                reset_at: state.reset_at,
            })
        } else {
            Err(RateLimitExceeded {
                retry_after_secs: (state.reset_at - now).num_seconds().max(1),
            })
        }
    }
}

impl From<RateLimitExceeded> for AppError {
    fn from(err: RateLimitExceeded) -> Self {
        Self::RateLimited(err.to_string())
    }
}

impl std::fmt::Debug for FixedWindowLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
