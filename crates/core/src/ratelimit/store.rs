//! Window counter storage.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;

/// Default maximum number of tracked keys.
const DEFAULT_CAPACITY: u64 = 10_000;

/// Counter state of one key's current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Requests counted in this window.
    pub count: u32,
    /// When the window closes.
    pub reset_at: DateTime<Utc>,
}

/// Storage for window counters.
///
/// `update` must run the read-modify-write for one key atomically.
pub trait CounterStore: Send + Sync {
    /// Replaces the state of `key` with `f(current)` and returns the new state.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<WindowState>) -> WindowState,
    ) -> WindowState;
}

/// Process-local counter store backed by a `moka` cache.
///
/// Entries expire after the window length, so idle keys do not pile up.
#[derive(Clone)]
pub struct MokaCounterStore {
    cache: Cache<String, WindowState>,
}

impl MokaCounterStore {
    /// Creates a store whose entries live for `window`.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self::with_capacity(window, DEFAULT_CAPACITY)
    }

    /// Creates a store with a custom key capacity.
    #[must_use]
    pub fn with_capacity(window: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(window)
            .build();
        Self { cache }
    }
}

impl CounterStore for MokaCounterStore {
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<WindowState>) -> WindowState,
    ) -> WindowState {
        self.cache
            .entry(key.to_string())
            .and_upsert_with(|current| f(current.map(|entry| entry.into_value())))
            .into_value()
    }
}

impl std::fmt::Debug for MokaCounterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCounterStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
