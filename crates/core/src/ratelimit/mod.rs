//! Fixed-window rate limiting.
//!
//! The algorithm ([`FixedWindowLimiter`]) is separate from where the window
//! counters live ([`CounterStore`]). The shipped store is a process-local
//! `moka` cache; a shared key-value store with TTL can replace it without
//! touching the algorithm.

pub mod limiter;
pub mod store;

pub use limiter::{FixedWindowLimiter, RateDecision, RateLimitExceeded};
pub use store::{CounterStore, MokaCounterStore, WindowState};
