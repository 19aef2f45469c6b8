//! Fixed-window rate limiting
//!
//! In-memory, per process and best effort. Used by the reset endpoint with
//! keys of the form `reset:{client_ip}`.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use axum::http::HeaderMap;
use parking_lot::Mutex;

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// Time until the current window closes
    pub reset_in: Duration,
}

/// Window entry for a single key
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window limiter keyed by string
#[derive(Debug)]
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, Window>>,
    limit: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// Create a limiter allowing `limit` hits per `window`
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    /// Record a hit for `key` now
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    /// Record a hit for `key` at the given instant
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut windows = self.windows.lock();

        let expired = windows
            .get(key)
            .is_none_or(|w| now.saturating_duration_since(w.started) >= self.window);
        if expired {
            windows.insert(
                key.to_string(),
                Window {
                    started: now,
                    count: 1,
                },
            );
            return RateLimitDecision {
                allowed: self.limit > 0,
                remaining: self.limit.saturating_sub(1),
                reset_in: self.window,
            };
        }

        let Some(entry) = windows.get_mut(key) else {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_in: self.window,
            };
        };
        let reset_in = self
            .window
            .saturating_sub(now.saturating_duration_since(entry.started));

        if entry.count >= self.limit {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_in,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.limit.saturating_sub(entry.count),
            reset_in,
        }
    }

    /// Drop windows that have already closed
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.windows
            .lock()
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
    }

    /// Number of tracked keys
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().len()
    }
}

/// Best-effort client address from proxy headers
///
/// First `x-forwarded-for` entry, then `x-real-ip`, else `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        let first = forwarded.split(',').next().map_or("", str::trim);
        return if first.is_empty() {
            "unknown".to_string()
        } else {
            first.to_string()
        };
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(|| "unknown".to_string(), str::to_string)
}
