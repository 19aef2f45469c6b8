//! Rate limiting configuration for the reset endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed-window limits for `/api/reset`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Resets allowed per client and window
    #[serde(default = "default_reset_limit")]
    pub reset_limit: u32,

    /// Window length in seconds
    #[serde(default = "default_reset_window")]
    pub reset_window_secs: u64,
}

const fn default_reset_limit() -> u32 {
    5
}

const fn default_reset_window() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            reset_limit: default_reset_limit(),
            reset_window_secs: default_reset_window(),
        }
    }
}

impl RateLimitConfig {
    /// Window length as a duration
    #[must_use]
    pub const fn reset_window(&self) -> Duration {
        Duration::from_secs(self.reset_window_secs)
    }
}
