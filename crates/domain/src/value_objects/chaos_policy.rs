//! Chaos policy: the constants applied when chaos is switched on
//!
//! The documented defaults (100-2000 ms latency, 200 ms jitter, 10% errors)
//! are exposed as named constants and can be overridden per deployment.

use serde::{Deserialize, Serialize};

use super::LatencyProfile;
use crate::DomainError;

/// Default lower latency bound in milliseconds
pub const DEFAULT_LATENCY_MIN_MS: f64 = 100.0;
/// Default upper latency bound in milliseconds
pub const DEFAULT_LATENCY_MAX_MS: f64 = 2000.0;
/// Default jitter amplitude in milliseconds
pub const DEFAULT_LATENCY_JITTER_MS: f64 = 200.0;
/// Default probability of a simulated failure
pub const DEFAULT_ERROR_RATE: f64 = 0.1;
/// Draws above this threshold arm the popup overlay
pub const DEFAULT_POPUP_THRESHOLD: f64 = 0.5;

/// Closed range a per-feature delay is drawn from, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayBand {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl DelayBand {
    /// Create a band without validation
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &str) -> Result<(), DomainError> {
        let ok = self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max;
        if ok {
            Ok(())
        } else {
            Err(DomainError::delay_band(field, self.min, self.max))
        }
    }
}

/// Policy applied by derivation when chaos is enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaosPolicy {
    /// Latency bounds handed to every enabled configuration
    pub latency: LatencyProfile,
    /// Baseline failure probability
    pub error_rate: f64,
    /// Draws above this value arm the popup overlay
    pub popup_threshold: f64,
    /// Band for the modal base delay
    pub modal_delay: DelayBand,
    /// Band for the toast base delay
    pub toast_delay: DelayBand,
    /// Band for the skeleton base delay
    pub skeleton_delay: DelayBand,
}

impl Default for ChaosPolicy {
    fn default() -> Self {
        Self {
            latency: LatencyProfile {
                min: DEFAULT_LATENCY_MIN_MS,
                max: DEFAULT_LATENCY_MAX_MS,
                jitter: DEFAULT_LATENCY_JITTER_MS,
            },
            error_rate: DEFAULT_ERROR_RATE,
            popup_threshold: DEFAULT_POPUP_THRESHOLD,
            modal_delay: DelayBand::new(100.0, 500.0),
            toast_delay: DelayBand::new(200.0, 800.0),
            skeleton_delay: DelayBand::new(300.0, 1200.0),
        }
    }
}

impl ChaosPolicy {
    /// Check every policy invariant
    pub fn validate(&self) -> Result<(), DomainError> {
        self.latency.validate()?;
        if !(0.0..=1.0).contains(&self.error_rate) {
            return Err(DomainError::InvalidErrorRate(self.error_rate));
        }
        if !(0.0..=1.0).contains(&self.popup_threshold) {
            return Err(DomainError::ValidationError(format!(
                "popup_threshold must be between 0 and 1, got {}",
                self.popup_threshold
            )));
        }
        self.modal_delay.validate("modal_delay")?;
        self.toast_delay.validate("toast_delay")?;
        self.skeleton_delay.validate("skeleton_delay")?;
        Ok(())
    }

    /// Set the latency bounds
    #[must_use]
    pub const fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    /// Set the baseline error rate
    #[must_use]
    pub const fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = error_rate;
        self
    }
}
