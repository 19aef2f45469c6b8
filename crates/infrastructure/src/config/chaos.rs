//! Chaos policy settings.
//!
//! Flat fields so every knob can be set from the environment, e.g.
//! `CHAOS_CHAOS__POLICY__ERROR_RATE=0.25`.

use domain::{
    ChaosPolicy, DEFAULT_ERROR_RATE, DEFAULT_LATENCY_JITTER_MS, DEFAULT_LATENCY_MAX_MS,
    DEFAULT_LATENCY_MIN_MS, DEFAULT_POPUP_THRESHOLD, DelayBand, DomainError, LatencyProfile,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Chaos section of the application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChaosAppConfig {
    /// Enable chaos for requests that carry no explicit `chaos` parameter
    #[serde(default)]
    pub default_enabled: bool,

    /// Parameters applied to every enabled configuration
    #[serde(default)]
    pub policy: PolicySettings,
}

/// Raw policy values as read from configuration sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PolicySettings {
    #[validate(range(min = 0.0))]
    pub latency_min_ms: f64,
    #[validate(range(min = 0.0))]
    pub latency_max_ms: f64,
    #[validate(range(min = 0.0))]
    pub latency_jitter_ms: f64,

    /// Probability that a guarded operation fails
    #[validate(range(min = 0.0, max = 1.0))]
    pub error_rate: f64,

    /// Overlay shows when the seeded draw exceeds this value
    #[validate(range(min = 0.0, max = 1.0))]
    pub popup_threshold: f64,

    #[validate(range(min = 0.0))]
    pub modal_delay_min_ms: f64,
    #[validate(range(min = 0.0))]
    pub modal_delay_max_ms: f64,
    #[validate(range(min = 0.0))]
    pub toast_delay_min_ms: f64,
    #[validate(range(min = 0.0))]
    pub toast_delay_max_ms: f64,
    #[validate(range(min = 0.0))]
    pub skeleton_delay_min_ms: f64,
    #[validate(range(min = 0.0))]
    pub skeleton_delay_max_ms: f64,
}

impl Default for PolicySettings {
    fn default() -> Self {
        let policy = ChaosPolicy::default();
        Self {
            latency_min_ms: DEFAULT_LATENCY_MIN_MS,
            latency_max_ms: DEFAULT_LATENCY_MAX_MS,
            latency_jitter_ms: DEFAULT_LATENCY_JITTER_MS,
            error_rate: DEFAULT_ERROR_RATE,
            popup_threshold: DEFAULT_POPUP_THRESHOLD,
            modal_delay_min_ms: policy.modal_delay.min,
            modal_delay_max_ms: policy.modal_delay.max,
            toast_delay_min_ms: policy.toast_delay.min,
            toast_delay_max_ms: policy.toast_delay.max,
            skeleton_delay_min_ms: policy.skeleton_delay.min,
            skeleton_delay_max_ms: policy.skeleton_delay.max,
        }
    }
}

impl PolicySettings {
    /// Build a validated [`ChaosPolicy`]
    ///
    /// # Errors
    ///
    /// Returns an error when a value is out of range or a band is inverted.
    pub fn to_policy(&self) -> Result<ChaosPolicy, DomainError> {
        self.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let policy = ChaosPolicy {
            latency: LatencyProfile {
                min: self.latency_min_ms,
                max: self.latency_max_ms,
                jitter: self.latency_jitter_ms,
            },
            error_rate: self.error_rate,
            popup_threshold: self.popup_threshold,
            modal_delay: DelayBand::new(self.modal_delay_min_ms, self.modal_delay_max_ms),
            toast_delay: DelayBand::new(self.toast_delay_min_ms, self.toast_delay_max_ms),
            skeleton_delay: DelayBand::new(self.skeleton_delay_min_ms, self.skeleton_delay_max_ms),
        };
        policy.validate()?;
        Ok(policy)
    }
}
