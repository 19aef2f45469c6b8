//! Chaos configuration value object
//!
//! The full perturbation profile of a session. A configuration is produced
//! fresh by derivation and replaced wholesale, never patched in place.
//!
//! The serialized shape is a flat camelCase JSON object and is consumed by
//! clients that parse it field by field:
//!
//! ```json
//! {
//!   "seed": "default",
//!   "enabled": false,
//!   "networkLatency": { "min": 0, "max": 0, "jitter": 0 },
//!   "errorRate": 0,
//!   "popupOverlay": false,
//!   "modalDelay": 0,
//!   "toastDelay": 0,
//!   "skeletonDelay": 0
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{LatencyProfile, Seed};

/// Active perturbation profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaosConfiguration {
    /// Reproducibility key
    pub seed: Seed,
    /// Master switch
    pub enabled: bool,
    /// Latency bounds for simulated network calls
    pub network_latency: LatencyProfile,
    /// Probability that an eligible operation is forced to fail
    pub error_rate: f64,
    /// Whether the unsolicited overlay is armed
    pub popup_overlay: bool,
    /// Base milliseconds added to modal animations
    pub modal_delay: f64,
    /// Base milliseconds added to toast notifications
    pub toast_delay: f64,
    /// Base milliseconds added to skeleton loaders
    pub skeleton_delay: f64,
}

impl ChaosConfiguration {
    /// Neutral configuration: disabled, every perturbation zeroed
    pub fn neutral(seed: Seed) -> Self {
        Self {
            seed,
            enabled: false,
            network_latency: LatencyProfile::NONE,
            error_rate: 0.0,
            popup_overlay: false,
            modal_delay: 0.0,
            toast_delay: 0.0,
            skeleton_delay: 0.0,
        }
    }

    /// Whether no perturbation can fire under this configuration
    pub fn is_neutral(&self) -> bool {
        !self.enabled
            && self.network_latency.is_none()
            && self.error_rate <= 0.0
            && !self.popup_overlay
            && self.modal_delay <= 0.0
            && self.toast_delay <= 0.0
            && self.skeleton_delay <= 0.0
    }
}

impl Default for ChaosConfiguration {
    fn default() -> Self {
        Self::neutral(Seed::default())
    }
}
