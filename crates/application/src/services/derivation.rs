//! Configuration derivation
//!
//! Turns an on/off flag and a seed into a full [`ChaosConfiguration`]. When
//! chaos is on, latency bounds and error rate come straight from the
//! [`ChaosPolicy`]; the overlay toggle and the per-feature delays are drawn
//! from the seed at their pinned decision slots, so the same seed always
//! derives the same configuration.
//!
//! # Examples
//!
//! ```
//! use application::derive_configuration;
//!
//! let config = derive_configuration(true, Some("test123"), None);
//! assert!(config.enabled);
//! assert!((config.error_rate - 0.1).abs() < f64::EPSILON);
//!
//! let again = derive_configuration(true, Some("test123"), None);
//! assert_eq!(config, again);
//! ```

use domain::{ChaosConfiguration, ChaosPolicy, DecisionSlot, Seed, SeededDecisions};
use tracing::debug;

use crate::ChaosSignal;

/// Optional per-field replacements applied after derivation
///
/// Overrides only touch an enabled configuration; a disabled one stays
/// neutral. Negative delays are clamped to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureOverrides {
    /// Force the overlay on or off
    pub popup_overlay: Option<bool>,
    /// Replace the modal base delay
    pub modal_delay: Option<f64>,
    /// Replace the toast base delay
    pub toast_delay: Option<f64>,
    /// Replace the skeleton base delay
    pub skeleton_delay: Option<f64>,
}

impl FeatureOverrides {
    /// No overrides
    pub const NONE: Self = Self {
        popup_overlay: None,
        modal_delay: None,
        toast_delay: None,
        skeleton_delay: None,
    };

    fn apply(&self, config: &mut ChaosConfiguration) {
        if let Some(popup) = self.popup_overlay {
            config.popup_overlay = popup;
        }
        if let Some(delay) = self.modal_delay {
            config.modal_delay = delay.max(0.0);
        }
        if let Some(delay) = self.toast_delay {
            config.toast_delay = delay.max(0.0);
        }
        if let Some(delay) = self.skeleton_delay {
            config.skeleton_delay = delay.max(0.0);
        }
    }
}

/// Derives chaos configurations from request-like input
#[derive(Debug, Clone, Default)]
pub struct ChaosDerivation {
    policy: ChaosPolicy,
    default_enabled: bool,
    hide_unauthorized: bool,
}

impl ChaosDerivation {
    /// Create a derivation with the given policy
    pub fn new(policy: ChaosPolicy) -> Self {
        Self {
            policy,
            default_enabled: false,
            hide_unauthorized: false,
        }
    }

    /// Enable chaos when a signal carries no explicit `chaos` parameter
    #[must_use]
    pub const fn with_default_enabled(mut self, default_enabled: bool) -> Self {
        self.default_enabled = default_enabled;
        self
    }

    /// Discard the whole signal of unauthorized callers
    #[must_use]
    pub const fn with_hide_unauthorized(mut self, hide: bool) -> Self {
        self.hide_unauthorized = hide;
        self
    }

    /// The policy applied to enabled configurations
    pub const fn policy(&self) -> &ChaosPolicy {
        &self.policy
    }

    /// Derive a configuration from an explicit flag and seed sources
    pub fn derive(
        &self,
        enabled: bool,
        seed: Option<&str>,
        seed_hint: Option<&str>,
        overrides: &FeatureOverrides,
    ) -> ChaosConfiguration {
        let seed = Seed::resolve(seed, seed_hint);
        if !enabled {
            return ChaosConfiguration::neutral(seed);
        }

        let policy = &self.policy;
        let decisions = SeededDecisions::new(&seed);
        let popup_overlay = decisions.unit(DecisionSlot::PopupOverlay) > policy.popup_threshold;
        let modal_delay = decisions.within(policy.modal_delay, DecisionSlot::ModalDelay);
        let toast_delay = decisions.within(policy.toast_delay, DecisionSlot::ToastDelay);
        let skeleton_delay = decisions.within(policy.skeleton_delay, DecisionSlot::SkeletonDelay);

        let mut config = ChaosConfiguration {
            seed,
            enabled: true,
            network_latency: policy.latency,
            error_rate: policy.error_rate,
            popup_overlay,
            modal_delay,
            toast_delay,
            skeleton_delay,
        };
        overrides.apply(&mut config);
        config
    }

    /// Derive a configuration from a request signal
    ///
    /// `authorized` is decided by the caller; this layer never inspects
    /// credentials.
    pub fn from_signal(&self, signal: &ChaosSignal, authorized: bool) -> ChaosConfiguration {
        let hidden = self.hide_unauthorized && !authorized;
        let empty = ChaosSignal::new();
        let signal = if hidden { &empty } else { signal };

        let enabled = signal.explicit_enabled().unwrap_or(self.default_enabled);
        let config = self.derive(
            enabled,
            signal.seed(),
            signal.seed_hint(),
            &FeatureOverrides::NONE,
        );

        debug!(
            seed = %config.seed,
            enabled = config.enabled,
            hidden,
            "Derived chaos configuration"
        );
        config
    }
}

/// Derive a configuration with the default policy
pub fn derive_configuration(
    enabled: bool,
    seed: Option<&str>,
    seed_hint: Option<&str>,
) -> ChaosConfiguration {
    ChaosDerivation::default().derive(enabled, seed, seed_hint, &FeatureOverrides::NONE)
}
