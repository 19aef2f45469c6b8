//! Process-wide chaos state
//!
//! A single slot holding the current [`ChaosConfiguration`]. The slot is an
//! explicitly constructed context owned by the composition root and handed to
//! whoever needs "the current chaos profile"; tests build isolated instances.
//!
//! Writes replace the configuration wholesale and the last writer wins.
//! Concurrent `set` calls race with no ordering guarantee, and the slot only
//! lives in this process. Callers that need per-request isolation derive a
//! fresh configuration and pass it explicitly instead of reading the slot.

use std::sync::Arc;

use arc_swap::ArcSwap;
use domain::ChaosConfiguration;
use tracing::info;

/// Shared slot for the current chaos configuration
#[derive(Debug, Clone)]
pub struct ChaosState {
    inner: Arc<ArcSwap<ChaosConfiguration>>,
}

impl Default for ChaosState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChaosState {
    /// Create a slot holding the neutral configuration
    pub fn new() -> Self {
        Self::with_config(ChaosConfiguration::default())
    }

    /// Create a slot holding the given configuration
    pub fn with_config(config: ChaosConfiguration) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Get the current configuration
    pub fn get(&self) -> Arc<ChaosConfiguration> {
        self.inner.load_full()
    }

    /// Replace the current configuration
    pub fn set(&self, config: ChaosConfiguration) {
        info!(
            seed = %config.seed,
            enabled = config.enabled,
            "Chaos state replaced"
        );
        self.inner.store(Arc::new(config));
    }

    /// Return the slot to the neutral configuration
    pub fn reset(&self) {
        self.inner.store(Arc::new(ChaosConfiguration::default()));
        info!("Chaos state reset");
    }
}

#[cfg(test)]
mod tests {
    use domain::Seed;

    use super::*;
    use crate::derive_configuration;

    #[test]
    fn starts_neutral() {
        let state = ChaosState::new();
        let config = state.get();
        assert!(config.is_neutral());
        assert_eq!(config.seed.as_str(), "default");
    }

    #[test]
    fn set_replaces_wholesale() {
        let state = ChaosState::new();
        let config = derive_configuration(true, Some("test123"), None);
        state.set(config.clone());
        assert_eq!(*state.get(), config);
    }

    #[test]
    fn last_writer_wins() {
        let state = ChaosState::new();
        state.set(derive_configuration(true, Some("first"), None));
        state.set(derive_configuration(true, Some("second"), None));
        assert_eq!(state.get().seed.as_str(), "second");
    }

    #[test]
    fn reset_returns_to_neutral() {
        let state = ChaosState::new();
        state.set(derive_configuration(true, Some("abc"), None));
        state.reset();
        let config = state.get();
        assert!(!config.enabled);
        assert!(config.is_neutral());
        assert_eq!(config.seed.as_str(), "default");
    }

    #[test]
    fn reset_is_idempotent() {
        let state = ChaosState::new();
        state.reset();
        state.reset();
        assert_eq!(*state.get(), ChaosConfiguration::default());
    }

    #[test]
    fn clones_share_the_slot() {
        let state = ChaosState::new();
        let other = state.clone();
        other.set(ChaosConfiguration::neutral(Seed::new("shared").unwrap()));
        assert_eq!(state.get().seed.as_str(), "shared");
    }

    #[test]
    fn separate_instances_are_isolated() {
        let a = ChaosState::new();
        let b = ChaosState::new();
        a.set(derive_configuration(true, Some("a"), None));
        assert!(b.get().is_neutral());
    }

    #[test]
    fn held_snapshot_survives_replacement() {
        let state = ChaosState::new();
        state.set(derive_configuration(true, Some("old"), None));
        let snapshot = state.get();
        state.reset();
        assert_eq!(snapshot.seed.as_str(), "old");
        assert!(state.get().is_neutral());
    }
}
