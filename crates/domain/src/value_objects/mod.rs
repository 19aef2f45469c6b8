//! Value Objects - Immutable, identity-less domain primitives

mod chaos_configuration;
mod chaos_policy;
mod decision_slot;
mod latency_profile;
mod seed;

pub use chaos_configuration::ChaosConfiguration;
pub use chaos_policy::{
    ChaosPolicy, DEFAULT_ERROR_RATE, DEFAULT_LATENCY_JITTER_MS, DEFAULT_LATENCY_MAX_MS,
    DEFAULT_LATENCY_MIN_MS, DEFAULT_POPUP_THRESHOLD, DelayBand,
};
pub use decision_slot::DecisionSlot;
pub use latency_profile::LatencyProfile;
pub use seed::Seed;
