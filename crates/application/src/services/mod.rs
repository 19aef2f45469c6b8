//! Application services - chaos state, derivation and simulation

mod chaos_state;
mod derivation;
mod simulation;

pub use chaos_state::ChaosState;
pub use derivation::{ChaosDerivation, FeatureOverrides, derive_configuration};
pub use simulation::{DecisionSequence, simulate_delay};
