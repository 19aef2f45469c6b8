//! Application layer - Use cases and orchestration
//!
//! Derives chaos configurations from request signals, holds the current
//! configuration, and runs seeded delay and failure simulation. Knows nothing
//! about HTTP or configuration files.

pub mod error;
pub mod request_signal;
pub mod services;

pub use error::ApplicationError;
pub use request_signal::{CHAOS_PARAM, ChaosSignal, SEED_HEADER, SEED_PARAM};
pub use services::*;
