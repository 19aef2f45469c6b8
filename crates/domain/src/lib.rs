//! Domain layer for the chaos engine
//!
//! Contains the seeded decision engine, the chaos configuration model and
//! its policy, and domain errors. Everything here is pure: no I/O, no clock,
//! no shared state.

pub mod decision;
pub mod errors;
pub mod value_objects;

pub use decision::{SeededDecisions, network_latency, ranged_random, should_trigger, unit_random};
pub use errors::DomainError;
pub use value_objects::*;
