//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
///
/// The decision engine itself never fails; these errors only surface when
/// a seed or a chaos policy is constructed from untrusted input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Seed was empty
    #[error("Invalid seed: seed must not be empty")]
    EmptySeed,

    /// Latency bounds are negative or inverted
    #[error("Invalid latency: {0}")]
    InvalidLatency(String),

    /// Error rate outside of [0, 1]
    #[error("Invalid error rate: {0} (must be between 0 and 1)")]
    InvalidErrorRate(f64),

    /// A per-feature delay band is negative or inverted
    #[error("Invalid delay band for {field}: min={min}, max={max}")]
    InvalidDelayBand { field: String, min: f64, max: f64 },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid delay band error
    pub fn delay_band(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self::InvalidDelayBand {
            field: field.into(),
            min,
            max,
        }
    }
}
