//! Network latency profile value object

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Network latency bounds in milliseconds
///
/// Jitter is symmetric: a draw lands in `[-jitter, +jitter]` and is added to
/// the base latency. The fields are public so the decision engine can be fed
/// arbitrary (even inverted) bounds; use [`LatencyProfile::new`] when the
/// input comes from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyProfile {
    /// Lower bound of the base latency
    pub min: f64,
    /// Upper bound of the base latency
    pub max: f64,
    /// Symmetric jitter amplitude
    pub jitter: f64,
}

impl LatencyProfile {
    /// Profile that never adds latency
    pub const NONE: Self = Self {
        min: 0.0,
        max: 0.0,
        jitter: 0.0,
    };

    /// Create a validated latency profile
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLatency` if any bound is negative or not
    /// finite, or if `min > max`.
    pub fn new(min: f64, max: f64, jitter: f64) -> Result<Self, DomainError> {
        let profile = Self { min, max, jitter };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the profile invariants
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [("min", self.min), ("max", self.max), ("jitter", self.jitter)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidLatency(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.min > self.max {
            return Err(DomainError::InvalidLatency(format!(
                "min ({}) exceeds max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Whether this profile can ever produce a non-zero delay
    pub fn is_none(&self) -> bool {
        self.max <= 0.0 && self.jitter <= 0.0
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_all_zero() {
        let profile = LatencyProfile::NONE;
        assert!(profile.min.abs() < f64::EPSILON);
        assert!(profile.max.abs() < f64::EPSILON);
        assert!(profile.jitter.abs() < f64::EPSILON);
        assert!(profile.is_none());
    }

    #[test]
    fn valid_profile() {
        let profile = LatencyProfile::new(100.0, 2000.0, 200.0).unwrap();
        assert!(!profile.is_none());
    }

    #[test]
    fn degenerate_profile_is_valid() {
        assert!(LatencyProfile::new(50.0, 50.0, 0.0).is_ok());
    }

    #[test]
    fn negative_bounds_rejected() {
        assert!(LatencyProfile::new(-1.0, 10.0, 0.0).is_err());
        assert!(LatencyProfile::new(0.0, -10.0, 0.0).is_err());
        assert!(LatencyProfile::new(0.0, 10.0, -5.0).is_err());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = LatencyProfile::new(500.0, 100.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn non_finite_rejected() {
        assert!(LatencyProfile::new(f64::NAN, 10.0, 0.0).is_err());
        assert!(LatencyProfile::new(0.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn serializes_as_flat_object() {
        let profile = LatencyProfile::new(100.0, 2000.0, 200.0).unwrap();
        let json = serde_json::to_value(profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"min": 100.0, "max": 2000.0, "jitter": 200.0})
        );
    }
}
