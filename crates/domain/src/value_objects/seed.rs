//! Seed value object
//!
//! A seed is the reproducibility key of a chaos session. Two sessions with the
//! same seed replay the same decisions for the same decision slots.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Seed;
//!
//! let seed = Seed::new("test123").expect("valid seed");
//! assert_eq!(seed.as_str(), "test123");
//!
//! // Empty seeds are rejected
//! assert!(Seed::new("").is_err());
//!
//! // Resolution falls back to the default seed
//! assert_eq!(Seed::resolve(None, None).as_str(), "default");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Non-empty reproducibility key for chaos decisions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(String);

impl Seed {
    /// Seed used when a request carries none
    pub const DEFAULT: &'static str = "default";

    /// Create a seed, rejecting empty strings
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::EmptySeed);
        }
        Ok(Self(value))
    }

    /// Resolve a seed from an explicit value and a side-channel hint
    ///
    /// The explicit value wins, the hint is the fallback, and absence of both
    /// (empty strings count as absent) yields [`Seed::DEFAULT`].
    pub fn resolve(explicit: Option<&str>, hint: Option<&str>) -> Self {
        explicit
            .filter(|s| !s.is_empty())
            .or_else(|| hint.filter(|s| !s.is_empty()))
            .map_or_else(Self::default, |s| Self(s.to_string()))
    }

    /// Get the seed as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Seed {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Seed {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_is_default() {
        assert_eq!(Seed::default().as_str(), "default");
    }

    #[test]
    fn empty_seed_rejected() {
        assert_eq!(Seed::new(""), Err(DomainError::EmptySeed));
    }

    #[test]
    fn explicit_seed_wins_over_hint() {
        let seed = Seed::resolve(Some("explicit"), Some("hint"));
        assert_eq!(seed.as_str(), "explicit");
    }

    #[test]
    fn hint_is_fallback() {
        assert_eq!(Seed::resolve(None, Some("hint")).as_str(), "hint");
        assert_eq!(Seed::resolve(Some(""), Some("hint")).as_str(), "hint");
    }

    #[test]
    fn absent_seed_resolves_to_default() {
        assert_eq!(Seed::resolve(None, None).as_str(), "default");
        assert_eq!(Seed::resolve(Some(""), Some("")).as_str(), "default");
    }

    #[test]
    fn seed_serializes_as_plain_string() {
        let seed = Seed::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&seed).unwrap(), "\"abc\"");
    }

    #[test]
    fn empty_seed_fails_to_deserialize() {
        let result: Result<Seed, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn seed_display() {
        let seed = Seed::new("repro123").unwrap();
        assert_eq!(format!("{seed}"), "repro123");
    }
}
