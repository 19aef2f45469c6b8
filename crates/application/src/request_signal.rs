//! Chaos signal carried by an inbound request
//!
//! A request can ask for chaos through the `chaos` query parameter, pick a
//! seed through the `seed` query parameter, and hint a seed through the
//! `x-chaos-seed` header. `ChaosSignal` collects those raw values so the
//! derivation never has to know about HTTP.
//!
//! # Examples
//!
//! ```
//! use application::ChaosSignal;
//!
//! let signal = ChaosSignal::new()
//!     .with_chaos("1")
//!     .with_seed("test123");
//!
//! assert_eq!(signal.explicit_enabled(), Some(true));
//! assert_eq!(signal.seed(), Some("test123"));
//! ```

/// Query parameter that switches chaos on or off
pub const CHAOS_PARAM: &str = "chaos";
/// Query parameter carrying the explicit seed
pub const SEED_PARAM: &str = "seed";
/// Header carrying the seed hint
pub const SEED_HEADER: &str = "x-chaos-seed";

/// Raw chaos inputs of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChaosSignal {
    chaos: Option<String>,
    seed: Option<String>,
    seed_hint: Option<String>,
}

impl ChaosSignal {
    /// Create an empty signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw `chaos` parameter value
    #[must_use]
    pub fn with_chaos(mut self, value: impl Into<String>) -> Self {
        self.chaos = Some(value.into());
        self
    }

    /// Set the explicit seed
    #[must_use]
    pub fn with_seed(mut self, value: impl Into<String>) -> Self {
        self.seed = Some(value.into());
        self
    }

    /// Set the side-channel seed hint
    #[must_use]
    pub fn with_seed_hint(mut self, value: impl Into<String>) -> Self {
        self.seed_hint = Some(value.into());
        self
    }

    /// Explicit on/off request, `None` when the parameter is absent
    ///
    /// Only `"1"` and `"true"` enable chaos; any other present value disables it.
    pub fn explicit_enabled(&self) -> Option<bool> {
        self.chaos
            .as_deref()
            .map(|value| value == "1" || value == "true")
    }

    /// Explicit seed, if any
    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    /// Seed hint, if any
    pub fn seed_hint(&self) -> Option<&str> {
        self.seed_hint.as_deref()
    }
}
