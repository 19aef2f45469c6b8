//! Seeded decision engine
//!
//! Pure functions mapping `(seed, index)` to reproducible outcomes. There is no
//! hidden state, no clock and no counter: the same inputs give the same output
//! on every call and across process restarts.
//!
//! The generator folds the key `"{seed}-{index}"` into a wrapping 32-bit
//! accumulator (`h = h * 31 + unit` over UTF-16 code units) and maps the result
//! through `|sin(h)| mod 1`. It is not a statistically rigorous RNG; callers
//! only rely on determinism and on the output staying in `[0, 1)`.
//!
//! # Examples
//!
//! ```
//! use domain::decision::{should_trigger, unit_random};
//!
//! let a = unit_random("abc", 5);
//! let b = unit_random("abc", 5);
//! assert_eq!(a.to_bits(), b.to_bits());
//! assert!((0.0..1.0).contains(&a));
//!
//! assert!(!should_trigger("abc", 0.0, 7));
//! assert!(should_trigger("abc", 1.0, 7));
//! ```

use crate::value_objects::{DecisionSlot, DelayBand, LatencyProfile, Seed};

/// Fold a key into a wrapping 32-bit signed accumulator
fn fold_key(key: &str) -> i32 {
    key.encode_utf16().fold(0_i32, |hash, unit| {
        (hash << 5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Deterministic real number in `[0, 1)` for `(seed, index)`
pub fn unit_random(seed: &str, index: u64) -> f64 {
    let hash = fold_key(&format!("{seed}-{index}"));
    // |sin| is at most 1.0; the modulo folds that single edge back to 0.
    f64::from(hash).sin().abs() % 1.0
}

/// Deterministic real number in `[min, max]` for `(seed, index)`
///
/// `min == max` returns that constant. Inverted bounds produce a value
/// between `max` and `min` instead of failing.
pub fn ranged_random(seed: &str, min: f64, max: f64, index: u64) -> f64 {
    let value = unit_random(seed, index).mul_add(max - min, min);
    if min <= max {
        value.clamp(min, max)
    } else {
        value
    }
}

/// Whether a simulated failure fires for `(seed, index)`
///
/// Non-positive (or NaN) rates never fire; a rate of `1.0` always fires.
pub fn should_trigger(seed: &str, error_rate: f64, index: u64) -> bool {
    if error_rate.is_nan() || error_rate <= 0.0 {
        return false;
    }
    unit_random(seed, index) < error_rate
}

/// Simulated network latency in milliseconds, never negative
///
/// The jitter draw uses `index * 2` so it does not reuse the base draw.
pub fn network_latency(seed: &str, profile: &LatencyProfile, index: u64) -> f64 {
    let base = ranged_random(seed, profile.min, profile.max, index);
    let jitter = ranged_random(seed, -profile.jitter, profile.jitter, index.wrapping_mul(2));
    (base + jitter).max(0.0)
}

/// Slot-addressed view of the engine for one seed
#[derive(Debug, Clone, Copy)]
pub struct SeededDecisions<'a> {
    seed: &'a str,
}

impl<'a> SeededDecisions<'a> {
    /// Bind the engine to a seed
    pub fn new(seed: &'a Seed) -> Self {
        Self {
            seed: seed.as_str(),
        }
    }

    /// Real number in `[0, 1)` for the slot
    pub fn unit(&self, slot: DecisionSlot) -> f64 {
        unit_random(self.seed, slot.index())
    }

    /// Real number in `[min, max]` for the slot
    pub fn ranged(&self, min: f64, max: f64, slot: DecisionSlot) -> f64 {
        ranged_random(self.seed, min, max, slot.index())
    }

    /// Real number drawn from a delay band for the slot
    pub fn within(&self, band: DelayBand, slot: DecisionSlot) -> f64 {
        self.ranged(band.min, band.max, slot)
    }

    /// Whether a failure with the given rate fires for the slot
    pub fn trigger(&self, error_rate: f64, slot: DecisionSlot) -> bool {
        should_trigger(self.seed, error_rate, slot.index())
    }
}
