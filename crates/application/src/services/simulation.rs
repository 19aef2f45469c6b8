//! Delay and failure simulation primitives
//!
//! [`simulate_delay`] suspends the calling task for a seeded network latency.
//! [`DecisionSequence`] hands out the decision slots of one logical operation
//! in a fixed order (first delay, then error check, ...), so replaying an
//! operation with the same seed replays the same outcomes.
//!
//! # Examples
//!
//! ```
//! use application::{DecisionSequence, derive_configuration};
//!
//! # tokio_test_block(async {
//! let config = derive_configuration(false, None, None);
//! let mut sequence = DecisionSequence::new(&config);
//! let delay = sequence.delay().await;
//! assert!(delay.is_zero());
//! assert!(!sequence.should_fail());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(f)
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use domain::{ChaosConfiguration, DecisionSlot, SeededDecisions, network_latency};
use tracing::{debug, warn};

use crate::ApplicationError;

/// Convert seeded milliseconds into a sleep duration
fn millis_to_duration(millis: f64) -> Duration {
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or_default()
}

/// Suspend for the seeded network latency of `(seed, index)`
///
/// Returns immediately when chaos is disabled or the latency ceiling is zero.
/// Once started the wait always runs to completion. Returns the applied delay.
pub async fn simulate_delay(seed: &str, config: &ChaosConfiguration, index: u64) -> Duration {
    if !config.enabled || config.network_latency.max <= 0.0 {
        return Duration::ZERO;
    }

    let millis = network_latency(seed, &config.network_latency, index);
    let delay = millis_to_duration(millis);
    debug!(seed, index, delay_ms = millis, "Simulating network delay");
    tokio::time::sleep(delay).await;
    delay
}

/// Ordered decision slots of one logical operation
///
/// Every call consumes the next step, whether or not chaos is enabled, so
/// the step numbering never depends on runtime state.
#[derive(Debug)]
pub struct DecisionSequence<'a> {
    config: &'a ChaosConfiguration,
    next_step: u32,
}

impl<'a> DecisionSequence<'a> {
    /// Start a sequence at step 1
    pub const fn new(config: &'a ChaosConfiguration) -> Self {
        Self {
            config,
            next_step: 1,
        }
    }

    /// The configuration this sequence draws from
    pub const fn config(&self) -> &'a ChaosConfiguration {
        self.config
    }

    /// Step the next call will use
    pub const fn next_step(&self) -> u32 {
        self.next_step
    }

    fn advance(&mut self) -> u32 {
        let step = self.next_step;
        self.next_step = step.wrapping_add(1);
        step
    }

    /// Simulate the network delay of the next step
    pub async fn delay(&mut self) -> Duration {
        let slot = DecisionSlot::NetworkDelay(self.advance());
        simulate_delay(self.config.seed.as_str(), self.config, slot.index()).await
    }

    /// Decide whether the next step fails at the configured error rate
    pub fn should_fail(&mut self) -> bool {
        self.should_fail_with_rate(self.config.error_rate)
    }

    /// Decide whether the next step fails at a custom error rate
    pub fn should_fail_with_rate(&mut self, error_rate: f64) -> bool {
        let slot = DecisionSlot::ErrorTrigger(self.advance());
        self.config.enabled && SeededDecisions::new(&self.config.seed).trigger(error_rate, slot)
    }

    /// Delay, then decide whether the operation fails
    pub async fn guard(&mut self, operation: &str) -> Result<Duration, ApplicationError> {
        let delay = self.delay().await;
        if self.should_fail() {
            warn!(
                operation,
                seed = %self.config.seed,
                "Injecting simulated failure"
            );
            return Err(ApplicationError::simulated(operation));
        }
        Ok(delay)
    }

    /// Guard an operation, running it only when no failure is injected
    pub async fn wrap<F, T>(&mut self, operation: &str, future: F) -> Result<T, ApplicationError>
    where
        F: Future<Output = Result<T, ApplicationError>>,
    {
        self.guard(operation).await?;
        future.await
    }
}
