//! Application state shared across handlers

use std::sync::Arc;

use application::{ChaosDerivation, ChaosState};
use infrastructure::AppConfig;

use crate::middleware::FixedWindowLimiter;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Process-wide chaos slot
    pub chaos_state: ChaosState,
    /// Derives per-request configurations
    pub derivation: Arc<ChaosDerivation>,
    /// Limits `/api/reset` per client
    pub reset_limiter: Arc<FixedWindowLimiter>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state for a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the chaos policy is invalid.
    pub fn from_config(config: AppConfig) -> Result<Self, application::ApplicationError> {
        let derivation = config.derivation()?;
        let reset_limiter = FixedWindowLimiter::new(
            config.rate_limit.reset_limit,
            config.rate_limit.reset_window(),
        );
        Ok(Self {
            chaos_state: ChaosState::new(),
            derivation: Arc::new(derivation),
            reset_limiter: Arc::new(reset_limiter),
            config: Arc::new(config),
        })
    }
}
