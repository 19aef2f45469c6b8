//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and logging settings
//! - `chaos`: default toggle and chaos policy
//! - `training`: training token and session lifetime
//! - `rate_limit`: reset endpoint limits
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, then `CHAOS_*` environment variables with `__` between
//! nested keys (e.g. `CHAOS_SERVER__PORT=8080`).

mod chaos;
mod rate_limit;
mod server;
mod training;

use std::fmt;
use std::path::Path;

use application::{ApplicationError, ChaosDerivation};
use domain::ChaosPolicy;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use chaos::{ChaosAppConfig, PolicySettings};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use training::TrainingConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "CHAOS";

/// Application environment (development or production)
///
/// Production hides chaos controls from callers without training access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - chaos controls open to everyone
    #[default]
    Development,
    /// Production environment - chaos controls require training access
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chaos toggle and policy
    #[serde(default)]
    pub chaos: ChaosAppConfig,

    /// Training access
    #[serde(default)]
    pub training: TrainingConfig,

    /// Reset endpoint rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::with_name("config").required(false))
    }

    /// Load configuration from environment and the given file
    pub fn load_from_path(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with(config::File::from(path))
    }

    fn load_with<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        // Defaults come from the serde attributes on each section
        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., CHAOS_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Whether the production environment is active
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate the configuration and return the chaos policy
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the policy is out of range.
    pub fn validate(&self) -> Result<ChaosPolicy, ApplicationError> {
        let policy = self
            .chaos
            .policy
            .to_policy()
            .map_err(|e| ApplicationError::Configuration(format!("chaos.policy: {e}")))?;

        if self.is_production() && self.training.token_str().is_none() {
            warn!("No training token configured; internal routes are unreachable in production");
        }
        Ok(policy)
    }

    /// Build the request derivation for this configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the policy is out of range.
    pub fn derivation(&self) -> Result<ChaosDerivation, ApplicationError> {
        let policy = self.validate()?;
        Ok(ChaosDerivation::new(policy)
            .with_default_enabled(self.chaos.default_enabled)
            .with_hide_unauthorized(self.is_production()))
    }
}
