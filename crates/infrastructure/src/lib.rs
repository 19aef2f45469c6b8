//! Infrastructure layer - configuration and telemetry
//!
//! Loads [`AppConfig`] from defaults, files and the environment, and
//! installs the tracing subscriber.

pub mod config;
pub mod telemetry;

pub use config::{
    AppConfig, ChaosAppConfig, Environment, PolicySettings, RateLimitConfig, ServerConfig,
    TrainingConfig,
};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
