//! Telemetry infrastructure
//!
//! Structured logging setup for the server binary.

mod logging;

pub use logging::{LogFormat, TelemetryError, init_logging};
