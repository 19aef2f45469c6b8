//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A chaos decision asked the caller to fail this operation
    #[error("Simulated failure in {operation}")]
    SimulatedFailure { operation: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a simulated failure for the named operation
    pub fn simulated(operation: impl Into<String>) -> Self {
        Self::SimulatedFailure {
            operation: operation.into(),
        }
    }

    /// Whether this error was injected on purpose
    pub const fn is_simulated(&self) -> bool {
        matches!(self, Self::SimulatedFailure { .. })
    }
}
