//! API error handling
//!
//! Maps application errors onto HTTP responses with a small JSON body.
//! Hidden routes answer with a bare 404 so their existence is not revealed.

use std::time::Duration;

use application::ApplicationError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal route requested without training access
    #[error("Not found")]
    Hidden,

    #[error("Rate limited")]
    RateLimited { retry_after: Duration },

    /// A chaos decision failed the operation
    #[error("Simulated failure: {0}")]
    SimulatedFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Whole seconds a client should wait, rounded up
    fn retry_after_secs(retry_after: Duration) -> u64 {
        let secs = retry_after.as_secs();
        if retry_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Hidden => return StatusCode::NOT_FOUND.into_response(),
            Self::RateLimited { retry_after } => {
                let body = ErrorResponse {
                    error: "rate_limited".to_string(),
                    code: "rate_limited".to_string(),
                };
                let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                let headers = response.headers_mut();
                headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
                headers.insert(
                    header::RETRY_AFTER,
                    HeaderValue::from(Self::retry_after_secs(*retry_after)),
                );
                return response;
            },
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            Self::SimulatedFailure(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "simulated_failure",
                msg.clone(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::SimulatedFailure { operation } => {
                Self::SimulatedFailure(format!("Simulated server error in {operation}"))
            },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("invalid input".to_string()).to_string(),
            "Bad request: invalid input"
        );
        assert_eq!(
            ApiError::NotFound("product 99".to_string()).to_string(),
            "Not found: product 99"
        );
        assert_eq!(ApiError::Hidden.to_string(), "Not found");
    }

    #[tokio::test]
    async fn hidden_is_bare_not_found() {
        let response = ApiError::Hidden.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn rate_limited_sets_retry_after() {
        let response = ApiError::RateLimited {
            retry_after: Duration::from_millis(12_300),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "13");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
        let body = body_json(response).await;
        assert_eq!(body["error"], "rate_limited");
    }

    #[test]
    fn retry_after_rounds_up() {
        assert_eq!(ApiError::retry_after_secs(Duration::from_secs(60)), 60);
        assert_eq!(ApiError::retry_after_secs(Duration::from_millis(1)), 1);
        assert_eq!(ApiError::retry_after_secs(Duration::ZERO), 0);
    }

    #[tokio::test]
    async fn simulated_failure_is_server_error() {
        let err: ApiError = ApplicationError::simulated("list_products").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "simulated_failure");
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = ApiError::Internal("secret detail".to_string()).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "An internal error occurred");
    }
}
