//! Health check handler

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::common::no_store;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Response {
    no_store(
        Json(HealthResponse {
            status: "ok".to_string(),
        })
        .into_response(),
    )
}
