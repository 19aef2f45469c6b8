//! Internal diagnostic handlers
//!
//! Reachable only with training access; the middleware answers 404 otherwise.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use domain::ChaosConfiguration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::common::{RequestChaos, no_store};
use crate::{
    error::ApiError,
    middleware::{TrainingAccess, client_ip},
    state::AppState,
};

/// Diagnostic snapshot of the chaos state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    /// Configuration derived from this request
    pub chaos: ChaosConfiguration,
    /// Configuration held by the shared slot
    pub active: ChaosConfiguration,
    /// RFC 3339 timestamp of the snapshot
    pub timestamp: String,
}

/// Reset confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Training identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub authorized: bool,
}

/// Show the derived and the shared configuration
pub async fn chaos_state(State(state): State<AppState>, chaos: RequestChaos) -> Response {
    let active = state.chaos_state.get();
    no_store(
        Json(StateResponse {
            chaos: chaos.config,
            active: (*active).clone(),
            timestamp: Utc::now().to_rfc3339(),
        })
        .into_response(),
    )
}

/// Derive a configuration from the request and make it the shared one
pub async fn activate_chaos(State(state): State<AppState>, chaos: RequestChaos) -> Response {
    state.chaos_state.set(chaos.config.clone());
    no_store(Json(chaos.config).into_response())
}

/// Return the shared slot to neutral
pub async fn reset_chaos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let ip = client_ip(&headers);
    let decision = state.reset_limiter.check(&format!("reset:{ip}"));
    if !decision.allowed {
        debug!(ip = %ip, "Reset rate limited");
        return Err(ApiError::RateLimited {
            retry_after: decision.reset_in,
        });
    }

    state.chaos_state.reset();
    info!(ip = %ip, remaining = decision.remaining, "Chaos state reset requested");

    let mut response = no_store(
        Json(ResetResponse {
            success: true,
            message: "Chaos state reset".to_string(),
        })
        .into_response(),
    );
    let response_headers = response.headers_mut();
    response_headers.insert(
        "clear-site-data",
        HeaderValue::from_static("\"cache\", \"cookies\", \"storage\""),
    );
    response_headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    Ok(response)
}

/// Confirm training access
pub async fn whoami(Extension(access): Extension<TrainingAccess>) -> Response {
    no_store(
        Json(WhoAmIResponse {
            authorized: access.authorized,
        })
        .into_response(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_response_shape() {
        let json = serde_json::to_value(ResetResponse {
            success: true,
            message: "Chaos state reset".to_string(),
        })
        .unwrap();
        assert_eq!(json["success"], true);
    }

    #[test]
    fn whoami_shape() {
        let json = serde_json::to_string(&WhoAmIResponse { authorized: true }).unwrap();
        assert_eq!(json, r#"{"authorized":true}"#);
    }
}
