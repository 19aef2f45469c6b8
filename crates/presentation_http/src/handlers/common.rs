//! Shared helpers for HTTP handlers
//!
//! Every handler that needs chaos derives its own configuration from the
//! request through [`RequestChaos`]; the shared slot is only touched by the
//! internal routes.

use std::convert::Infallible;

use application::{ChaosSignal, SEED_HEADER};
use axum::{
    extract::{FromRequestParts, Query},
    http::{HeaderMap, HeaderValue, header, request::Parts},
    response::Response,
};
use domain::ChaosConfiguration;
use serde::Deserialize;

use crate::{middleware::TrainingAccess, state::AppState};

/// Chaos query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChaosQuery {
    pub chaos: Option<String>,
    pub seed: Option<String>,
}

/// Collect the chaos signal of a request
pub fn chaos_signal(query: &ChaosQuery, headers: &HeaderMap) -> ChaosSignal {
    let mut signal = ChaosSignal::new();
    if let Some(chaos) = &query.chaos {
        signal = signal.with_chaos(chaos.clone());
    }
    if let Some(seed) = &query.seed {
        signal = signal.with_seed(seed.clone());
    }
    if let Some(hint) = headers.get(SEED_HEADER).and_then(|v| v.to_str().ok()) {
        signal = signal.with_seed_hint(hint);
    }
    signal
}

/// Configuration derived for the current request
#[derive(Debug, Clone)]
pub struct RequestChaos {
    pub config: ChaosConfiguration,
}

impl FromRequestParts<AppState> for RequestChaos {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A malformed query string carries no usable chaos signal
        let query = Query::<ChaosQuery>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();
        let access = parts
            .extensions
            .get::<TrainingAccess>()
            .copied()
            .unwrap_or_default();

        let signal = chaos_signal(&query, &parts.headers);
        let config = state.derivation.from_signal(&signal, access.authorized);
        Ok(Self { config })
    }
}

/// Mark a response as uncacheable
pub fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
