//! Training access middleware
//!
//! Gates internal diagnostic routes behind a shared training token. The token
//! may arrive in the `x-training-token` header, the `training_token` query
//! parameter, or the `training_session` cookie; comparison is constant time.
//!
//! A token in the query string is never passed through: the request is
//! redirected to the same URL without it, and a valid token is turned into an
//! HttpOnly session cookie on the way. Unauthorized requests to internal
//! routes get a bare 404. Every other request carries a [`TrainingAccess`]
//! extension telling handlers whether the caller is authorized.

use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::{Query, Request},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use infrastructure::TrainingConfig;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Header carrying the training token
pub const TOKEN_HEADER: &str = "x-training-token";
/// Query parameter carrying the training token
pub const TOKEN_QUERY_PARAM: &str = "training_token";
/// Cookie holding the training session
pub const SESSION_COOKIE: &str = "training_session";

/// Routes that only exist for authorized callers
pub const INTERNAL_PATHS: [&str; 4] = [
    "/__state",
    "/api/reset",
    "/api/chaos",
    "/api/training/whoami",
];

/// Training access decided for a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingAccess {
    /// Whether the caller presented a valid training token
    pub authorized: bool,
}

/// Token check and session cookie settings
struct TrainingGate {
    token: Option<SecretString>,
    max_age_secs: u64,
    secure_cookie: bool,
}

impl std::fmt::Debug for TrainingGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainingGate")
            .field(
                "token",
                &if self.token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("max_age_secs", &self.max_age_secs)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl TrainingGate {
    fn expected(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|token| !token.is_empty())
    }

    /// Constant-time comparison against the configured token
    fn verify(&self, candidate: &str) -> bool {
        self.expected().is_some_and(|expected| {
            expected.len() == candidate.len()
                && bool::from(expected.as_bytes().ct_eq(candidate.as_bytes()))
        })
    }

    fn session_cookie(&self) -> Option<HeaderValue> {
        let token = self.expected()?;
        let cookie = Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .path("/")
            .max_age(time::Duration::seconds(
                i64::try_from(self.max_age_secs).unwrap_or(i64::MAX),
            ))
            .build();
        HeaderValue::from_str(&cookie.to_string()).ok()
    }
}

/// Layer that applies training access checks
#[derive(Clone, Debug)]
pub struct TrainingAccessLayer {
    gate: Arc<TrainingGate>,
    internal_paths: Vec<String>,
}

impl TrainingAccessLayer {
    /// Create a layer for the given token
    ///
    /// Without a token nobody is authorized.
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            gate: Arc::new(TrainingGate {
                token,
                max_age_secs: TrainingConfig::default().session_max_age_secs,
                secure_cookie: false,
            }),
            internal_paths: INTERNAL_PATHS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create a layer from configuration
    ///
    /// `secure_cookie` adds the `Secure` attribute to session cookies.
    #[must_use]
    pub fn from_config(config: &TrainingConfig, secure_cookie: bool) -> Self {
        Self {
            gate: Arc::new(TrainingGate {
                token: config.token.clone(),
                max_age_secs: config.session_max_age_secs,
                secure_cookie,
            }),
            internal_paths: INTERNAL_PATHS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl<S> Layer<S> for TrainingAccessLayer {
    type Service = TrainingAccessService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TrainingAccessService {
            inner,
            gate: Arc::clone(&self.gate),
            internal_paths: self.internal_paths.clone(),
        }
    }
}

/// Middleware service for training access
#[derive(Clone, Debug)]
pub struct TrainingAccessService<S> {
    inner: S,
    gate: Arc<TrainingGate>,
    internal_paths: Vec<String>,
}

impl<S> Service<Request> for TrainingAccessService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let gate = Arc::clone(&self.gate);
        let internal_paths = self.internal_paths.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Never let a token in the URL reach a handler. Without a configured
            // token there is nothing to protect and the request passes through.
            if let Some(query_token) = gate
                .expected()
                .and_then(|_| query_token(req.uri()))
            {
                let valid = gate.verify(&query_token);
                debug!(valid, "Training token found in query, redirecting");
                let cookie = if valid { gate.session_cookie() } else { None };
                return Ok(strip_token_redirect(req.uri(), cookie));
            }

            let header_valid = req
                .headers()
                .get(TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|token| gate.verify(token));
            let cookie_valid = CookieJar::from_headers(req.headers())
                .get(SESSION_COOKIE)
                .is_some_and(|cookie| gate.verify(cookie.value()));
            let authorized = header_valid || cookie_valid;

            let path = req.uri().path();
            if !authorized && internal_paths.iter().any(|p| p == path) {
                if gate.expected().is_none() {
                    warn!(path = %path, "Internal route requested but no training token is configured");
                }
                return Ok(ApiError::Hidden.into_response());
            }

            req.extensions_mut().insert(TrainingAccess { authorized });
            let mut response = inner.call(req).await?;

            if authorized && !cookie_valid {
                if let Some(cookie) = gate.session_cookie() {
                    response.headers_mut().append(header::SET_COOKIE, cookie);
                }
            }
            Ok(response)
        })
    }
}

/// Decoded `training_token` query value, if present and non-empty
fn query_token(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    if !query
        .split('&')
        .any(|pair| pair.split('=').next() == Some(TOKEN_QUERY_PARAM))
    {
        return None;
    }
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params
        .get(TOKEN_QUERY_PARAM)
        .filter(|token| !token.is_empty())
        .cloned()
}

/// Location of `uri` with every `training_token` pair removed
fn location_without_token(uri: &Uri) -> String {
    let path = uri.path();
    let kept: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some(TOKEN_QUERY_PARAM))
        .collect();

    if kept.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", kept.join("&"))
    }
}

fn strip_token_redirect(uri: &Uri, cookie: Option<HeaderValue>) -> Response {
    let location = location_without_token(uri);
    let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&location) {
        headers.insert(header::LOCATION, value);
    }
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Some(cookie) = cookie {
        headers.append(header::SET_COOKIE, cookie);
    }
    response
}
