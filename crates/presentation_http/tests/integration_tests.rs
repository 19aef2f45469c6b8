//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use infrastructure::{AppConfig, Environment};
use presentation_http::{routes::create_router, state::AppState};
use secrecy::SecretString;
use serde_json::json;

const TOKEN: &str = "training-secret";

fn token_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-training-token"),
        HeaderValue::from_static(TOKEN),
    )
}

fn base_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.training.token = Some(SecretString::from(TOKEN.to_string()));
    config
}

/// Chaos that always fails and never sleeps
fn failing_config() -> AppConfig {
    let mut config = base_config();
    config.chaos.policy.error_rate = 1.0;
    config.chaos.policy.latency_min_ms = 0.0;
    config.chaos.policy.latency_max_ms = 0.0;
    config.chaos.policy.latency_jitter_ms = 0.0;
    config
}

fn create_server(config: AppConfig) -> TestServer {
    let state = AppState::from_config(config).expect("valid config");
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn create_test_server() -> TestServer {
    create_server(base_config())
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = create_test_server();

    let response = server.get("/__health").await;

    response.assert_status_ok();
    assert_eq!(response.header("cache-control"), "no-store");
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"status": "ok"}));
}

// ============ Training Access Tests ============

#[tokio::test]
async fn internal_routes_are_hidden_without_token() {
    let server = create_test_server();

    server.get("/__state").await.assert_status_not_found();
    server.post("/api/reset").await.assert_status_not_found();
    server.post("/api/chaos").await.assert_status_not_found();
    server
        .get("/api/training/whoami")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn internal_routes_are_hidden_without_configured_token() {
    let server = create_server(AppConfig::default());
    let (name, value) = token_header();

    let response = server.get("/__state").add_header(name, value).await;

    response.assert_status_not_found();
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn whoami_with_header_token_sets_session_cookie() {
    let server = create_test_server();
    let (name, value) = token_header();

    let response = server.get("/api/training/whoami").add_header(name, value).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"authorized": true}));
    let cookie = response.header("set-cookie");
    let cookie = cookie.to_str().expect("ascii cookie");
    assert!(cookie.starts_with("training_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn session_cookie_grants_access() {
    let server = create_test_server();

    let response = server
        .get("/api/training/whoami")
        .add_header(
            HeaderName::from_static("cookie"),
            HeaderValue::from_static("training_session=training-secret"),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn query_token_is_stripped_by_redirect() {
    let server = create_test_server();

    let response = server
        .get("/__state")
        .add_query_param("chaos", "1")
        .add_query_param("training_token", TOKEN)
        .await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/__state?chaos=1");
    assert!(
        response
            .header("set-cookie")
            .to_str()
            .expect("ascii cookie")
            .contains("training_session=")
    );
}

#[tokio::test]
async fn empty_query_token_is_served_normally() {
    let server = create_test_server();

    server
        .get("/api/products")
        .add_query_param("training_token", "")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn query_token_without_configured_token_is_served_normally() {
    let server = create_server(AppConfig::default());

    let response = server
        .get("/api/products")
        .add_query_param("training_token", "x")
        .await;

    response.assert_status_ok();
    assert!(response.maybe_header("set-cookie").is_none());
}

// ============ Chaos State Tests ============

#[tokio::test]
async fn state_reports_derived_and_active_configuration() {
    let server = create_test_server();
    let (name, value) = token_header();

    let response = server
        .get("/__state")
        .add_query_param("chaos", "1")
        .add_query_param("seed", "test123")
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("cache-control"), "no-store");
    let body: serde_json::Value = response.json();

    let chaos = &body["chaos"];
    assert_eq!(chaos["seed"], "test123");
    assert_eq!(chaos["enabled"], true);
    assert_eq!(chaos["errorRate"], 0.1);
    assert_eq!(chaos["networkLatency"], json!({"min": 100.0, "max": 2000.0, "jitter": 200.0}));
    assert_eq!(chaos["popupOverlay"], true);
    let modal = chaos["modalDelay"].as_f64().expect("modal delay");
    assert!((modal - 475.242_765_177).abs() < 1e-6);

    let active = &body["active"];
    assert_eq!(active["enabled"], false);
    assert_eq!(active["seed"], "default");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn seed_header_is_used_as_fallback() {
    let server = create_test_server();
    let (name, value) = token_header();

    let response = server
        .get("/__state")
        .add_query_param("chaos", "true")
        .add_header(name, value)
        .add_header(
            HeaderName::from_static("x-chaos-seed"),
            HeaderValue::from_static("from-header"),
        )
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["chaos"]["seed"], "from-header");
}

#[tokio::test]
async fn activate_then_reset_shared_state() {
    let server = create_test_server();
    let (name, value) = token_header();

    let response = server
        .post("/api/chaos")
        .add_query_param("chaos", "1")
        .add_query_param("seed", "abc")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["seed"], "abc");
    assert_eq!(body["enabled"], true);

    let state: serde_json::Value = server
        .get("/__state")
        .add_header(name.clone(), value.clone())
        .await
        .json();
    assert_eq!(state["active"]["seed"], "abc");
    assert_eq!(state["active"]["enabled"], true);

    let response = server.post("/api/reset").add_header(name.clone(), value.clone()).await;
    response.assert_status_ok();
    assert_eq!(response.header("clear-site-data"), r#""cache", "cookies", "storage""#);
    assert_eq!(response.header("x-ratelimit-remaining"), "4");
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let state: serde_json::Value = server.get("/__state").add_header(name, value).await.json();
    assert_eq!(state["active"]["enabled"], false);
    assert_eq!(state["active"]["seed"], "default");
}

#[tokio::test]
async fn reset_is_rate_limited_per_client() {
    let server = create_test_server();
    let (name, value) = token_header();
    let forwarded = HeaderName::from_static("x-forwarded-for");

    for expected_remaining in (0..5).rev() {
        let response = server
            .post("/api/reset")
            .add_header(name.clone(), value.clone())
            .add_header(forwarded.clone(), HeaderValue::from_static("10.0.0.1"))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.header("x-ratelimit-remaining"),
            expected_remaining.to_string().as_str()
        );
    }

    let response = server
        .post("/api/reset")
        .add_header(name.clone(), value.clone())
        .add_header(forwarded.clone(), HeaderValue::from_static("10.0.0.1"))
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = response
        .header("retry-after")
        .to_str()
        .expect("ascii header")
        .parse()
        .expect("numeric retry-after");
    assert!((1..=60).contains(&retry_after));
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "rate_limited");

    // Another client still has its own window
    server
        .post("/api/reset")
        .add_header(name, value)
        .add_header(forwarded, HeaderValue::from_static("10.0.0.2"))
        .await
        .assert_status_ok();
}

// ============ Catalog Tests ============

#[tokio::test]
async fn products_without_chaos() {
    let server = create_test_server();

    let response = server.get("/api/products").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let products = body["products"].as_array().expect("product list");
    assert_eq!(products.len(), 12);
    assert_eq!(products[0]["id"], "1");
    assert!(products[0]["inStock"].is_boolean());
}

#[tokio::test]
async fn product_by_id() {
    let server = create_test_server();

    let response = server.get("/api/products/11").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["product"]["name"], "SSD 1TB");

    server.get("/api/products/99").await.assert_status_not_found();
}

#[tokio::test]
async fn cart_echoes_item() {
    let server = create_test_server();

    let response = server
        .post("/api/cart")
        .json(&json!({"productId": "3", "quantity": 2}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["item"], json!({"productId": "3", "quantity": 2}));
}

#[tokio::test]
async fn simulated_failures_map_to_route_statuses() {
    let server = create_server(failing_config());

    server
        .get("/api/products")
        .add_query_param("chaos", "1")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    server
        .get("/api/products/1")
        .add_query_param("chaos", "1")
        .await
        .assert_status_not_found();

    server
        .post("/api/cart")
        .add_query_param("chaos", "1")
        .json(&json!({"productId": "1"}))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn cart_checks_chaos_before_parsing_body() {
    let server = create_server(failing_config());

    server
        .post("/api/cart")
        .add_query_param("chaos", "1")
        .text("{not json")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn malformed_cart_body_is_bad_request() {
    let server = create_test_server();

    let response = server.post("/api/cart").text("{not json").await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn explicit_off_overrides_failing_policy() {
    let server = create_server(failing_config());

    server
        .get("/api/products")
        .add_query_param("chaos", "0")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn default_enabled_applies_without_param() {
    let mut config = failing_config();
    config.chaos.default_enabled = true;
    let server = create_server(config);

    server
        .get("/api/products")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    server
        .get("/api/products")
        .add_query_param("chaos", "0")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn production_ignores_unauthorized_chaos_signal() {
    let mut config = failing_config();
    config.environment = Environment::Production;
    let server = create_server(config);

    server
        .get("/api/products")
        .add_query_param("chaos", "1")
        .await
        .assert_status_ok();

    let (name, value) = token_header();
    server
        .get("/api/products")
        .add_query_param("chaos", "1")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test(start_paused = true)]
async fn same_seed_replays_same_outcome() {
    let server = create_test_server();

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let response = server
            .get("/api/products")
            .add_query_param("chaos", "1")
            .add_query_param("seed", "repro123")
            .await;
        statuses.push(response.status_code());
    }
    assert_eq!(statuses[0], statuses[1]);
}
