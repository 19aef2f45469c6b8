//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::TrainingAccessLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let training_access = TrainingAccessLayer::from_config(
        &state.config.training,
        state.config.is_production(),
    );

    Router::new()
        // Health endpoint
        .route("/__health", get(handlers::health::health_check))
        // Internal diagnostics (training access only)
        .route("/__state", get(handlers::internal::chaos_state))
        .route("/api/chaos", post(handlers::internal::activate_chaos))
        .route("/api/reset", post(handlers::internal::reset_chaos))
        .route("/api/training/whoami", get(handlers::internal::whoami))
        // Demo catalog
        .route("/api/products", get(handlers::catalog::list_products))
        .route("/api/products/{id}", get(handlers::catalog::get_product))
        .route("/api/cart", post(handlers::catalog::add_to_cart))
        .layer(training_access)
        .layer(TraceLayer::new_for_http())
        // Attach state
        .with_state(state)
}
