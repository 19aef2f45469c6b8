//! Chaos engine HTTP presentation layer
//!
//! Internal diagnostic routes, training access gating, and a small demo
//! catalog whose handlers run seeded delays and failures.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::{FixedWindowLimiter, TrainingAccess, TrainingAccessLayer};
pub use routes::create_router;
pub use server::{ShutdownOutcome, serve_with_shutdown};
pub use state::AppState;
pub use tasks::spawn_limiter_cleanup_task;
