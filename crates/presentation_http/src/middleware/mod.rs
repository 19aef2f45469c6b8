//! HTTP middleware components
//!
//! Training access gating and the fixed-window limiter used by the reset
//! endpoint.

pub mod rate_limit;
pub mod training_access;

pub use rate_limit::{FixedWindowLimiter, RateLimitDecision, client_ip};
pub use training_access::{
    INTERNAL_PATHS, SESSION_COOKIE, TOKEN_HEADER, TOKEN_QUERY_PARAM, TrainingAccess,
    TrainingAccessLayer, TrainingAccessService,
};
