//! Background tasks

mod limiter_cleanup;

pub use limiter_cleanup::spawn_limiter_cleanup_task;
