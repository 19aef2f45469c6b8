//! Serving with a bounded graceful shutdown

use std::{future::Future, future::IntoFuture, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight connection finished
    Drained,
    /// Connections were still open when the drain timeout elapsed
    TimedOut,
}

/// Serve `app` until `signal` resolves, then drain for at most `drain_timeout`
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> std::io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let notify = Arc::clone(&draining);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            info!("⏳ Waiting up to {:?} for connections to close...", drain_timeout);
            notify.notify_one();
        })
        .into_future();

    let deadline = async {
        draining.notified().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            result?;
            Ok(ShutdownOutcome::Drained)
        }
        () = deadline => {
            warn!(timeout = ?drain_timeout, "Drain timeout elapsed, dropping open connections");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
