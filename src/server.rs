//! HTTP server initialization and runtime setup.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::routes::app_router;
use crate::state::AppState;
use crate::upstream::HttpForwarder;

/// Runs the HTTP server with the given configuration.
///
/// Initializes the upstream forwarder (shared connection pool), builds the
/// router for the configured deployment mode, and serves until ctrl-c.
///
/// # Errors
///
/// Returns an error if the forwarder's HTTP client cannot be built, the
/// listen address does not bind, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let forwarder = HttpForwarder::new(&config)?;

    let state = AppState {
        upstream: Arc::new(forwarder),
        config: Arc::new(config.clone()),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received, draining connections");
    }
}
