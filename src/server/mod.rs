//! HTTP server exposing the analysis pipeline.
//!
//! Provides two endpoints:
//! - `POST /api/analyze` - Runs one analysis and returns the score or a classified error
//! - `GET /` - Liveness check
//!
//! Handlers hold no state beyond the shared [`Analyzer`].

mod handlers;

use std::future::Future;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::analyzer::Analyzer;
use crate::config::ServerConfig;

pub use handlers::{analyze_handler, health_handler};

/// Builds the application router
pub fn router(analyzer: Analyzer) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .with_state(analyzer)
}

/// Serves the router on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, analyzer: Analyzer, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(analyzer))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Analysis server error")
}

/// Binds the configured address and serves until Ctrl-C
pub async fn start_server(config: &ServerConfig, analyzer: Analyzer) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind analysis server to {}", address))?;

    tracing::info!("Analysis server listening on http://{}/", address);
    tracing::info!("  - Analyze: POST http://{}/api/analyze", address);

    serve(listener, analyzer, shutdown_signal()).await?;

    tracing::info!("Analysis server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
