//! HTTP surface: router assembly, shared state and the serve loop.

pub mod handlers;

use crate::adapters::github::GithubClient;
use crate::core::aggregator::ProfileAggregator;
use crate::core::{ConfigProvider, UserDirectory};
use crate::utils::error::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: ProfileAggregator,
}

/// Builds the router against the GitHub API described by `config`.
pub fn build_router<C: ConfigProvider + ?Sized>(config: &C) -> Result<Router> {
    let client = GithubClient::new(config)?;
    tracing::info!(
        "Upstream: {} (timeout {}s)",
        client.base_url(),
        config.timeout_secs()
    );
    Ok(router_with_directory(Arc::new(client)))
}

/// Builds the router against any [`UserDirectory`].
pub fn router_with_directory(directory: Arc<dyn UserDirectory>) -> Router {
    let state = AppState {
        aggregator: ProfileAggregator::new(directory),
    };

    Router::new()
        .route("/", get(handlers::home))
        .route("/{username}", get(handlers::user_profile))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `host:port` from `config` and serves until Ctrl-C.
pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let app = build_router(config)?;
    let addr = format!("{}:{}", config.host(), config.port());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
