//! HTTP server initialization and runtime setup.
//!
//! Builds the upstream client and metadata service, then runs the Axum server
//! until Ctrl+C.

use crate::application::services::MetadataService;
use crate::config::Config;
use crate::domain::MetadataFetcher;
use crate::infrastructure::upstream::UpstreamClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds application state from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn build_state(config: &Config) -> Result<AppState> {
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build upstream HTTP client")?;

    let fetcher: Arc<dyn MetadataFetcher> = Arc::new(UpstreamClient::new(
        http,
        config.upstream_base_url.clone(),
        config.user_agent.clone(),
    ));

    let service = MetadataService::new(fetcher, config.api_key.clone(), config.fetch_timeout());

    Ok(AppState::new(service, config.sources.clone()))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    tracing::info!(
        sources = config.sources.sources().len(),
        "Metadata service ready"
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
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
