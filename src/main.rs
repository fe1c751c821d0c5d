// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard::Dashboard;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_probe::HttpImageProbe;
use crate::infrastructure::http_source::HttpOccupancySource;
use crate::presentation::app_state::AppState;
use crate::presentation::html::PageRenderer;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;

    // Create adapters (infrastructure layer)
    let source = HttpOccupancySource::new(config.source.endpoint.clone(), config.source_timeout())?;
    let probe = HttpImageProbe::new(config.image.base_url.clone(), config.source_timeout())?;
    tracing::info!("occupancy endpoint: {}", source.endpoint());

    // Mount the dashboard; a failed initial load aborts startup
    let dashboard = Arc::new(
        Dashboard::mount(Arc::new(source), Arc::new(probe), config.refresh_interval()).await?,
    );

    let state = Arc::new(AppState {
        dashboard: dashboard.clone(),
        renderer: PageRenderer::new()?,
    });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting campus-congestion service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dashboard.unmount();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
