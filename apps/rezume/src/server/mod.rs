// Local render server: serves the backing document through a theme.

pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use state::ServerState;

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(handlers::handle_health))
        .with_state(state)
}

/// Binds `host:port` and serves until the process is stopped.
pub async fn serve(state: ServerState, host: &str, port: u16) -> Result<()> {
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Serving rezume on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
