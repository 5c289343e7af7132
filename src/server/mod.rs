//! HTTP service surface.
//!
//! Thin axum shims over [`TrafficGateway`]: extraction, header stamping,
//! and the error-to-status mapping. No proxy decision logic lives here.
//! [`build_router`] assembles the routes; [`serve`] binds a listener and
//! runs until a shutdown signal arrives.

pub mod config;
mod handlers;

pub use config::Args;
pub use handlers::X_CACHE;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::TrafficGateway;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<TrafficGateway>,
    started: Instant,
}

/// Assemble the router. Uptime reported by `/health` counts from this
/// call.
pub fn build_router(gateway: Arc<TrafficGateway>) -> Router {
    let state = AppState {
        gateway,
        started: Instant::now(),
    };

    Router::new()
        .route("/api/traffic/{resource}", get(handlers::traffic))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the gateway until Ctrl+C.
pub async fn serve(addr: SocketAddr, gateway: Arc<TrafficGateway>) -> std::io::Result<()> {
    let app = build_router(gateway);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
