//! waypoint-server: HTTP surface for the planning endpoint
//!
//! Exposes `POST /api/agent` and `GET /api/health` on top of a shared
//! [`Planner`].

pub mod error;
pub mod handlers;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use waypoint_agent::Planner;

pub use error::{ApiError, ErrorBody};
pub use handlers::PLAN_SOURCE_HEADER;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
}

/// Build the router for a planner
pub fn router(planner: Arc<Planner>) -> Router {
    Router::new()
        .route("/api/agent", post(handlers::plan))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { planner })
}

/// Serve until Ctrl+C
pub async fn serve(addr: SocketAddr, planner: Arc<Planner>) -> std::io::Result<()> {
    let mode = if planner.is_model_backed() {
        format!("model {}", planner.config().model)
    } else {
        "local guidance".to_string()
    };
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Planning endpoint listening on {} ({})", listener.local_addr()?, mode);

    axum::serve(listener, router(planner))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
