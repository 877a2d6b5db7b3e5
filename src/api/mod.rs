//! HTTP API wiring (Axum router + server loop).
//!
//! - `routes.rs`: handlers, one per endpoint
//! - `dto.rs`: response bodies
//! - `errors.rs`: AppError → JSON error responses
//! - `middleware.rs`: request logging

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::Ledger;
use crate::errors::{AppError, AppResult};

pub mod dto;
pub mod errors;
pub mod middleware;
pub mod routes;

/// Build the full HTTP router around one shared ledger.
pub fn router(ledger: Arc<Ledger>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/static/app.js", get(routes::app_js))
        .route("/health", get(routes::health))
        .route("/api/state", get(routes::state))
        .route("/api/work", post(routes::work))
        .route("/api/relax", post(routes::relax))
        .route("/api/target", get(routes::get_target).post(routes::set_target))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(ledger)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(ledger: Arc<Ledger>, addr: &str) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(ledger))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
