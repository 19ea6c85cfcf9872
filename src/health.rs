//! HTTP health and metrics server

use crate::config::MetricsConfig;
use crate::metrics::Metrics;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Health server state
pub struct HealthServer {
    metrics: Arc<Metrics>,
    ready: AtomicBool,
}

impl HealthServer {
    /// Create a new health server
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            ready: AtomicBool::new(false),
        }
    }

    /// Set the ready state
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Routes served on the metrics listener
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/healthz", get(health))
            .route("/ready", get(ready))
            .route("/readyz", get(ready))
            .route("/metrics", get(metrics))
            .with_state(self)
    }

    /// Serve until `cancel` fires
    pub async fn run(
        self: Arc<Self>,
        config: &MetricsConfig,
        cancel: CancellationToken,
    ) -> std::io::Result<()> {
        let listener = TcpListener::bind(config.listen_addr.as_str()).await?;
        info!("Health server listening on {}", config.listen_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(cancel.cancelled_owned())
            .await?;

        info!("Health server stopped");
        Ok(())
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn ready(State(server): State<Arc<HealthServer>>) -> impl IntoResponse {
    if server.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not ready" })),
        )
    }
}

async fn metrics(State(server): State<Arc<HealthServer>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        server.metrics.gather(),
    )
}
