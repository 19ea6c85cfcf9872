//! HTTP server for the pets API

mod handler;

use crate::config::ServerConfig;
use crate::metrics::Metrics;
use crate::storage::PetRepository;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::limit::GlobalConcurrencyLimitLayer;
use tracing::info;

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PetRepository>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(repository: Arc<dyn PetRepository>, metrics: Arc<Metrics>) -> Self {
        Self {
            repository,
            metrics,
        }
    }
}

/// Route table for the pets API
///
/// `/pets/all` is a literal segment, matched ahead of `/pets/{id}`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pets", get(handler::list_pets).post(handler::create_pet))
        .route("/pets/all", delete(handler::delete_all_pets))
        .route(
            "/pets/:id",
            get(handler::get_pet)
                .put(handler::modify_pet)
                .delete(handler::delete_pet),
        )
}

/// Full application with request limits applied
///
/// The router layers each route separately, so the concurrency limit uses
/// one semaphore shared by every route.
pub fn app(config: &ServerConfig, state: AppState) -> Router {
    routes()
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(GlobalConcurrencyLimitLayer::new(config.max_connections))
        .with_state(state)
}

/// Main server struct
pub struct Server {
    config: ServerConfig,
    state: AppState,
    cancel_token: CancellationToken,
}

impl Server {
    /// Create a new server
    pub fn new(
        config: ServerConfig,
        repository: Arc<dyn PetRepository>,
        metrics: Arc<Metrics>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            state: AppState::new(repository, metrics),
            cancel_token,
        }
    }

    /// Run the server until the cancel token fires
    pub async fn run(self) -> anyhow::Result<()> {
        let addr: SocketAddr = self.config.listen_addr.parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!("Server listening on {}", addr);

        let app = app(&self.config, self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(self.cancel_token.cancelled_owned())
            .await?;

        info!("Server shutting down");
        Ok(())
    }
}
