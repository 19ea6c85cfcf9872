//! Petstore - pet records CRUD service
//!
//! Serves the `/pets` HTTP resource over a RocksDB (or in-memory) document store.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use petstore::config::Config;
use petstore::health::HealthServer;
use petstore::metrics::Metrics;
use petstore::server::Server;
use std::sync::Arc;
use tokio::runtime::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Petstore");

    // Load configuration
    let config = if let Some(config_path) = std::env::args().nth(1) {
        info!("Loading configuration from {}", config_path);
        Config::from_file(&config_path)?
    } else {
        info!("Using default configuration (set PETSTORE_* env vars to customize)");
        Config::from_env()?
    };

    info!("Configuration: {:?}", config);

    // Build tokio runtime with configured worker threads
    let mut runtime_builder = Builder::new_multi_thread();
    if config.server.worker_threads > 0 {
        runtime_builder.worker_threads(config.server.worker_threads);
        info!("Using {} worker threads", config.server.worker_threads);
    } else {
        info!("Using default worker threads (auto-detected)");
    }
    let runtime = runtime_builder.enable_all().build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> anyhow::Result<()> {
    let cancel_token = CancellationToken::new();

    // Open the record store once; handlers share it through the router state
    info!("Opening {:?} store", config.storage.backend);
    let repository = petstore::storage::open(&config.storage)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {e}"))?;

    let metrics = Arc::new(Metrics::new());

    let health_server = if config.metrics.enabled {
        let health = Arc::new(HealthServer::new(Arc::clone(&metrics)));
        let health_task = Arc::clone(&health);
        let metrics_config = config.metrics.clone();
        let cancel = cancel_token.clone();

        tokio::spawn(async move {
            if let Err(e) = health_task.run(&metrics_config, cancel).await {
                error!("Health server error: {}", e);
            }
        });

        Some(health)
    } else {
        None
    };

    let server = Server::new(
        config.server.clone(),
        repository,
        Arc::clone(&metrics),
        cancel_token.clone(),
    );

    if let Some(ref health) = health_server {
        health.set_ready(true);
        info!("Server is ready");
    }

    // Setup signal handlers
    let cancel_for_signal = cancel_token.clone();
    let health_for_signal = health_server.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT, shutting down...");
            }
            _ = terminate() => {
                info!("Received SIGTERM, shutting down...");
            }
        }
        if let Some(health) = health_for_signal {
            health.set_ready(false);
        }
        cancel_for_signal.cancel();
    });

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        cancel_token.cancel();
        return Err(e);
    }

    info!("Petstore stopped");
    Ok(())
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
