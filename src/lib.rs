//! # Petstore
//!
//! CRUD service for pet records over HTTP, backed by a document store.
//!
//! ## Features
//!
//! - `/pets` resource: list, get, create, modify (upsert by path id), delete, delete all
//! - RocksDB persistent storage, one JSON document per pet
//! - In-memory store for ephemeral deployments
//! - Prometheus metrics endpoint
//! - Health check endpoints for load balancer integration
//!
//! ## Example
//!
//! ```ignore
//! use petstore::config::Config;
//! use petstore::server::Server;
//!
//! let config = Config::default();
//! let repository = petstore::storage::open(&config.storage)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────────────┐     ┌──────────────┐
//! │ HTTP client  │────▶│ Petstore                │────▶│ RocksDB      │
//! │              │     │  ├─ route table (axum)  │     │ (documents   │
//! └──────────────┘     │  ├─ payload validation  │     │  keyed by id)│
//!                      │  └─ status mapping      │     └──────────────┘
//!                      └─────────────────────────┘
//! ```

// Modules
pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod prelude;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-exports for convenience
pub use error::{PetStoreError, Result, StorageError, ValidationError};
