//! Prelude module for common imports.
//!
//! ```ignore
//! use petstore::prelude::*;
//! ```

// Error types
pub use crate::error::{PetStoreError, Result, StorageError, ValidationError};

// Configuration
pub use crate::config::{Config, MetricsConfig, ServerConfig, StorageBackend, StorageConfig};

// Storage
pub use crate::storage::{MemoryStorage, PetRepository, RocksStorage};

// Protocol
pub use crate::protocol::{ApiError, Pet, PetPayload};

// Metrics
pub use crate::metrics::Metrics;

// Server
pub use crate::server::{AppState, Server};

// Common external crates
pub use std::sync::Arc;
pub use tracing::{debug, error, info, trace, warn};
