//! Configuration for Petstore

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub metrics: MetricsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen_addr: String,

    /// Maximum number of requests served concurrently
    pub max_connections: usize,

    /// Maximum accepted request body size (bytes)
    pub max_body_bytes: usize,

    /// Number of Tokio worker threads (0 = number of CPUs)
    pub worker_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_connections: 1024,
            max_body_bytes: 64 * 1024,
            worker_threads: 0,
        }
    }
}

/// Which record store backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Rocksdb,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = crate::PetStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rocksdb" | "rocks" => Ok(Self::Rocksdb),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(crate::PetStoreError::Config(format!(
                "Unknown storage backend: {other}"
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store implementation
    pub backend: StorageBackend,

    /// Path to RocksDB data directory
    pub db_path: PathBuf,

    /// Block cache size in bytes
    pub block_cache_size: usize,

    /// Write buffer size in bytes
    pub write_buffer_size: usize,

    /// Maximum number of write buffers
    pub max_write_buffer_number: i32,

    /// Maximum number of background jobs
    pub max_background_jobs: i32,

    /// Enable compression
    pub enable_compression: bool,

    /// fsync the WAL on every write
    pub sync_writes: bool,

    /// RocksDB LOG verbosity (debug, info, warn, error, fatal, header)
    pub rocksdb_log_level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Rocksdb,
            db_path: PathBuf::from("./data/pets"),
            block_cache_size: 64 * 1024 * 1024, // 64MB
            write_buffer_size: 16 * 1024 * 1024, // 16MB
            max_write_buffer_number: 2,
            max_background_jobs: 2,
            enable_compression: true,
            sync_writes: false,
            rocksdb_log_level: "error".to_string(),
        }
    }
}

/// Metrics and health check configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the metrics/health listener
    pub enabled: bool,

    /// Address for metrics/health HTTP server
    pub listen_addr: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            listen_addr: "127.0.0.1:9090".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::PetStoreError::Config(format!("Failed to read config file: {e}"))
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::PetStoreError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables or use defaults
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("PETSTORE_LISTEN_ADDR") {
            config.server.listen_addr = addr;
        }

        if let Ok(max_conn) = std::env::var("PETSTORE_MAX_CONNECTIONS")
            && let Ok(n) = max_conn.parse()
        {
            config.server.max_connections = n;
        }

        if let Ok(backend) = std::env::var("PETSTORE_STORAGE_BACKEND") {
            config.storage.backend = backend.parse()?;
        }

        if let Ok(path) = std::env::var("PETSTORE_DB_PATH") {
            config.storage.db_path = PathBuf::from(path);
        }

        if let Ok(addr) = std::env::var("PETSTORE_METRICS_ADDR") {
            config.metrics.listen_addr = addr;
        }

        if let Ok(enabled) = std::env::var("PETSTORE_METRICS_ENABLED") {
            config.metrics.enabled = enabled.to_lowercase() == "true" || enabled == "1";
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::Rocksdb);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            listen_addr = "0.0.0.0:3000"

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.server.max_connections, 1024);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.metrics.listen_addr, "127.0.0.1:9090");
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml("[server\nlisten_addr = 1");
        assert!(matches!(result, Err(crate::PetStoreError::Config(_))));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("RocksDB".parse::<StorageBackend>().unwrap(), StorageBackend::Rocksdb);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("mongo".parse::<StorageBackend>().is_err());
    }
}
