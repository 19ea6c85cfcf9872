//! Error types for Petstore

use thiserror::Error;

/// Main error type for Petstore
#[derive(Error, Debug)]
pub enum PetStoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Payload validation errors, raised before the store is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("reserved id: {0}")]
    ReservedId(String),

    #[error("malformed body: {0}")]
    MalformedBody(String),
}

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rust_rocksdb::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Document encoding error: {0}")]
    Encoding(String),

    #[error("Document decoding error: {0}")]
    Decoding(String),
}

pub type Result<T> = std::result::Result<T, PetStoreError>;
