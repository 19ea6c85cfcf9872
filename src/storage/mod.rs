//! Record store for pet documents
//!
//! The service only needs the five operations of [`PetRepository`]; the
//! backing engine is chosen at startup.

mod document;
mod memory;
mod rocks;

pub use document::{decode_pet, encode_pet};
pub use memory::MemoryStorage;
pub use rocks::RocksStorage;

use crate::StorageError;
use crate::config::{StorageBackend, StorageConfig};
use crate::protocol::Pet;
use std::sync::Arc;

/// Document store keyed by pet id
///
/// Writes to the same id are last-writer-wins; no method spans more than
/// one record atomically except where the engine provides it.
pub trait PetRepository: Send + Sync {
    /// All pets in store order
    fn find_all(&self) -> Result<Vec<Pet>, StorageError>;

    /// The pet stored under `id`, if any
    fn find_by_id(&self, id: &str) -> Result<Option<Pet>, StorageError>;

    /// Insert or replace the record under `pet.id`
    fn save(&self, pet: Pet) -> Result<Pet, StorageError>;

    /// Remove the record under `id`. Absent ids are not an error.
    fn delete_by_id(&self, id: &str) -> Result<(), StorageError>;

    /// Remove every record
    fn delete_all(&self) -> Result<(), StorageError>;
}

/// Open the store selected by `config.backend`
pub fn open(config: &StorageConfig) -> Result<Arc<dyn PetRepository>, StorageError> {
    let repository: Arc<dyn PetRepository> = match config.backend {
        StorageBackend::Rocksdb => Arc::new(RocksStorage::open(config)?),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    };
    Ok(repository)
}
