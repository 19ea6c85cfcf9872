//! In-process pet store
//!
//! Ordered by id, like the RocksDB backend. Contents are lost on restart.

use super::PetRepository;
use crate::StorageError;
use crate::protocol::Pet;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Map-backed storage
#[derive(Default)]
pub struct MemoryStorage {
    pets: RwLock<BTreeMap<String, Pet>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pets
    pub fn len(&self) -> usize {
        self.pets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.read().is_empty()
    }
}

impl PetRepository for MemoryStorage {
    fn find_all(&self) -> Result<Vec<Pet>, StorageError> {
        Ok(self.pets.read().values().cloned().collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Pet>, StorageError> {
        Ok(self.pets.read().get(id).cloned())
    }

    fn save(&self, pet: Pet) -> Result<Pet, StorageError> {
        self.pets.write().insert(pet.id.clone(), pet.clone());
        Ok(pet)
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        self.pets.write().remove(id);
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StorageError> {
        self.pets.write().clear();
        Ok(())
    }
}
