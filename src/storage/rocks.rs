//! RocksDB storage backend
//!
//! One JSON document per pet, keyed by the pet id.

use super::PetRepository;
use super::document::{decode_pet, encode_pet};
use crate::StorageError;
use crate::config::StorageConfig;
use crate::protocol::Pet;
use rust_rocksdb::{
    BlockBasedOptions, DB, DBCompactionStyle, DBCompressionType, IteratorMode, LogLevel, Options,
    WriteBatch, WriteOptions,
};
use tracing::{debug, info};

/// RocksDB-backed storage
pub struct RocksStorage {
    db: DB,
    write_opts: WriteOptions,
}

impl RocksStorage {
    /// Open or create a RocksDB database
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_max_background_jobs(config.max_background_jobs);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_compaction_style(DBCompactionStyle::Level);
        opts.set_log_level(parse_log_level(&config.rocksdb_log_level));

        if config.enable_compression {
            opts.set_compression_type(DBCompressionType::Lz4);
        } else {
            opts.set_compression_type(DBCompressionType::None);
        }

        let mut block_opts = BlockBasedOptions::default();
        let cache = rust_rocksdb::Cache::new_lru_cache(config.block_cache_size);
        block_opts.set_block_cache(&cache);
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_cache_index_and_filter_blocks(true);
        opts.set_block_based_table_factory(&block_opts);

        // Ensure the directory exists
        if let Some(parent) = config.db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Internal(format!("Failed to create directory: {e}"))
            })?;
        }

        let db = DB::open(&opts, &config.db_path)?;

        info!(
            "RocksDB opened: path={:?}, block_cache={}MB, sync_writes={}",
            config.db_path,
            config.block_cache_size / (1024 * 1024),
            config.sync_writes,
        );

        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(config.sync_writes);

        Ok(Self { db, write_opts })
    }
}

impl PetRepository for RocksStorage {
    fn find_all(&self) -> Result<Vec<Pet>, StorageError> {
        let mut pets = Vec::new();
        for item in self.db.iterator(IteratorMode::Start) {
            let (_key, value) = item?;
            pets.push(decode_pet(&value)?);
        }
        Ok(pets)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Pet>, StorageError> {
        match self.db.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(decode_pet(&bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, pet: Pet) -> Result<Pet, StorageError> {
        let encoded = encode_pet(&pet)?;
        self.db.put_opt(pet.id.as_bytes(), &encoded, &self.write_opts)?;
        Ok(pet)
    }

    fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        // RocksDB delete is idempotent
        self.db.delete_opt(id.as_bytes(), &self.write_opts)?;
        Ok(())
    }

    /// Removes every document in one write batch, so a failure leaves the
    /// store untouched.
    fn delete_all(&self) -> Result<(), StorageError> {
        let mut batch = WriteBatch::default();
        for item in self.db.iterator(IteratorMode::Start) {
            let (key, _value) = item?;
            batch.delete(key);
        }
        let removed = batch.len();
        self.db.write_opt(&batch, &self.write_opts)?;
        debug!(removed, "Deleted all pet documents");
        Ok(())
    }
}

fn parse_log_level(level: &str) -> LogLevel {
    match level.to_lowercase().as_str() {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        "fatal" => LogLevel::Fatal,
        "header" => LogLevel::Header,
        _ => LogLevel::Error, // "error" or any unknown value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(tmp_dir: &TempDir) -> StorageConfig {
        StorageConfig {
            db_path: tmp_dir.path().join("test_db"),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            max_write_buffer_number: 2,
            max_background_jobs: 2,
            enable_compression: false,
            ..StorageConfig::default()
        }
    }

    #[test]
    fn test_save_find() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        let pet = Pet::new("abc", "Rex", "dog", "lab");
        let saved = storage.save(pet.clone()).unwrap();
        assert_eq!(saved, pet);

        let found = storage.find_by_id("abc").unwrap();
        assert_eq!(found, Some(pet));
    }

    #[test]
    fn test_find_nonexistent() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        assert!(storage.find_by_id("nonexistent").unwrap().is_none());
        assert!(storage.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        storage.save(Pet::new("1", "Rex", "dog", "lab")).unwrap();
        storage.save(Pet::new("1", "Tom", "cat", "tabby")).unwrap();

        let all = storage.find_all().unwrap();
        assert_eq!(all, vec![Pet::new("1", "Tom", "cat", "tabby")]);
    }

    #[test]
    fn test_delete() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        storage.delete_by_id("nonexistent").unwrap();

        storage.save(Pet::new("key", "Rex", "dog", "lab")).unwrap();
        storage.delete_by_id("key").unwrap();
        assert!(storage.find_by_id("key").unwrap().is_none());
    }

    #[test]
    fn test_delete_all() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        for i in 0..10 {
            storage
                .save(Pet::new(format!("pet-{i}"), "Rex", "dog", "lab"))
                .unwrap();
        }
        assert_eq!(storage.find_all().unwrap().len(), 10);

        storage.delete_all().unwrap();
        assert!(storage.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_skips_document_decoding() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        storage.save(Pet::new("1", "Rex", "dog", "lab")).unwrap();
        storage.db.put(b"bad", b"not json").unwrap();

        storage.delete_all().unwrap();
        assert!(storage.find_all().unwrap().is_empty());
        assert!(storage.db.get(b"bad").unwrap().is_none());
    }

    #[test]
    fn test_delete_all_is_durable() {
        let tmp_dir = TempDir::new().unwrap();
        let config = test_config(&tmp_dir);

        {
            let storage = RocksStorage::open(&config).unwrap();
            for i in 0..100 {
                storage
                    .save(Pet::new(format!("pet-{i:03}"), "Rex", "dog", "lab"))
                    .unwrap();
            }
            storage.delete_all().unwrap();
        }

        let storage = RocksStorage::open(&config).unwrap();
        assert!(storage.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let tmp_dir = TempDir::new().unwrap();
        let config = test_config(&tmp_dir);

        {
            let storage = RocksStorage::open(&config).unwrap();
            storage.save(Pet::new("1", "Rex", "dog", "lab")).unwrap();
        }

        let storage = RocksStorage::open(&config).unwrap();
        assert_eq!(
            storage.find_by_id("1").unwrap(),
            Some(Pet::new("1", "Rex", "dog", "lab"))
        );
    }

    #[test]
    fn test_corrupt_document_is_store_error() {
        let tmp_dir = TempDir::new().unwrap();
        let storage = RocksStorage::open(&test_config(&tmp_dir)).unwrap();

        storage.db.put(b"bad", b"not json").unwrap();
        assert!(matches!(
            storage.find_by_id("bad"),
            Err(StorageError::Decoding(_))
        ));
        assert!(storage.find_all().is_err());
    }

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("INFO"), LogLevel::Info));
        assert!(matches!(parse_log_level("bogus"), LogLevel::Error));
    }
}
