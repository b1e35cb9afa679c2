//! Snapshot persistence for the engine collections.
//!
//! Durable storage is a key-value blob store: one opaque value per
//! collection, read once at startup and written after every successful
//! mutation. [`JsonDirStore`] keeps each blob as a JSON file in a data
//! directory; [`MemoryStore`] backs tests and ephemeral runs.

use std::{collections::HashMap, fmt, fs, io, path::PathBuf};

use thiserror::Error;

/// The collections the engine snapshots, with their stable storage keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    Residents,
    Payments,
    Rooms,
    MessFee,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Residents,
        Collection::Payments,
        Collection::Rooms,
        Collection::MessFee,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Residents => "residents",
            Self::Payments => "payments",
            Self::Rooms => "rooms",
            Self::MessFee => "mess_fee",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot io failure: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Contract with the durable store: `load` returns `None` for absent keys so
/// the engine can fall back to built-in defaults.
pub trait StorageGateway: fmt::Debug {
    fn load(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError>;
    fn save(&mut self, collection: Collection, blob: &[u8]) -> Result<(), StorageError>;
}

/// Blob store backed by one `<key>.json` file per collection.
#[derive(Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.key()))
    }
}

impl StorageGateway for JsonDirStore {
    fn load(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path(collection)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, collection: Collection, blob: &[u8]) -> Result<(), StorageError> {
        fs::write(self.path(collection), blob)?;
        Ok(())
    }
}

/// In-memory blob store for tests and `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<Collection, Vec<u8>>,
}

impl StorageGateway for MemoryStore {
    fn load(&self, collection: Collection) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.get(&collection).cloned())
    }

    fn save(&mut self, collection: Collection, blob: &[u8]) -> Result<(), StorageError> {
        self.blobs.insert(collection, blob.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_stores")
            .join(Uuid::new_v4().to_string());
        fs::create_dir_all(&root).unwrap();
        root
    }

    #[test]
    fn absent_key_loads_as_none() {
        let store = JsonDirStore::new(scratch_dir()).unwrap();
        assert!(store.load(Collection::Residents).unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = JsonDirStore::new(scratch_dir()).unwrap();
        store.save(Collection::Rooms, b"[]").unwrap();
        assert_eq!(store.load(Collection::Rooms).unwrap().unwrap(), b"[]");
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::default();
        assert!(store.load(Collection::MessFee).unwrap().is_none());
        store.save(Collection::MessFee, b"{}").unwrap();
        assert_eq!(store.load(Collection::MessFee).unwrap().unwrap(), b"{}");
    }
}
