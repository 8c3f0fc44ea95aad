//! JSON file storage adapter.
//!
//! Keeps the entity list in memory and rewrites the whole file on every
//! mutation. Suitable for the small, configuration-sized data this store
//! is meant for.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use super::{DataEntity, Storage};
use crate::error::{StorageError, StorageResult};

// == JSON File Storage ==
/// Storage persisted as a JSON array of entities.
///
/// Writers are serialized and do their file I/O without holding the entity
/// lock, so lookups only wait for the final swap. Any I/O or decode failure
/// is reported as `StorageError::Unavailable`.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entities: RwLock<Vec<DataEntity>>,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Opens the storage at `path`, loading its content.
    ///
    /// A missing file is treated as an empty storage and is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entities = load(&path)?;
        info!(
            "Opened JSON storage at {} with {} entities",
            path.display(),
            entities.len()
        );

        Ok(Self {
            path,
            entities: RwLock::new(entities),
            write_lock: Mutex::new(()),
        })
    }

    /// Applies `mutate` to a copy of the entity list, persists the copy and
    /// only then makes it current. Nothing is written when `mutate` reports
    /// no change.
    fn commit<F>(&self, mutate: F) -> StorageResult<()>
    where
        F: FnOnce(&mut Vec<DataEntity>) -> StorageResult<bool>,
    {
        let _writer = self.write_lock.lock();
        let mut next = self.entities.read().clone();
        if !mutate(&mut next)? {
            return Ok(());
        }
        persist(&self.path, &next)?;
        *self.entities.write() = next;
        Ok(())
    }
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable(format!("{}: {}", path.display(), err))
}

fn load(path: &Path) -> StorageResult<Vec<DataEntity>> {
    match fs::read(path) {
        Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| unavailable(path, e)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(unavailable(path, e)),
    }
}

/// `store.json` -> `store.json.tmp`, next to the target.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn persist(path: &Path, entities: &[DataEntity]) -> StorageResult<()> {
    let bytes = serde_json::to_vec_pretty(entities).map_err(|e| unavailable(path, e))?;
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).map_err(|e| unavailable(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| unavailable(path, e))?;
    debug!("Persisted {} entities to {}", entities.len(), path.display());
    Ok(())
}

impl Storage for JsonFileStorage {
    fn find_by_key(&self, key: &str) -> StorageResult<Option<DataEntity>> {
        Ok(self.entities.read().iter().find(|e| e.key == key).cloned())
    }

    fn find_all(&self) -> StorageResult<Vec<DataEntity>> {
        Ok(self.entities.read().clone())
    }

    fn create(&self, entity: &DataEntity) -> StorageResult<()> {
        self.commit(|entities| {
            if entities.iter().any(|e| e.key == entity.key) {
                return Err(StorageError::Duplicate(entity.key.clone()));
            }
            entities.push(entity.clone());
            Ok(true)
        })
    }

    fn update(&self, entity: &DataEntity) -> StorageResult<()> {
        self.commit(|entities| match entities.iter_mut().find(|e| e.key == entity.key) {
            Some(existing) => {
                existing.value = entity.value.clone();
                Ok(true)
            }
            None => Err(StorageError::NotFound(entity.key.clone())),
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.commit(|entities| {
            let before = entities.len();
            entities.retain(|e| e.key != key);
            Ok(entities.len() != before)
        })
    }
}
