//! In-memory storage adapter.

use parking_lot::RwLock;

use super::{DataEntity, Storage};
use crate::error::{StorageError, StorageResult};

// == Memory Storage ==
/// Storage kept in process memory.
///
/// Entities are held in insertion order, which is the order `find_all`
/// reports them in.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entities: RwLock<Vec<DataEntity>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-filled with the given entities.
    ///
    /// Later duplicates of a key replace earlier ones.
    pub fn with_entities(entities: impl IntoIterator<Item = DataEntity>) -> Self {
        let storage = Self::new();
        {
            let mut guard = storage.entities.write();
            for entity in entities {
                match guard.iter_mut().find(|e| e.key == entity.key) {
                    Some(existing) => existing.value = entity.value,
                    None => guard.push(entity),
                }
            }
        }
        storage
    }

    /// Returns the number of stored entities.
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn find_by_key(&self, key: &str) -> StorageResult<Option<DataEntity>> {
        Ok(self.entities.read().iter().find(|e| e.key == key).cloned())
    }

    fn find_all(&self) -> StorageResult<Vec<DataEntity>> {
        Ok(self.entities.read().clone())
    }

    fn create(&self, entity: &DataEntity) -> StorageResult<()> {
        let mut guard = self.entities.write();
        if guard.iter().any(|e| e.key == entity.key) {
            return Err(StorageError::Duplicate(entity.key.clone()));
        }
        guard.push(entity.clone());
        Ok(())
    }

    fn update(&self, entity: &DataEntity) -> StorageResult<()> {
        let mut guard = self.entities.write();
        match guard.iter_mut().find(|e| e.key == entity.key) {
            Some(existing) => {
                existing.value = entity.value.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound(entity.key.clone())),
        }
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entities.write().retain(|e| e.key != key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_find() {
        let storage = MemoryStorage::new();
        storage.create(&DataEntity::new("k", "v")).unwrap();

        assert_eq!(
            storage.find_by_key("k").unwrap(),
            Some(DataEntity::new("k", "v"))
        );
        assert_eq!(storage.find_by_key("other").unwrap(), None);
    }

    #[test]
    fn test_create_duplicate() {
        let storage = MemoryStorage::new();
        storage.create(&DataEntity::new("k", "v")).unwrap();

        let result = storage.create(&DataEntity::new("k", "w"));
        assert!(matches!(result, Err(StorageError::Duplicate(_))));
    }

    #[test]
    fn test_update() {
        let storage = MemoryStorage::new();
        storage.create(&DataEntity::new("k", "v")).unwrap();
        storage.update(&DataEntity::new("k", "w")).unwrap();

        assert_eq!(storage.find_by_key("k").unwrap().unwrap().value, "w");
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_update_missing() {
        let storage = MemoryStorage::new();
        let result = storage.update(&DataEntity::new("k", "v"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("nothing").is_ok());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_find_all_keeps_insertion_order() {
        let storage = MemoryStorage::with_entities(vec![
            DataEntity::new("c", "1"),
            DataEntity::new("a", "2"),
            DataEntity::new("b", "3"),
        ]);

        let keys: Vec<String> = storage
            .find_all()
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_with_entities_dedups() {
        let storage = MemoryStorage::with_entities(vec![
            DataEntity::new("a", "1"),
            DataEntity::new("a", "2"),
        ]);
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.find_by_key("a").unwrap().unwrap().value, "2");
    }
}
