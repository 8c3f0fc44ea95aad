//! Storage Module
//!
//! The persistence port the datastore sits on, plus the adapters shipped
//! with the server.

mod entity;
mod file;
mod memory;

#[cfg(test)]
pub(crate) mod testing;

pub use entity::DataEntity;
pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageResult;

// == Storage Port ==
/// Synchronous key/value persistence.
///
/// Implementations must be safe to share between threads. Every method may
/// fail with [`StorageError::Unavailable`](crate::error::StorageError) when
/// the backend is broken.
pub trait Storage: Send + Sync {
    /// Looks up an entity by its primary key.
    fn find_by_key(&self, key: &str) -> StorageResult<Option<DataEntity>>;

    /// Returns every stored entity, in storage discovery order.
    fn find_all(&self) -> StorageResult<Vec<DataEntity>>;

    /// Inserts a new entity.
    fn create(&self, entity: &DataEntity) -> StorageResult<()>;

    /// Replaces the value of an existing entity.
    fn update(&self, entity: &DataEntity) -> StorageResult<()>;

    /// Deletes an entity. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
