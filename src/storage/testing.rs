//! Storage double used by unit tests: a memory storage that counts calls and
//! can be switched into an outage.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{DataEntity, MemoryStorage, Storage};
use crate::error::{StorageError, StorageResult};

#[derive(Debug, Default)]
pub(crate) struct FlakyStorage {
    inner: MemoryStorage,
    down: AtomicBool,
    calls: AtomicUsize,
    // 0 = no limit
    fail_after: AtomicUsize,
}

impl FlakyStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_entities(entities: impl IntoIterator<Item = DataEntity>) -> Self {
        Self {
            inner: MemoryStorage::with_entities(entities),
            ..Self::default()
        }
    }

    pub(crate) fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    /// Lets `n` more calls through, then goes down.
    pub(crate) fn fail_after(&self, n: usize) {
        let calls = self.calls.load(Ordering::SeqCst);
        self.fail_after.store(calls + n, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn inner(&self) -> &MemoryStorage {
        &self.inner
    }

    fn enter(&self) -> StorageResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let limit = self.fail_after.load(Ordering::SeqCst);
        if limit > 0 && call > limit {
            self.down.store(true, Ordering::SeqCst);
        }
        if self.down.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Storage for FlakyStorage {
    fn find_by_key(&self, key: &str) -> StorageResult<Option<DataEntity>> {
        self.enter()?;
        self.inner.find_by_key(key)
    }

    fn find_all(&self) -> StorageResult<Vec<DataEntity>> {
        self.enter()?;
        self.inner.find_all()
    }

    fn create(&self, entity: &DataEntity) -> StorageResult<()> {
        self.enter()?;
        self.inner.create(entity)
    }

    fn update(&self, entity: &DataEntity) -> StorageResult<()> {
        self.enter()?;
        self.inner.update(entity)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.enter()?;
        self.inner.remove(key)
    }
}
