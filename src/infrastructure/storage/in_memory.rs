//! In-memory storage implementation

use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{key_conflict, missing, name_conflict, Storage, StorageEntity};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Entities are kept in creation order. Uniqueness checks and writes happen under the
/// same write lock, so concurrent creates of one name cannot both succeed.
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<Vec<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<E>>, DomainError> {
        self.entities
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<E>>, DomainError> {
        self.entities
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.read()?;
        Ok(entities.iter().find(|e| e.key() == key).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.clone())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.write()?;

        if entities.iter().any(|e| e.key() == entity.key()) {
            return Err(key_conflict::<E>(entity.key()));
        }

        if entities.iter().any(|e| e.unique_name() == entity.unique_name()) {
            return Err(name_conflict::<E>(entity.unique_name()));
        }

        entities.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.write()?;

        let position = entities
            .iter()
            .position(|e| e.key() == entity.key())
            .ok_or_else(|| missing::<E>(entity.key()))?;

        if entities
            .iter()
            .any(|e| e.key() != entity.key() && e.unique_name() == entity.unique_name())
        {
            return Err(name_conflict::<E>(entity.unique_name()));
        }

        entities[position] = entity.clone();
        Ok(entity)
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.iter().any(|e| e.key() == key))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }
}
