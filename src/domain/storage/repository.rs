//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Generic storage trait for the entities of this service
///
/// Entities are created once and then updated in place; they are never deleted.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities in the order they were created
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new entity if neither its key nor its unique name is taken.
    /// The check and the insert happen as one atomic step.
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Replaces an existing entity. Fails with `NotFound` for an unknown key and with
    /// `Conflict` when another entity already holds the same unique name.
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Checks if an entity exists by its key
    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}

/// Error for a unique name held by another entity
pub fn name_conflict<E: StorageEntity>(name: &str) -> DomainError {
    DomainError::conflict(format!("{} name '{}' already exists", E::KIND, name))
}

/// Error for a key that is already in use
pub fn key_conflict<E: StorageEntity>(key: &E::Key) -> DomainError {
    DomainError::conflict(format!("{} '{}' already exists", E::KIND, key.as_str()))
}

/// Error for a key that does not exist
pub fn missing<E: StorageEntity>(key: &E::Key) -> DomainError {
    DomainError::not_found(format!("{} '{}' not found", E::KIND, key.as_str()))
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock storage for testing
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<Vec<E>>,
        error: Mutex<Option<String>>,
    }

    impl<E> Default for MockStorage<E>
    where
        E: StorageEntity,
    {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(Vec::new()),
                error: Mutex::new(None),
            }
        }

        pub fn with_entity(self, entity: E) -> Self {
            self.entities.lock().unwrap().push(entity);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
            self.check_error()?;
            Ok(self
                .entities
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.key() == key)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().clone())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let mut entities = self.entities.lock().unwrap();

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
            self.check_error()?;
            let mut entities = self.entities.lock().unwrap();

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
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        struct TestKey(String);

        impl StorageKey for TestKey {
            fn as_str(&self) -> &str {
                &self.0
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct TestEntity {
            id: TestKey,
            name: String,
        }

        impl StorageEntity for TestEntity {
            type Key = TestKey;

            const KIND: &'static str = "Test";

            fn key(&self) -> &Self::Key {
                &self.id
            }

            fn unique_name(&self) -> &str {
                &self.name
            }
        }

        fn create_test_entity(id: &str, name: &str) -> TestEntity {
            TestEntity {
                id: TestKey(id.to_string()),
                name: name.to_string(),
            }
        }

        #[tokio::test]
        async fn test_mock_storage_create_and_get() {
            let storage: MockStorage<TestEntity> = MockStorage::new();
            storage.create(create_test_entity("1", "Test")).await.unwrap();

            let result = storage.get(&TestKey("1".to_string())).await.unwrap();
            assert_eq!(result.unwrap().name, "Test");
        }

        #[tokio::test]
        async fn test_mock_storage_name_conflict() {
            let storage: MockStorage<TestEntity> =
                MockStorage::new().with_entity(create_test_entity("1", "Test"));

            let result = storage.create(create_test_entity("2", "Test")).await;
            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_mock_storage_update_not_found() {
            let storage: MockStorage<TestEntity> = MockStorage::new();

            let result = storage.update(create_test_entity("1", "Test")).await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_mock_storage_with_error() {
            let storage: MockStorage<TestEntity> =
                MockStorage::new().with_error("Simulated storage error");

            let result = storage.list().await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
