//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that require string keys
    fn as_str(&self) -> &str;
}

/// Trait for types that can be stored
///
/// Every stored entity carries a name that must be unique among entities of the same
/// kind. Backends enforce that constraint atomically on create and update.
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Human-readable kind used in error messages ("Team", "User")
    const KIND: &'static str;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;

    /// Returns the value of the unique name constraint
    fn unique_name(&self) -> &str;
}
