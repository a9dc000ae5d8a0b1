//! Storage domain - Generic storage abstraction layer

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::{key_conflict, missing, name_conflict, Storage};

#[cfg(test)]
pub use repository::mock;
