//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageConfig, StorageFactory, TEAMS_TABLE, USERS_TABLE};
pub use in_memory::InMemoryStorage;
pub use migrations::{run_storage_migrations, Migration, PostgresMigrator};
pub use postgres::{PostgresConfig, PostgresStorage};
