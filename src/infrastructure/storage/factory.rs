//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::storage::Storage;
use crate::domain::{DomainError, MembershipRepository, Team, User};
use crate::infrastructure::membership::{InMemoryMembershipRepository, PostgresMembershipRepository};

use super::in_memory::InMemoryStorage;
use super::migrations::run_storage_migrations;
use super::postgres::{PostgresConfig, PostgresStorage};

pub const TEAMS_TABLE: &str = "teams";
pub const USERS_TABLE: &str = "users";

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage, lost on restart
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Builds the storage configuration from application settings.
    ///
    /// The postgres backend needs a database URL, from the settings or `DATABASE_URL`.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        match settings.backend {
            StorageBackend::Memory => Ok(Self::InMemory),
            StorageBackend::Postgres => {
                let url = settings.resolve_database_url().ok_or_else(|| {
                    DomainError::configuration(
                        "Postgres storage requires storage.database_url or DATABASE_URL",
                    )
                })?;

                Ok(Self::Postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(settings.max_connections)
                        .with_min_connections(settings.min_connections)
                        .with_connect_timeout(settings.connect_timeout_secs)
                        .with_idle_timeout(settings.idle_timeout_secs),
                ))
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::InMemory => StorageBackend::Memory,
            Self::Postgres(_) => StorageBackend::Postgres,
        }
    }
}

/// The set of stores the services are built on
#[derive(Clone)]
pub struct Repositories {
    pub teams: Arc<dyn Storage<Team>>,
    pub users: Arc<dyn Storage<User>>,
    pub memberships: Arc<dyn MembershipRepository>,
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates every store for the configured backend.
    ///
    /// For PostgreSQL the pending migrations are applied first so a fresh database is usable.
    pub async fn create(config: &StorageConfig) -> Result<Repositories, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Self::create_in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let pool = pg_config.connect().await?;
                run_storage_migrations(&pool).await?;
                Ok(Self::create_postgres(pool))
            }
        }
    }

    /// Creates in-memory stores
    pub fn create_in_memory() -> Repositories {
        Repositories {
            teams: Arc::new(InMemoryStorage::<Team>::new()),
            users: Arc::new(InMemoryStorage::<User>::new()),
            memberships: Arc::new(InMemoryMembershipRepository::new()),
        }
    }

    /// Creates PostgreSQL stores sharing one pool
    pub fn create_postgres(pool: PgPool) -> Repositories {
        Repositories {
            teams: Arc::new(PostgresStorage::<Team>::new(pool.clone(), TEAMS_TABLE)),
            users: Arc::new(PostgresStorage::<User>::new(pool.clone(), USERS_TABLE)),
            memberships: Arc::new(PostgresMembershipRepository::new(pool)),
        }
    }
}
