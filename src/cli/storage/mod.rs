//! Storage initialization command

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{run_storage_migrations, PostgresMigrator, StorageConfig};

/// Create the storage schema for the configured backend.
///
/// Applied migrations are skipped, so running this twice is harmless.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    match StorageConfig::from_settings(&config.storage)? {
        StorageConfig::InMemory => {
            info!("In-memory storage needs no initialization");
        }
        StorageConfig::Postgres(pg_config) => {
            let pool = pg_config.connect().await?;
            let applied = run_storage_migrations(&pool).await?;
            let version = PostgresMigrator::new(pool).current_version().await?;
            info!(applied, schema_version = ?version, "Storage initialized");
        }
    }

    Ok(())
}
