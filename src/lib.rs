//! Teams API
//!
//! A REST service for managing teams, users and the membership between them.
//! Storage is in memory or PostgreSQL; both enforce unique team and user names.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::{StorageConfig, StorageFactory};
use tracing::info;

/// Build the application state for the configured storage backend.
///
/// PostgreSQL schemas are created or brought up to date before the state is returned.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_settings(&config.storage)?;
    info!(backend = ?storage_config.backend(), "Initializing storage");

    let repositories = StorageFactory::create(&storage_config).await?;

    Ok(AppState::from_repositories(repositories))
}

/// Application state over empty in-memory stores
pub fn create_in_memory_app_state() -> AppState {
    AppState::from_repositories(StorageFactory::create_in_memory())
}
