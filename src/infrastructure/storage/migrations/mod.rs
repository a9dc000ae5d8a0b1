//! Database migrations infrastructure

use sqlx::postgres::PgPool;

use crate::domain::DomainError;

/// Applies schema migrations against PostgreSQL, recording each in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Runs a single migration unless it was already applied.
    ///
    /// Returns `true` when the migration ran. The schema change and its
    /// `_migrations` record are committed together.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin migration: {}", e)))?;

        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
                .bind(migration.version)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration status: {}", e))
                })?;

        if applied {
            return Ok(false);
        }

        sqlx::raw_sql(&migration.up)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to commit migration {}: {}",
                migration.version, e
            ))
        })?;

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

/// Represents a forward-only database migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL to run when applying the migration; may hold several statements
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }
}

/// Collection of migrations for the storage layer
pub fn storage_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create teams table",
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                key TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                data JSONB NOT NULL,
                seq BIGSERIAL NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT teams_name_key UNIQUE (name)
            );
            CREATE INDEX IF NOT EXISTS idx_teams_seq ON teams (seq);
            "#,
        ),
        Migration::new(
            2,
            "Create users table",
            r#"
            CREATE TABLE IF NOT EXISTS users (
                key TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                data JSONB NOT NULL,
                seq BIGSERIAL NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT users_name_key UNIQUE (name)
            );
            CREATE INDEX IF NOT EXISTS idx_users_seq ON users (seq);
            "#,
        ),
        Migration::new(
            3,
            "Create team_members table",
            r#"
            CREATE TABLE IF NOT EXISTS team_members (
                team_id TEXT NOT NULL REFERENCES teams (key),
                user_id TEXT NOT NULL REFERENCES users (key),
                seq BIGSERIAL NOT NULL,
                added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (team_id, user_id)
            );
            CREATE INDEX IF NOT EXISTS idx_team_members_user ON team_members (user_id, seq);
            CREATE INDEX IF NOT EXISTS idx_team_members_team_seq ON team_members (team_id, seq);
            "#,
        ),
    ]
}

/// Runs all storage migrations in version order. Already applied versions are skipped.
pub async fn run_storage_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in storage_migrations() {
        if migrator.run_migration(&migration).await? {
            tracing::info!(
                version = migration.version,
                description = %migration.description,
                "Applied migration"
            );
            applied += 1;
        }
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration = Migration::new(1, "Test migration", "CREATE TABLE test (id INT)");

        assert_eq!(migration.version, 1);
        assert_eq!(migration.description, "Test migration");
        assert!(migration.up.contains("CREATE TABLE"));
    }

    #[test]
    fn test_storage_migrations_order() {
        let migrations = storage_migrations();
        let versions: Vec<i64> = migrations.iter().map(|m| m.version).collect();

        assert_eq!(versions, vec![1, 2, 3]);
    }

    #[test]
    fn test_entity_tables_enforce_unique_names() {
        let migrations = storage_migrations();

        assert!(migrations[0].up.contains("CONSTRAINT teams_name_key UNIQUE (name)"));
        assert!(migrations[1].up.contains("CONSTRAINT users_name_key UNIQUE (name)"));
    }

    #[test]
    fn test_membership_table_references_entities() {
        let membership = &storage_migrations()[2];

        assert!(membership.up.contains("REFERENCES teams (key)"));
        assert!(membership.up.contains("REFERENCES users (key)"));
        assert!(membership.up.contains("PRIMARY KEY (team_id, user_id)"));
    }
}
