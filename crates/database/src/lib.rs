//! Padikk Database Crate
//!
//! This crate provides database functionality for the Padikk backend,
//! including connection management, migrations, entities with their domain
//! rules, and repository implementations.

use padikk_config::DatabaseConfig;
use sqlx::SqlitePool;
use tracing::error;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::{run_migrations, MIGRATOR};

// Re-export repositories
pub use repos::{
    AlumniRepository, CatchUpRepository, ConnectionRepository, LikeToggle, PlaybookRepository,
    ProfileRepository, ProjectRepository, PulseRepository, StudyLogRepository,
};

// Re-export entities
pub use entities::*;

// Re-export types
pub use types::{DatabaseError, DatabaseResult};

/// Open the pool and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config).await.map_err(|e| {
        error!(error = ?e, "failed to open database");
        DatabaseError::ConnectionError(e.to_string())
    })?;

    run_migrations(&pool).await.map_err(|e| {
        error!(error = ?e, "failed to run migrations");
        DatabaseError::MigrationError(e.to_string())
    })?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialize_database_creates_schema() {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("init.db").display()),
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'profiles'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
