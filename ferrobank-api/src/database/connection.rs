//! Database connection management with SQLx
//!
//! Creates the SQLite connection pool and applies the embedded migrations.

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::ServiceError;

/// Create the connection pool and run migrations
pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, ServiceError> {
    info!(
        "Creating SQLite connection pool with {} max connections",
        config.max_connections
    );

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .connect(&config.database_url)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to create SQLite pool: {}", e)))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to run migrations: {}", e)))?;

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Health check for the database connection
pub async fn health_check(pool: &SqlitePool) -> Result<(), ServiceError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Health check failed: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::DatabaseConfig;

    #[tokio::test]
    async fn initializes_a_file_backed_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ferrobank-test.db");
        let config = DatabaseConfig {
            database_url: format!("sqlite:{}?mode=rwc", path.display()),
            max_connections: 1,
            connection_timeout_seconds: 5,
        };

        let pool = initialize_database(&config).await.unwrap();
        health_check(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn migrations_apply_to_an_in_memory_database() {
        let pool = initialize_database(&DatabaseConfig::in_memory())
            .await
            .unwrap();

        // Every table from the initial migration is queryable.
        for table in [
            "accounts",
            "ledger_entries",
            "loans",
            "interest_history",
            "reports",
        ] {
            sqlx::query(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await
                .unwrap();
        }
    }
}
