//! Environment-driven configuration

use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:ferrobank.db?mode=rwc".to_string(),
            max_connections: 10,
            connection_timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:ferrobank.db?mode=rwc".to_string());

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            database_url,
            max_connections,
            connection_timeout_seconds: 30,
        }
    }

    /// In-memory database; a single connection, since every pooled
    /// connection to `sqlite::memory:` would otherwise get its own database.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout_seconds: 30,
        }
    }
}

/// Top-level API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub listen_addr: String,
    pub jwt_secret: String,
    pub cors_origin: String,
    pub interest_sweep_interval: Duration,
    pub database: DatabaseConfig,
}

impl ApiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "default_secret_change_in_production".to_string());

        let cors_origin =
            std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let sweep_seconds = std::env::var("INTEREST_SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86_400);

        Self {
            listen_addr,
            jwt_secret,
            cors_origin,
            interest_sweep_interval: Duration::from_secs(sweep_seconds),
            database: DatabaseConfig::from_env(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            listen_addr: "127.0.0.1:0".to_string(),
            jwt_secret: "test-secret".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
            interest_sweep_interval: Duration::from_secs(86_400),
            database: DatabaseConfig::in_memory(),
        }
    }
}
