/// Configuration management for kolab
///
/// Handles server configuration and the database connection.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL (e.g., "sqlite://data/kolab.db" or "sqlite::memory:")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Directory holding the database file, if the URL points at a file
    pub fn file_dir(&self) -> Option<PathBuf> {
        let path = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url);
        let path = path.split('?').next().unwrap_or_default();

        if path.is_empty() || path == ":memory:" {
            return None;
        }

        PathBuf::from(path)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for k8s/container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("KOLAB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("KOLAB_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: std::env::var("KOLAB_DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://data/kolab.db".to_string()),
                max_connections: std::env::var("KOLAB_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(5),
            },
        }
    }
}
