/// SQLite connection pool and schema bootstrap
///
/// Owns the single pool every repository shares. File-backed databases get their
/// parent directory created on connect; `in_memory` gives each caller a private,
/// throwaway database for tests.

use crate::{
    config::DatabaseConfig,
    domain::{Category, Collaboration, Company, CompanyContact, Entity, Industry, Project, User},
    storage::sqlite::SqliteRepository,
};
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Shared SQLite pool with all entity tables initialized
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect using the configured URL and initialize the schema
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if let Some(dir) = config.file_dir() {
            tracing::info!("📁 Ensuring database directory exists: {}", dir.display());
            std::fs::create_dir_all(&dir).map_err(|e| {
                anyhow::anyhow!("Failed to create database directory '{}': {}", dir.display(), e)
            })?;
        }

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| anyhow::anyhow!("Invalid database url '{}': {}", config.url, e))?
            .create_if_missing(true);

        tracing::info!("🗄️ Opening database pool: {}", config.url);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.init_schema().await?;

        tracing::info!("✅ Database ready: {}", config.url);
        Ok(database)
    }

    /// Private in-memory database
    ///
    /// An in-memory SQLite database lives as long as its connection, so the pool is
    /// pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.init_schema().await?;
        Ok(database)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository for one entity type over the shared pool
    pub fn repository<E: Entity>(&self) -> SqliteRepository<E> {
        SqliteRepository::new(self.pool.clone())
    }

    /// Create every entity table and index
    pub async fn init_schema(&self) -> Result<()> {
        SqliteRepository::<Industry>::init_schema(&self.pool).await?;
        SqliteRepository::<Category>::init_schema(&self.pool).await?;
        SqliteRepository::<User>::init_schema(&self.pool).await?;
        SqliteRepository::<Company>::init_schema(&self.pool).await?;
        SqliteRepository::<CompanyContact>::init_schema(&self.pool).await?;
        SqliteRepository::<Project>::init_schema(&self.pool).await?;
        SqliteRepository::<Collaboration>::init_schema(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let database = Database::in_memory().await.unwrap();
        database.init_schema().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(database.pool())
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec![
                "categories",
                "collaborations",
                "companies",
                "company_contacts",
                "industries",
                "projects",
                "users"
            ]
        );
    }

    #[tokio::test]
    async fn unique_fields_get_unique_indexes() {
        let database = Database::in_memory().await.unwrap();
        let unique: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND sql LIKE 'CREATE UNIQUE%' ORDER BY name",
        )
        .fetch_all(database.pool())
        .await
        .unwrap();

        assert_eq!(
            unique,
            vec![
                "idx_categories_name",
                "idx_companies_name",
                "idx_company_contacts_email",
                "idx_industries_name",
                "idx_projects_name"
            ]
        );
    }

    #[tokio::test]
    async fn connect_creates_file_database_and_directory() {
        let dir = std::env::temp_dir().join(format!("kolab-test-{}", uuid::Uuid::new_v4()));
        let config = DatabaseConfig {
            url: format!("sqlite://{}/nested/kolab.db", dir.display()),
            max_connections: 2,
        };

        let database = Database::connect(&config).await.unwrap();
        database.pool().close().await;

        assert!(dir.join("nested").join("kolab.db").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
