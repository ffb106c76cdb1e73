/// Persistence layer
///
/// Defines the `Repository` port the services are written against and its two
/// implementations:
/// - `SqliteRepository`: sqlx-backed tables with a UNIQUE index per unique field
/// - `MemoryRepository`: in-process store with the same semantics, used by tests

use crate::domain::{Category, Collaboration, Company, CompanyContact, Entity, Industry, Project, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

// SQLite pool setup and schema creation
pub mod database;

// Generic sqlx repository over the per-entity tables
pub mod sqlite;

// In-memory repository
pub mod memory;

pub use database::Database;
pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

/// Failures surfaced by a repository
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique column already holds this value
    #[error("{message}")]
    Duplicate { message: String },

    #[error("unknown lookup '{lookup}' for {kind}")]
    UnknownLookup { lookup: String, kind: &'static str },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    /// Duplicate error for `entity`'s unique field
    pub fn duplicate<E: Entity>(entity: &E) -> Self {
        let message = match (E::rules().unique.as_ref(), entity.unique_value()) {
            (Some(unique), Some(value)) => unique.duplicate_message(value),
            _ => format!("{} already exists", E::KIND),
        };
        Self::Duplicate { message }
    }

    pub fn unknown_lookup<E: Entity>(lookup: &str) -> Self {
        Self::UnknownLookup { lookup: lookup.to_string(), kind: E::KIND }
    }
}

/// Persistence port for one entity type
///
/// Implementations must enforce the entity's unique field themselves so that the
/// service-level pre-check is never the only guard.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All records in store order
    async fn find_all(&self) -> Result<Vec<E>, StorageError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, StorageError>;

    /// Records whose lookup column `lookup` equals `value`
    async fn find_by(&self, lookup: &str, value: &str) -> Result<Vec<E>, StorageError>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, StorageError>;

    /// Whether any record holds `value` in the unique field (false if there is none)
    async fn exists_by_unique(&self, value: &str) -> Result<bool, StorageError>;

    async fn exists_by(&self, lookup: &str, value: &str) -> Result<bool, StorageError>;

    /// Insert or replace the record keyed by its id
    async fn save(&self, entity: E) -> Result<E, StorageError>;

    /// Returns false when nothing was deleted
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StorageError>;
}

/// One repository per entity type, ready to be handed to the services
#[derive(Clone)]
pub struct Repositories {
    pub industries: Arc<dyn Repository<Industry>>,
    pub categories: Arc<dyn Repository<Category>>,
    pub users: Arc<dyn Repository<User>>,
    pub companies: Arc<dyn Repository<Company>>,
    pub contacts: Arc<dyn Repository<CompanyContact>>,
    pub projects: Arc<dyn Repository<Project>>,
    pub collaborations: Arc<dyn Repository<Collaboration>>,
}

impl Repositories {
    /// SQLite-backed repositories sharing the database pool
    pub fn sqlite(database: &Database) -> Self {
        Self {
            industries: Arc::new(database.repository::<Industry>()),
            categories: Arc::new(database.repository::<Category>()),
            users: Arc::new(database.repository::<User>()),
            companies: Arc::new(database.repository::<Company>()),
            contacts: Arc::new(database.repository::<CompanyContact>()),
            projects: Arc::new(database.repository::<Project>()),
            collaborations: Arc::new(database.repository::<Collaboration>()),
        }
    }

    /// Empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            industries: Arc::new(MemoryRepository::<Industry>::new()),
            categories: Arc::new(MemoryRepository::<Category>::new()),
            users: Arc::new(MemoryRepository::<User>::new()),
            companies: Arc::new(MemoryRepository::<Company>::new()),
            contacts: Arc::new(MemoryRepository::<CompanyContact>::new()),
            projects: Arc::new(MemoryRepository::<Project>::new()),
            collaborations: Arc::new(MemoryRepository::<Collaboration>::new()),
        }
    }
}
