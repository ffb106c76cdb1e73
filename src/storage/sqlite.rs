/// SQLite persistence for entity records
///
/// Every entity gets its own table. The full record is stored as a JSON document
/// while the id, the unique field and the lookup columns are kept as plain indexed
/// columns for fast structured queries. The unique field carries a UNIQUE index, so
/// the database rejects duplicates even when two writers race past the service
/// pre-check.

use crate::domain::Entity;
use crate::storage::{Repository, StorageError};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use std::marker::PhantomData;
use uuid::Uuid;

/// sqlx-backed repository for one entity type
#[derive(Debug)]
pub struct SqliteRepository<E> {
    /// Shared connection pool
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for SqliteRepository<E> {
    fn clone(&self) -> Self {
        Self { pool: self.pool.clone(), _entity: PhantomData }
    }
}

impl<E: Entity> SqliteRepository<E> {
    /// Create repository over an initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, _entity: PhantomData }
    }

    /// Create the entity's table and indexes
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
        let unique_column = E::rules().unique.as_ref().map(|unique| unique.column);

        let mut columns = vec!["id TEXT PRIMARY KEY".to_string()];
        for column in Self::indexed_columns() {
            if Some(column) == unique_column {
                columns.push(format!("{column} TEXT NOT NULL"));
            } else {
                columns.push(format!("{column} TEXT"));
            }
        }
        columns.push("document TEXT NOT NULL".to_string());
        columns.push("created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP".to_string());
        columns.push("updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP".to_string());

        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            E::TABLE,
            columns.join(",\n    ")
        );
        sqlx::query(&create_table).execute(pool).await?;

        for column in Self::indexed_columns() {
            let kind = if Some(column) == unique_column { "UNIQUE INDEX" } else { "INDEX" };
            let create_index = format!(
                "CREATE {kind} IF NOT EXISTS idx_{table}_{column} ON {table}({column})",
                table = E::TABLE
            );
            sqlx::query(&create_index).execute(pool).await?;
        }

        tracing::debug!("Schema ready for table {}", E::TABLE);
        Ok(())
    }

    /// Unique column first, then lookup columns, without repeats
    fn indexed_columns() -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = Vec::new();
        if let Some(unique) = E::rules().unique.as_ref() {
            columns.push(unique.column);
        }
        for lookup in E::LOOKUPS {
            if !columns.contains(&lookup.column) {
                columns.push(lookup.column);
            }
        }
        columns
    }

    /// Values for `indexed_columns`, in the same order
    fn indexed_values(entity: &E) -> Vec<Option<String>> {
        let mut values = Vec::new();
        let mut seen: Vec<&'static str> = Vec::new();
        if let Some(unique) = E::rules().unique.as_ref() {
            values.push(Some((unique.value)(entity).to_string()));
            seen.push(unique.column);
        }
        for lookup in E::LOOKUPS {
            if !seen.contains(&lookup.column) {
                values.push(entity.lookup_value(lookup.name));
                seen.push(lookup.column);
            }
        }
        values
    }

    fn lookup_column(lookup: &str) -> Result<&'static str, StorageError> {
        E::lookup(lookup)
            .map(|lookup| lookup.column)
            .ok_or_else(|| StorageError::unknown_lookup::<E>(lookup))
    }

    fn decode_all(documents: Vec<String>) -> Result<Vec<E>, StorageError> {
        documents
            .iter()
            .map(|document| serde_json::from_str(document).map_err(StorageError::from))
            .collect()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for SqliteRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, StorageError> {
        let sql = format!("SELECT document FROM {} ORDER BY rowid", E::TABLE);
        let documents = sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Self::decode_all(documents)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, StorageError> {
        let sql = format!("SELECT document FROM {} WHERE id = ?", E::TABLE);
        let document = sqlx::query_scalar::<_, String>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    async fn find_by(&self, lookup: &str, value: &str) -> Result<Vec<E>, StorageError> {
        let column = Self::lookup_column(lookup)?;
        let sql = format!("SELECT document FROM {} WHERE {column} = ? ORDER BY rowid", E::TABLE);
        let documents = sqlx::query_scalar::<_, String>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Self::decode_all(documents)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, StorageError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", E::TABLE);
        let found = sqlx::query_scalar::<_, i64>(&sql)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }

    async fn exists_by_unique(&self, value: &str) -> Result<bool, StorageError> {
        let Some(unique) = E::rules().unique.as_ref() else {
            return Ok(false);
        };
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)", E::TABLE, unique.column);
        let found = sqlx::query_scalar::<_, i64>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }

    async fn exists_by(&self, lookup: &str, value: &str) -> Result<bool, StorageError> {
        let column = Self::lookup_column(lookup)?;
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE {column} = ?)", E::TABLE);
        let found = sqlx::query_scalar::<_, i64>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }

    /// Store a new record or replace an existing one
    ///
    /// Uses UPSERT keyed on id so create and full-replace update share one path.
    /// A clash on the unique index is reported as `StorageError::Duplicate`.
    async fn save(&self, entity: E) -> Result<E, StorageError> {
        let columns = Self::indexed_columns();
        let document = serde_json::to_string(&entity)?;

        let mut names = vec!["id"];
        names.extend(columns.iter().copied());
        names.push("document");

        let placeholders = vec!["?"; names.len()].join(", ");
        let updates = names
            .iter()
            .skip(1)
            .map(|column| format!("{column} = excluded.{column}"))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "INSERT INTO {table} ({names}, updated_at) VALUES ({placeholders}, CURRENT_TIMESTAMP)
             ON CONFLICT(id) DO UPDATE SET {updates}, updated_at = CURRENT_TIMESTAMP",
            table = E::TABLE,
            names = names.join(", "),
        );

        let mut query = sqlx::query(&sql).bind(entity.id().to_string());
        for value in Self::indexed_values(&entity) {
            query = query.bind(value);
        }
        query = query.bind(document);

        match query.execute(&self.pool).await {
            Ok(_) => Ok(entity),
            Err(sqlx::Error::Database(error)) if error.is_unique_violation() => {
                tracing::warn!("Unique index rejected {} {}", E::KIND, entity.id());
                Err(StorageError::duplicate(&entity))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StorageError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
