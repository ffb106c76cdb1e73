/// In-memory repository
///
/// Keeps records in insertion order behind a tokio `RwLock` and applies the same
/// unique-field rule as the SQLite UNIQUE index.

use crate::domain::Entity;
use crate::storage::{Repository, StorageError};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
pub struct MemoryRepository<E> {
    records: RwLock<Vec<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self { records: RwLock::new(Vec::new()) }
    }

    fn resolve(lookup: &str) -> Result<&'static str, StorageError> {
        E::lookup(lookup)
            .map(|lookup| lookup.name)
            .ok_or_else(|| StorageError::unknown_lookup::<E>(lookup))
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, StorageError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, StorageError> {
        Ok(self.records.read().await.iter().find(|record| record.id() == id).cloned())
    }

    async fn find_by(&self, lookup: &str, value: &str) -> Result<Vec<E>, StorageError> {
        let name = Self::resolve(lookup)?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.lookup_value(name).as_deref() == Some(value))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, StorageError> {
        Ok(self.records.read().await.iter().any(|record| record.id() == id))
    }

    async fn exists_by_unique(&self, value: &str) -> Result<bool, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .any(|record| record.unique_value() == Some(value)))
    }

    async fn exists_by(&self, lookup: &str, value: &str) -> Result<bool, StorageError> {
        let name = Self::resolve(lookup)?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .any(|record| record.lookup_value(name).as_deref() == Some(value)))
    }

    async fn save(&self, entity: E) -> Result<E, StorageError> {
        let mut records = self.records.write().await;

        if let Some(value) = entity.unique_value() {
            let taken = records
                .iter()
                .any(|record| record.id() != entity.id() && record.unique_value() == Some(value));
            if taken {
                return Err(StorageError::duplicate(&entity));
            }
        }

        match records.iter_mut().find(|record| record.id() == entity.id()) {
            Some(existing) => *existing = entity.clone(),
            None => records.push(entity.clone()),
        }
        Ok(entity)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id() != id);
        Ok(records.len() < before)
    }
}
