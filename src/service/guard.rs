/// Delete guards
///
/// A record may not be deleted while another record still points at it. Each
/// guard watches one foreign-key relation of a child entity type and answers
/// whether a given id is in use there.

use crate::domain::Entity;
use crate::storage::{Repository, StorageError};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait ReferenceGuard: Send + Sync {
    /// Kind of the referencing records, if any record references `id`
    async fn referenced_by(&self, id: Uuid) -> Result<Option<&'static str>, StorageError>;
}

/// Guard over the `relation` foreign key of child entity `C`
pub struct ChildReferences<C: Entity> {
    repository: Arc<dyn Repository<C>>,
    relation: &'static str,
}

impl<C: Entity> ChildReferences<C> {
    pub fn new(repository: Arc<dyn Repository<C>>, relation: &'static str) -> Self {
        Self { repository, relation }
    }
}

#[async_trait]
impl<C: Entity> ReferenceGuard for ChildReferences<C> {
    async fn referenced_by(&self, id: Uuid) -> Result<Option<&'static str>, StorageError> {
        let in_use = self.repository.exists_by(self.relation, &id.to_string()).await?;
        Ok(in_use.then_some(C::KIND))
    }
}
