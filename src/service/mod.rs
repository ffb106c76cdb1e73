/// Entity services
///
/// One generic CRUD service is instantiated per entity type. It is the only layer
/// with business rules:
/// - Required-field validation driven by the entity's rule table
/// - Unique-field pre-check (the storage UNIQUE constraint is the final word)
/// - Full-replace updates that keep the stored id
/// - Delete guards refusing to remove records still referenced elsewhere

// Service error kinds
pub mod error;

// Reference guards consulted before deletes
pub mod guard;

pub use error::{ServiceError, ServiceResult};
pub use guard::{ChildReferences, ReferenceGuard};

use crate::domain::{Category, Collaboration, Company, CompanyContact, Entity, Industry, Project, User};
use crate::storage::{Repositories, Repository, StorageError};
use std::sync::Arc;
use uuid::Uuid;

/// CRUD-with-validation over one entity type
pub struct EntityService<E: Entity> {
    repository: Arc<dyn Repository<E>>,
    guards: Vec<Arc<dyn ReferenceGuard>>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self { repository, guards: Vec::new() }
    }

    /// Refuse deletes while `guard` reports the record as referenced
    pub fn with_guard(mut self, guard: Arc<dyn ReferenceGuard>) -> Self {
        self.guards.push(guard);
        self
    }

    /// All records, in store order
    pub async fn list(&self) -> ServiceResult<Vec<E>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<E> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Records whose `relation` foreign key equals `id`
    ///
    /// Does not check that `id` itself exists; no match is an empty list.
    pub async fn list_by(&self, relation: &str, id: Uuid) -> ServiceResult<Vec<E>> {
        tracing::debug!("Listing {} by {} {}", E::KIND, relation, id);
        Ok(self.repository.find_by(relation, &id.to_string()).await?)
    }

    /// First record whose lookup field `field` equals `value`
    pub async fn find_one_by(&self, field: &str, value: &str) -> ServiceResult<E> {
        self.repository
            .find_by(field, value)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("{} with {} {} not found", E::KIND, field, value)))
    }

    /// Validate, check uniqueness, then persist under a fresh id
    pub async fn create(&self, mut candidate: E) -> ServiceResult<E> {
        Self::validate(&candidate)?;

        if let Some(value) = candidate.unique_value() {
            if self.repository.exists_by_unique(value).await? {
                tracing::warn!("Rejected duplicate {}: {}", E::KIND, value);
                return Err(StorageError::duplicate(&candidate).into());
            }
        }

        candidate.set_id(Uuid::new_v4());
        let created = self.repository.save(candidate).await?;

        tracing::info!("Created {} {}", E::KIND, created.id());
        Ok(created)
    }

    /// Replace every mutable field of record `id` with the candidate's
    ///
    /// The uniqueness check is skipped when the unique value is unchanged, so a
    /// record can always be saved under its own current name.
    pub async fn update(&self, id: Uuid, mut candidate: E) -> ServiceResult<E> {
        let existing = self.get(id).await?;
        Self::validate(&candidate)?;

        if let Some(value) = candidate.unique_value() {
            let changed = existing.unique_value() != Some(value);
            if changed && self.repository.exists_by_unique(value).await? {
                tracing::warn!("Rejected duplicate {} on update of {}: {}", E::KIND, id, value);
                return Err(StorageError::duplicate(&candidate).into());
            }
        }

        candidate.set_id(id);
        let updated = self.repository.save(candidate).await?;

        tracing::info!("Updated {} {}", E::KIND, id);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(Self::not_found(id));
        }

        for guard in &self.guards {
            if let Some(kind) = guard.referenced_by(id).await? {
                tracing::warn!("Refused to delete {} {}: referenced by {}", E::KIND, id, kind);
                return Err(ServiceError::Conflict(format!(
                    "{} with id {} is still referenced by {} records",
                    E::KIND,
                    id,
                    kind
                )));
            }
        }

        // Gone between the existence check and the delete
        if !self.repository.delete_by_id(id).await? {
            return Err(Self::not_found(id));
        }

        tracing::info!("Deleted {} {}", E::KIND, id);
        Ok(())
    }

    fn validate(candidate: &E) -> ServiceResult<()> {
        E::rules().validate(candidate).map_err(|message| {
            tracing::debug!("Rejected {}: {}", E::KIND, message);
            ServiceError::Validation(message.to_string())
        })
    }

    fn not_found(id: Uuid) -> ServiceError {
        ServiceError::NotFound(format!("{} with id {} not found", E::KIND, id))
    }
}

/// The seven entity services, wired with their delete guards
#[derive(Clone)]
pub struct Services {
    pub industries: Arc<EntityService<Industry>>,
    pub categories: Arc<EntityService<Category>>,
    pub users: Arc<EntityService<User>>,
    pub companies: Arc<EntityService<Company>>,
    pub contacts: Arc<EntityService<CompanyContact>>,
    pub projects: Arc<EntityService<Project>>,
    pub collaborations: Arc<EntityService<Collaboration>>,
}

impl Services {
    pub fn new(repositories: &Repositories) -> Self {
        let r = repositories;

        let industries = EntityService::new(r.industries.clone())
            .with_guard(Arc::new(ChildReferences::new(r.companies.clone(), "industry")));

        let categories = EntityService::new(r.categories.clone())
            .with_guard(Arc::new(ChildReferences::new(r.projects.clone(), "category")));

        let users = EntityService::new(r.users.clone())
            .with_guard(Arc::new(ChildReferences::new(r.projects.clone(), "responsible")))
            .with_guard(Arc::new(ChildReferences::new(r.collaborations.clone(), "responsible")));

        let companies = EntityService::new(r.companies.clone())
            .with_guard(Arc::new(ChildReferences::new(r.contacts.clone(), "company")))
            .with_guard(Arc::new(ChildReferences::new(r.collaborations.clone(), "company")));

        let contacts = EntityService::new(r.contacts.clone())
            .with_guard(Arc::new(ChildReferences::new(r.collaborations.clone(), "contact")));

        let projects = EntityService::new(r.projects.clone())
            .with_guard(Arc::new(ChildReferences::new(r.collaborations.clone(), "project")));

        let collaborations = EntityService::new(r.collaborations.clone());

        Self {
            industries: Arc::new(industries),
            categories: Arc::new(categories),
            users: Arc::new(users),
            companies: Arc::new(companies),
            contacts: Arc::new(contacts),
            projects: Arc::new(projects),
            collaborations: Arc::new(collaborations),
        }
    }
}
