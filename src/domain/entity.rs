/// Entity contract shared by every persisted record type
///
/// The generic service, the storage backends and the HTTP layer are all written
/// against this trait. Each record type describes its table, its lookup columns and
/// its validation rules here, so none of those layers needs per-entity code.

use crate::domain::rules::Rules;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

/// How a lookup column relates to the rest of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Foreign key holding the id of another entity (exposed as `/{name}/{id}` routes)
    Reference,
    /// Plain indexed attribute (e.g. a user's e-mail)
    Field,
}

/// An indexed column records can be listed by
#[derive(Debug, Clone, Copy)]
pub struct Lookup {
    /// Name used in routes and service calls (e.g. "industry")
    pub name: &'static str,
    /// Storage column backing the lookup (e.g. "industry_id")
    pub column: &'static str,
    pub kind: LookupKind,
}

impl Lookup {
    pub const fn reference(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: LookupKind::Reference }
    }

    pub const fn field(name: &'static str, column: &'static str) -> Self {
        Self { name, column, kind: LookupKind::Field }
    }
}

/// A record type owned by the persistence layer
pub trait Entity:
    Debug + Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Human-readable kind used in messages (e.g. "Company contact")
    const KIND: &'static str;
    /// Storage table name
    const TABLE: &'static str;
    /// Indexed columns this entity can be listed by
    const LOOKUPS: &'static [Lookup];

    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    /// Ordered validation rules and the optional uniqueness constraint
    fn rules() -> &'static Rules<Self>;

    /// Current value of the lookup column named `name`, rendered as stored
    fn lookup_value(&self, name: &str) -> Option<String>;

    /// Resolve a lookup by name
    fn lookup(name: &str) -> Option<&'static Lookup> {
        Self::LOOKUPS.iter().find(|lookup| lookup.name == name)
    }

    /// Value of the unique field, if this entity declares one
    fn unique_value(&self) -> Option<&str> {
        Self::rules().unique.as_ref().map(|unique| (unique.value)(self))
    }
}
