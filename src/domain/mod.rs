/// Domain model
///
/// This module defines what kolab stores and what a valid record looks like:
/// - The `Entity` contract every record type implements
/// - Declarative validation rule tables
/// - The seven record types (Industry, Category, User, Company, CompanyContact,
///   Project, Collaboration)

pub mod entity;

pub mod rules;

pub mod types;

pub use entity::{Entity, Lookup, LookupKind};
pub use rules::{Check, Rules, UniqueField};
pub use types::{Category, Collaboration, Company, CompanyContact, Industry, Project, User};
