/// kolab: relationship tracking backend
///
/// This library provides the REST backend that tracks industries, categories, users,
/// companies, company contacts, projects, and the collaborations linking projects to
/// companies.

// Core configuration and setup
pub mod config;

// Domain model - entity types and their validation rule tables
pub mod domain;

// Persistence layer - repository port with SQLite and in-memory backends
pub mod storage;

// Entity services - validation, uniqueness and delete guards
pub mod service;

// HTTP API layer - REST endpoints for every entity
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use domain::{Category, Collaboration, Company, CompanyContact, Entity, Industry, Project, User};
pub use service::{EntityService, ServiceError, Services};
pub use storage::{Database, Repositories, Repository};
pub use server::{create_app, create_router, start_server};
