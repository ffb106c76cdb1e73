/// HTTP API Layer
///
/// This module provides the REST endpoints for every entity. It handles:
/// - Uniform CRUD routes per resource
/// - Foreign-key listing routes
/// - Translation of service errors and malformed requests into status codes

// Service error to HTTP response mapping
pub mod error;

// Body and path extractors with JSON error responses
pub mod extract;

// Generic resource endpoints (GET/POST/PUT/DELETE)
pub mod resources;

use crate::service::Services;
use axum::Router;

// Re-export router builders
pub use resources::{resource_routes, user_routes};

/// Create the routes for all seven resources
pub fn create_api_routes(services: Services) -> Router {
    Router::new()
        .merge(resource_routes("/api/industries", services.industries))
        .merge(resource_routes("/api/categories", services.categories))
        .merge(user_routes(services.users))
        .merge(resource_routes("/api/companies", services.companies))
        .merge(resource_routes("/api/company-contacts", services.contacts))
        .merge(resource_routes("/api/projects", services.projects))
        .merge(resource_routes("/api/collaborations", services.collaborations))
}
