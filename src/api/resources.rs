/// Generic REST resource endpoints
///
/// Builds the uniform CRUD surface for any entity type:
/// - GET    {base}                 list all
/// - GET    {base}/{id}            get by id
/// - GET    {base}/{relation}/{id} list by foreign key (one route per reference lookup)
/// - POST   {base}                 create (201)
/// - PUT    {base}/{id}            full-replace update
/// - DELETE {base}/{id}            delete (200, empty body)

use crate::{
    api::{
        error::ApiResult,
        extract::{Param, Payload},
    },
    domain::{Entity, LookupKind, User},
    service::EntityService,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Shared handler state for one resource
pub type ServiceState<E> = State<Arc<EntityService<E>>>;

/// Create the CRUD routes for entity `E` under `base` (e.g. "/api/companies")
pub fn resource_routes<E: Entity>(base: &str, service: Arc<EntityService<E>>) -> Router {
    let mut router = Router::new()
        .route(base, get(list::<E>).post(create::<E>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_one::<E>).put(update::<E>).delete(delete_one::<E>),
        );

    for lookup in E::LOOKUPS.iter().filter(|lookup| lookup.kind == LookupKind::Reference) {
        let relation = lookup.name;
        router = router.route(
            &format!("{base}/{relation}/{{id}}"),
            get(move |state: ServiceState<E>, Param(id): Param<Uuid>| list_by(state, id, relation)),
        );
    }

    router.with_state(service)
}

/// User routes plus the e-mail lookup
///
/// GET /api/users/email/{email}
pub fn user_routes(service: Arc<EntityService<User>>) -> Router {
    let lookup = Router::new()
        .route("/api/users/email/{email}", get(find_user_by_email))
        .with_state(service.clone());

    resource_routes("/api/users", service).merge(lookup)
}

async fn list<E: Entity>(State(service): ServiceState<E>) -> ApiResult<Json<Vec<E>>> {
    Ok(Json(service.list().await?))
}

async fn get_one<E: Entity>(
    State(service): ServiceState<E>,
    Param(id): Param<Uuid>,
) -> ApiResult<Json<E>> {
    Ok(Json(service.get(id).await?))
}

async fn list_by<E: Entity>(
    State(service): ServiceState<E>,
    id: Uuid,
    relation: &'static str,
) -> ApiResult<Json<Vec<E>>> {
    Ok(Json(service.list_by(relation, id).await?))
}

async fn create<E: Entity>(
    State(service): ServiceState<E>,
    Payload(candidate): Payload<E>,
) -> ApiResult<(StatusCode, Json<E>)> {
    let created = service.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update<E: Entity>(
    State(service): ServiceState<E>,
    Param(id): Param<Uuid>,
    Payload(candidate): Payload<E>,
) -> ApiResult<Json<E>> {
    Ok(Json(service.update(id, candidate).await?))
}

async fn delete_one<E: Entity>(
    State(service): ServiceState<E>,
    Param(id): Param<Uuid>,
) -> ApiResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::OK)
}

async fn find_user_by_email(
    State(service): ServiceState<User>,
    Param(email): Param<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(service.find_one_by("email", &email).await?))
}
