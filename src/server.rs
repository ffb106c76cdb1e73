/// Server setup and initialization
///
/// Wires together all components: database, repositories, services, and HTTP routes.
/// Provides the main application factory function for creating the Axum app.

use crate::{
    api::create_api_routes,
    config::Config,
    service::Services,
    storage::{Database, Repositories},
};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build the router over already-wired services
///
/// Used by `create_app` and by tests that bring their own repositories.
pub fn create_router(services: Services) -> Router {
    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Entity REST resources
        .merge(create_api_routes(services))
        .layer(TraceLayer::new_for_http())
}

/// Create the main Axum application with all routes and middleware
///
/// Opens the database, initializes the schema and wires one service per entity.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🗄️ Connecting to database");
    let database = Database::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

    tracing::info!("🏗️ Wiring entity services");
    let services = Services::new(&Repositories::sqlite(&database));

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = create_router(services);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting kolab server...");

    // Create the application
    let app = create_app(config.clone()).await?;

    // Bind to the configured address
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    // Start the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
