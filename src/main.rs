/// kolab: relationship tracking backend
///
/// Main entry point for the kolab server. Initializes configuration and starts
/// the HTTP server with the entity REST resources.

use kolab::{config::Config, server::start_server};

/// Application entry point
///
/// Initializes the server with default configuration and starts listening for requests.
/// The server provides:
/// - Entity resources at /api/{industries,categories,users,companies,company-contacts,projects,collaborations}
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:8080 and sqlite://data/kolab.db)
    let config = Config::default();

    // Start the server
    start_server(config).await?;

    Ok(())
}
