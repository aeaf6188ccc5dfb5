// ABOUTME: Server binary for the macrolog nutrition tracking API
// ABOUTME: Loads environment config, opens the database, and serves HTTP

//! # Macrolog Server Binary
//!
//! Starts the macrolog REST API with bearer authentication and a SQLite
//! backing store.

use anyhow::Result;
use clap::Parser;
use macrolog::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    server::{HttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "macrolog-server")]
#[command(about = "Macrolog - nutrition target and daily logging API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Macrolog API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    // An ephemeral secret invalidates all tokens on restart; fine for dev,
    // set JWT_SECRET in production.
    let jwt_secret = match &config.auth.jwt_secret {
        Some(secret) => secret.as_bytes().to_vec(),
        None => {
            warn!("JWT_SECRET not set, generating an ephemeral secret");
            generate_jwt_secret().to_vec()
        }
    };
    let auth = AuthManager::new(jwt_secret, config.auth.jwt_expiry_hours);
    info!("Authentication manager initialized");

    let resources = Arc::new(ServerResources::new(database, auth));
    let server = HttpServer::new(resources);

    info!("Server starting on port {}", config.http_port);
    display_available_endpoints(config.http_port);

    if let Err(e) = server.run(config.http_port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    info!("=== Available API Endpoints ===");
    info!("Nutrition:");
    info!("   Calculate Targets: POST http://{host}:{port}/api/nutritive/calculate");
    info!("   Save Targets:      POST http://{host}:{port}/api/nutritive/targets");
    info!("   Get Targets:       GET  http://{host}:{port}/api/nutritive/targets");
    info!("Calorie Trackers:");
    info!("   Create Tracker:    POST http://{host}:{port}/api/calories/create");
    info!("   Get Tracker:       GET  http://{host}:{port}/api/calories/{{tracker_id}}");
    info!("   Log Calories:      POST http://{host}:{port}/api/calories/{{tracker_id}}/log");
    info!("   Today's Calories:  GET  http://{host}:{port}/api/calories/{{tracker_id}}/today");
    info!("Daily Logs:");
    info!("   Log Macros:        POST http://{host}:{port}/api/macros/log");
    info!("   Today's Macros:    GET  http://{host}:{port}/api/macros/today");
    info!("   Log Water:         POST http://{host}:{port}/api/water/log");
    info!("   Today's Water:     GET  http://{host}:{port}/api/water/today");
    info!("Monitoring:");
    info!("   Health Check:      GET  http://{host}:{port}/api/health");
    info!("=== End of Endpoint List ===");
}
