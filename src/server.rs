// ABOUTME: Shared resource container and HTTP server assembly
// ABOUTME: Builds one axum router from the per-feature route groups and serves it

//! Server wiring.
//!
//! `ServerResources` holds the shared state every handler needs. It is built
//! once at startup, wrapped in an `Arc`, and handed to each route group.

use crate::auth::AuthManager;
use crate::database::Database;
use crate::nutrition::NutritionTables;
use crate::routes::calories::CalorieRoutes;
use crate::routes::health_routes;
use crate::routes::macros::MacroRoutes;
use crate::routes::nutrition::NutritionRoutes;
use crate::routes::water::WaterRoutes;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server state.
pub struct ServerResources {
    pub database: Database,
    pub auth: AuthManager,
    pub tables: NutritionTables,
}

impl ServerResources {
    pub fn new(database: Database, auth: AuthManager) -> Self {
        Self {
            database,
            auth,
            tables: NutritionTables::default(),
        }
    }
}

/// HTTP server over the nutrition, calorie, macro, and water route groups.
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full router.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(NutritionRoutes::routes(self.resources.clone()))
            .merge(CalorieRoutes::routes(self.resources.clone()))
            .merge(MacroRoutes::routes(self.resources.clone()))
            .merge(WaterRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind and serve until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound.
    pub async fn run(self, port: u16) -> Result<()> {
        let addr = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        info!("HTTP server listening on {addr}");

        axum::serve(listener, self.router())
            .await
            .context("HTTP server exited")?;
        Ok(())
    }
}
