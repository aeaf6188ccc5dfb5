// ABOUTME: HTTP route handlers for nutrition targets, trackers, and daily logging
// ABOUTME: Per-feature routers assembled by the server; bearer auth resolved before core logic

//! REST routes.
//!
//! Each feature contributes a `Routes` struct with a
//! `routes(Arc<ServerResources>) -> Router` constructor. Handlers resolve
//! the caller's identity up front and pass the owner id explicitly into
//! database and formula code.

pub mod calories;
pub mod macros;
pub mod nutrition;
pub mod water;

use crate::auth::extract_bearer_token;
use crate::errors::AppResult;
use crate::server::ServerResources;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

/// Resolve the bearer token in `headers` to an owner id.
///
/// # Errors
///
/// Returns `AuthRequired`/`AuthInvalid` before any core logic runs.
pub(crate) fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<Uuid> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let token = extract_bearer_token(header)?;
    resources.auth.owner_id_from_token(token)
}

/// Liveness probe
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "service": "macrolog" }))
}

/// Routes that require no authentication
pub fn health_routes() -> Router {
    Router::new().route("/api/health", get(handle_health))
}
