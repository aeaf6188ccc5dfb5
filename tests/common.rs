// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, and body profile helpers
#![allow(dead_code, clippy::missing_errors_doc, clippy::missing_panics_doc)]
//! Shared test utilities for `macrolog`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use macrolog::{
    auth::{generate_jwt_secret, AuthManager},
    database::Database,
    models::{Gender, UserBodyProfile},
};
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    let jwt_secret = generate_jwt_secret().to_vec();
    AuthManager::new(jwt_secret, 24)
}

/// Seed a body profile and return the owning user's id
pub async fn seed_body_profile(database: &Database, gender: Gender) -> Result<Uuid> {
    let user_id = Uuid::new_v4();
    database
        .upsert_body_profile(&UserBodyProfile {
            user_id,
            gender,
            height_cm: 180.0,
            weight_kg: 80.0,
        })
        .await?;
    Ok(user_id)
}
