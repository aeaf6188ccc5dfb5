// ABOUTME: SQLite-backed storage for trackers, daily aggregates, and target snapshots
// ABOUTME: Compound unique keys per aggregate kind; appends are single-statement upserts

//! Database management.
//!
//! One `Database` owns the connection pool; each domain contributes its
//! own migration and operations from a sibling module. Aggregate tables
//! carry a compound primary key on (owner, day[, tracker]) so a duplicate
//! plain create surfaces as a uniqueness violation. All append paths are
//! single `INSERT .. ON CONFLICT DO UPDATE` statements, so concurrent
//! appends for the same key serialize at the storage layer.

mod calorie_logs;
mod macro_logs;
mod targets;
mod trackers;
mod users;
mod water;

pub use calorie_logs::CalorieLogPatch;

use crate::errors::AppResult;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Storage handle shared across request handlers
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a connection pool and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect or a migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains("mode=")
            && !database_url.ends_with(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run all schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_trackers().await?;
        self.migrate_macro_logs().await?;
        self.migrate_calorie_logs().await?;
        self.migrate_water().await?;
        self.migrate_targets().await?;
        Ok(())
    }
}
