// ABOUTME: Daily water aggregates - one running total per (owner, day), no entry list
// ABOUTME: Logging is a single atomic upsert-increment, safe under concurrent calls

use super::Database;
use crate::errors::AppResult;
use crate::models::WaterLog;
use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_water(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS water_logs (
                owner_id TEXT NOT NULL,
                date TEXT NOT NULL,
                amount_ml REAL NOT NULL DEFAULT 0,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (owner_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add to the day's water total and return the updated aggregate.
    /// The increment happens at the storage layer, so concurrent calls
    /// never lose updates.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the upsert fails.
    pub async fn add_water(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        amount_ml: f64,
    ) -> AppResult<WaterLog> {
        let row = sqlx::query(
            r"
            INSERT INTO water_logs (owner_id, date, amount_ml)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (owner_id, date) DO UPDATE SET
                amount_ml = amount_ml + excluded.amount_ml,
                updated_at = CURRENT_TIMESTAMP
            RETURNING amount_ml
            ",
        )
        .bind(owner_id.to_string())
        .bind(date)
        .bind(amount_ml)
        .fetch_one(&self.pool)
        .await?;

        Ok(WaterLog {
            owner_id,
            date,
            amount_ml: row.try_get("amount_ml")?,
        })
    }

    /// The day's water total; 0 when nothing has been logged yet.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub async fn get_water_day(&self, owner_id: Uuid, date: NaiveDate) -> AppResult<WaterLog> {
        let row = sqlx::query("SELECT amount_ml FROM water_logs WHERE owner_id = ?1 AND date = ?2")
            .bind(owner_id.to_string())
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        let amount_ml = match row {
            Some(row) => row.try_get("amount_ml")?,
            None => 0.0,
        };

        Ok(WaterLog {
            owner_id,
            date,
            amount_ml,
        })
    }
}
