// ABOUTME: Latest computed macro targets per user, replaced wholesale on save
// ABOUTME: No history; reading an unsaved snapshot yields an explicit none, not an error

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{MacroBreakdown, MacroTargetSnapshot};
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_targets(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS macro_targets (
                owner_id TEXT PRIMARY KEY,
                pal REAL NOT NULL,
                bmr INTEGER NOT NULL,
                tdee INTEGER NOT NULL,
                macros TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert the user's target snapshot, overwriting any prior one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the upsert fails.
    pub async fn save_targets(
        &self,
        owner_id: Uuid,
        pal: f64,
        bmr: i64,
        tdee: i64,
        macros: &MacroBreakdown,
    ) -> AppResult<MacroTargetSnapshot> {
        let updated_at = Utc::now();
        let macros_json = serde_json::to_string(macros)?;

        sqlx::query(
            r"
            INSERT INTO macro_targets (owner_id, pal, bmr, tdee, macros, updated_at)
            VALUES (?1, ?2, ?3, ?4, json(?5), ?6)
            ON CONFLICT (owner_id) DO UPDATE SET
                pal = excluded.pal,
                bmr = excluded.bmr,
                tdee = excluded.tdee,
                macros = excluded.macros,
                updated_at = excluded.updated_at
            ",
        )
        .bind(owner_id.to_string())
        .bind(pal)
        .bind(bmr)
        .bind(tdee)
        .bind(&macros_json)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(MacroTargetSnapshot {
            owner_id,
            pal,
            bmr,
            tdee,
            macros: macros.clone(),
            updated_at,
        })
    }

    /// The user's saved snapshot, or `None` if targets were never saved.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails or a row is malformed.
    pub async fn get_targets(&self, owner_id: Uuid) -> AppResult<Option<MacroTargetSnapshot>> {
        let row = sqlx::query(
            "SELECT pal, bmr, tdee, macros, updated_at FROM macro_targets WHERE owner_id = ?1",
        )
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let macros_json: String = row.try_get("macros")?;
            let macros: MacroBreakdown = serde_json::from_str(&macros_json)
                .map_err(|e| AppError::database(format!("Malformed macros snapshot: {e}")))?;
            Ok(MacroTargetSnapshot {
                owner_id,
                pal: row.try_get("pal")?,
                bmr: row.try_get("bmr")?,
                tdee: row.try_get("tdee")?,
                macros,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .transpose()
    }
}
