// ABOUTME: Per-user body profile storage read by tracker creation
// ABOUTME: The auth collaborator owns the full user record; only body fields live here

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Gender, UserBodyProfile};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_body_profiles (
                user_id TEXT PRIMARY KEY,
                gender TEXT NOT NULL CHECK (gender IN ('male', 'female')),
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create or replace the stored body profile for a user.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the upsert fails.
    pub async fn upsert_body_profile(&self, profile: &UserBodyProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_body_profiles (user_id, gender, height_cm, weight_kg, updated_at)
            VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)
            ON CONFLICT (user_id) DO UPDATE SET
                gender = excluded.gender,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(profile.gender.as_str())
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch the stored body profile, if the user has one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails or a row is malformed.
    pub async fn get_body_profile(&self, user_id: Uuid) -> AppResult<Option<UserBodyProfile>> {
        let row = sqlx::query(
            "SELECT gender, height_cm, weight_kg FROM user_body_profiles WHERE user_id = ?1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let gender_str: String = row.try_get("gender")?;
            let gender = Gender::parse(&gender_str)
                .ok_or_else(|| AppError::database(format!("Unknown gender value: {gender_str}")))?;
            Ok(UserBodyProfile {
                user_id,
                gender,
                height_cm: row.try_get("height_cm")?,
                weight_kg: row.try_get("weight_kg")?,
            })
        })
        .transpose()
    }
}
