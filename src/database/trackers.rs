// ABOUTME: Calorie tracker records - immutable per-goal calorie target profiles
// ABOUTME: Create-only lifecycle; fetches are always owner-scoped

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{CalorieTracker, Gender, WeightGoal};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

fn tracker_from_row(row: &SqliteRow) -> AppResult<CalorieTracker> {
    let id: String = row.try_get("id")?;
    let owner_id: String = row.try_get("owner_id")?;
    let goal_str: String = row.try_get("weight_goal")?;
    let gender_str: String = row.try_get("gender")?;

    Ok(CalorieTracker {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Malformed tracker id: {e}")))?,
        owner_id: Uuid::parse_str(&owner_id)
            .map_err(|e| AppError::database(format!("Malformed owner id: {e}")))?,
        weight_goal: WeightGoal::parse(&goal_str)
            .ok_or_else(|| AppError::database(format!("Unknown weight goal: {goal_str}")))?,
        age: row.try_get::<i64, _>("age")? as u32,
        exercise_days_per_week: row.try_get::<i64, _>("exercise_days_per_week")? as u8,
        gender: Gender::parse(&gender_str)
            .ok_or_else(|| AppError::database(format!("Unknown gender value: {gender_str}")))?,
        height_cm: row.try_get("height_cm")?,
        weight_kg: row.try_get("weight_kg")?,
        pal: row.try_get("pal")?,
        bmr: row.try_get("bmr")?,
        tdee: row.try_get("tdee")?,
        target_calories: row.try_get("target_calories")?,
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    pub(super) async fn migrate_trackers(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS calorie_trackers (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                weight_goal TEXT NOT NULL CHECK (weight_goal IN ('gain', 'lose', 'maintain')),
                age INTEGER NOT NULL,
                exercise_days_per_week INTEGER NOT NULL,
                gender TEXT NOT NULL CHECK (gender IN ('male', 'female')),
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                pal REAL NOT NULL,
                bmr INTEGER NOT NULL,
                tdee INTEGER NOT NULL,
                target_calories INTEGER NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_calorie_trackers_owner ON calorie_trackers(owner_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new tracker. Trackers are immutable; setting a new goal
    /// means creating a new tracker.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the insert fails.
    pub async fn create_tracker(&self, tracker: &CalorieTracker) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO calorie_trackers (
                id, owner_id, weight_goal, age, exercise_days_per_week,
                gender, height_cm, weight_kg, pal, bmr, tdee, target_calories, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ",
        )
        .bind(tracker.id.to_string())
        .bind(tracker.owner_id.to_string())
        .bind(tracker.weight_goal.as_str())
        .bind(i64::from(tracker.age))
        .bind(i64::from(tracker.exercise_days_per_week))
        .bind(tracker.gender.as_str())
        .bind(tracker.height_cm)
        .bind(tracker.weight_kg)
        .bind(tracker.pal)
        .bind(tracker.bmr)
        .bind(tracker.tdee)
        .bind(tracker.target_calories)
        .bind(tracker.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch a tracker by id, scoped to its owner. A tracker belonging to
    /// a different owner is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails or a row is malformed.
    pub async fn get_tracker(
        &self,
        owner_id: Uuid,
        tracker_id: Uuid,
    ) -> AppResult<Option<CalorieTracker>> {
        let row = sqlx::query("SELECT * FROM calorie_trackers WHERE id = ?1 AND owner_id = ?2")
            .bind(tracker_id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| tracker_from_row(&row)).transpose()
    }
}
