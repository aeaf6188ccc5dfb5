// ABOUTME: Daily macro aggregates - running protein/fat/carb sums plus the ordered meal list
// ABOUTME: Appends increment totals and push the meal JSON in one atomic statement

use super::Database;
use crate::errors::AppResult;
use crate::models::{MacroLog, Meal};
use chrono::NaiveDate;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_macro_logs(&self) -> AppResult<()> {
        // Compound primary key doubles as the uniqueness invariant:
        // at most one aggregate row per (owner, day).
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS macro_logs (
                owner_id TEXT NOT NULL,
                date TEXT NOT NULL,
                protein REAL NOT NULL DEFAULT 0,
                fat REAL NOT NULL DEFAULT 0,
                carbs REAL NOT NULL DEFAULT 0,
                meals TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (owner_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append one meal to the day's aggregate, creating the aggregate if
    /// this is the first entry of the day. Totals and the meal list move
    /// together in a single statement, so concurrent appends for the same
    /// key cannot lose updates.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the upsert fails.
    pub async fn append_meal(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        meal: &Meal,
    ) -> AppResult<MacroLog> {
        let meal_json = serde_json::to_string(meal)?;

        let row = sqlx::query(
            r"
            INSERT INTO macro_logs (owner_id, date, protein, fat, carbs, meals)
            VALUES (?1, ?2, ?3, ?4, ?5, json_array(json(?6)))
            ON CONFLICT (owner_id, date) DO UPDATE SET
                protein = protein + excluded.protein,
                fat = fat + excluded.fat,
                carbs = carbs + excluded.carbs,
                meals = json_insert(meals, '$[#]', json(?6)),
                updated_at = CURRENT_TIMESTAMP
            RETURNING protein, fat, carbs, meals
            ",
        )
        .bind(owner_id.to_string())
        .bind(date)
        .bind(meal.protein)
        .bind(meal.fat)
        .bind(meal.carbs)
        .bind(&meal_json)
        .fetch_one(&self.pool)
        .await?;

        let meals_json: String = row.try_get("meals")?;
        Ok(MacroLog {
            owner_id,
            date,
            protein: row.try_get("protein")?,
            fat: row.try_get("fat")?,
            carbs: row.try_get("carbs")?,
            meals: serde_json::from_str(&meals_json)?,
        })
    }

    /// Fetch the day's macro aggregate; a day with no entries yet reads
    /// as all-zero totals with an empty meal list, never an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails or a row is malformed.
    pub async fn get_macro_day(&self, owner_id: Uuid, date: NaiveDate) -> AppResult<MacroLog> {
        let row = sqlx::query(
            "SELECT protein, fat, carbs, meals FROM macro_logs WHERE owner_id = ?1 AND date = ?2",
        )
        .bind(owner_id.to_string())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let meals_json: String = row.try_get("meals")?;
                Ok(MacroLog {
                    owner_id,
                    date,
                    protein: row.try_get("protein")?,
                    fat: row.try_get("fat")?,
                    carbs: row.try_get("carbs")?,
                    meals: serde_json::from_str(&meals_json)?,
                })
            }
            None => Ok(MacroLog::empty(owner_id, date)),
        }
    }
}
