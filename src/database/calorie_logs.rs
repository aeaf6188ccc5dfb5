// ABOUTME: Daily calorie aggregates scoped to a tracker - running total plus ordered item list
// ABOUTME: Atomic append path, explicit create (conflict on duplicate day), and patch-by-id

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{CalorieItem, CalorieLog};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Partial update for an existing calorie log; `None` fields keep their
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct CalorieLogPatch {
    pub calories: Option<f64>,
    pub note: Option<String>,
    pub items: Option<Vec<CalorieItem>>,
    pub date: Option<NaiveDate>,
}

fn log_from_row(row: &SqliteRow) -> AppResult<CalorieLog> {
    let id: String = row.try_get("id")?;
    let owner_id: String = row.try_get("owner_id")?;
    let tracker_id: String = row.try_get("tracker_id")?;
    let items_json: String = row.try_get("items")?;

    Ok(CalorieLog {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Malformed log id: {e}")))?,
        owner_id: Uuid::parse_str(&owner_id)
            .map_err(|e| AppError::database(format!("Malformed owner id: {e}")))?,
        tracker_id: Uuid::parse_str(&tracker_id)
            .map_err(|e| AppError::database(format!("Malformed tracker id: {e}")))?,
        date: row.try_get("date")?,
        calories: row.try_get("calories")?,
        note: row.try_get("note")?,
        items: serde_json::from_str(&items_json)?,
    })
}

impl Database {
    pub(super) async fn migrate_calorie_logs(&self) -> AppResult<()> {
        // UNIQUE(owner_id, tracker_id, date) is the aggregate invariant:
        // a duplicate plain create for the same day fails instead of
        // producing a second aggregate.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS calorie_logs (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                tracker_id TEXT NOT NULL,
                date TEXT NOT NULL,
                calories REAL NOT NULL DEFAULT 0,
                note TEXT,
                items TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (owner_id, tracker_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_calorie_logs_owner_tracker
             ON calorie_logs(owner_id, tracker_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append one item to the day's calorie aggregate, creating the
    /// aggregate on first use. The running total and the item list move
    /// in one atomic statement.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the upsert fails.
    pub async fn append_calorie_item(
        &self,
        owner_id: Uuid,
        tracker_id: Uuid,
        date: NaiveDate,
        item: &CalorieItem,
    ) -> AppResult<CalorieLog> {
        let item_json = serde_json::to_string(item)?;

        let row = sqlx::query(
            r"
            INSERT INTO calorie_logs (id, owner_id, tracker_id, date, calories, items)
            VALUES (?1, ?2, ?3, ?4, ?5, json_array(json(?6)))
            ON CONFLICT (owner_id, tracker_id, date) DO UPDATE SET
                calories = calories + excluded.calories,
                items = json_insert(items, '$[#]', json(?6)),
                updated_at = CURRENT_TIMESTAMP
            RETURNING id, owner_id, tracker_id, date, calories, note, items
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(owner_id.to_string())
        .bind(tracker_id.to_string())
        .bind(date)
        .bind(item.calories)
        .bind(&item_json)
        .fetch_one(&self.pool)
        .await?;

        log_from_row(&row)
    }

    /// Insert a wholesale calorie log for a day.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when a log for the same
    /// (owner, tracker, day) already exists; the caller should retry as
    /// an update instead.
    pub async fn create_calorie_log(&self, log: &CalorieLog) -> AppResult<()> {
        let items_json = serde_json::to_string(&log.items)?;

        sqlx::query(
            r"
            INSERT INTO calorie_logs (id, owner_id, tracker_id, date, calories, note, items)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, json(?7))
            ",
        )
        .bind(log.id.to_string())
        .bind(log.owner_id.to_string())
        .bind(log.tracker_id.to_string())
        .bind(log.date)
        .bind(log.calories)
        .bind(log.note.as_deref())
        .bind(&items_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Patch an existing log by id, scoped to its owner. Returns `None`
    /// when the log does not exist or belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if a date change collides with
    /// another day's aggregate, or a storage error if the update fails.
    pub async fn update_calorie_log(
        &self,
        owner_id: Uuid,
        log_id: Uuid,
        patch: &CalorieLogPatch,
    ) -> AppResult<Option<CalorieLog>> {
        let items_json = patch
            .items
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let row = sqlx::query(
            r"
            UPDATE calorie_logs SET
                calories = COALESCE(?1, calories),
                note = COALESCE(?2, note),
                items = COALESCE(json(?3), items),
                date = COALESCE(?4, date),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?5 AND owner_id = ?6
            RETURNING id, owner_id, tracker_id, date, calories, note, items
            ",
        )
        .bind(patch.calories)
        .bind(patch.note.as_deref())
        .bind(items_json.as_deref())
        .bind(patch.date)
        .bind(log_id.to_string())
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| log_from_row(&row)).transpose()
    }

    /// Fetch the day's aggregate for a tracker, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails or a row is malformed.
    pub async fn get_calorie_day(
        &self,
        owner_id: Uuid,
        tracker_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<CalorieLog>> {
        let row = sqlx::query(
            r"
            SELECT id, owner_id, tracker_id, date, calories, note, items
            FROM calorie_logs
            WHERE owner_id = ?1 AND tracker_id = ?2 AND date = ?3
            ",
        )
        .bind(owner_id.to_string())
        .bind(tracker_id.to_string())
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| log_from_row(&row)).transpose()
    }

    /// Most recent logs for a tracker, newest day first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails or a row is malformed.
    pub async fn recent_calorie_logs(
        &self,
        owner_id: Uuid,
        tracker_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<CalorieLog>> {
        let rows = sqlx::query(
            r"
            SELECT id, owner_id, tracker_id, date, calories, note, items
            FROM calorie_logs
            WHERE owner_id = ?1 AND tracker_id = ?2
            ORDER BY date DESC
            LIMIT ?3
            ",
        )
        .bind(owner_id.to_string())
        .bind(tracker_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(log_from_row).collect()
    }
}
