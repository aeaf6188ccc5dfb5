// ABOUTME: Calorie tracker routes - create tracker, fetch with recent logs, log/update entries
// ABOUTME: Calorie days bucket by UTC midnight; macro days do not (see day.rs)

use crate::day::CALORIE_LOG_BOUNDARY;
use crate::errors::AppError;
use crate::models::{CalorieItem, CalorieLog, CalorieTracker, WeightGoal};
use crate::nutrition::compute_tracker_targets;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// How many recent logs ride along with a tracker fetch
const RECENT_LOG_LIMIT: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct CreateTrackerRequest {
    pub weight_goal: Option<String>,
    pub age: Option<u32>,
    pub exercise_days_per_week: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct TrackerResponse {
    pub message: &'static str,
    pub tracker: CalorieTracker,
}

#[derive(Debug, Serialize)]
pub struct TrackerWithLogsResponse {
    pub tracker: CalorieTracker,
    pub logs: Vec<CalorieLog>,
}

#[derive(Debug, Deserialize)]
pub struct LogCaloriesRequest {
    pub calories: Option<f64>,
    pub name: Option<String>,
    pub note: Option<String>,
    /// Wholesale item list; presence selects the explicit-create path
    pub items: Option<Vec<CalorieItem>>,
    /// Timestamp bucketed to a UTC day; defaults to now
    pub date: Option<DateTime<Utc>>,
    /// When set, patches the referenced log instead of appending
    pub log_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LogCaloriesResponse {
    pub message: &'static str,
    pub log: CalorieLog,
}

/// Zero-valued when no aggregate exists for the day
#[derive(Debug, Serialize)]
pub struct DayCaloriesResponse {
    pub tracker_id: Uuid,
    pub date: NaiveDate,
    pub calories: f64,
    pub items: Vec<CalorieItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<Uuid>,
}

/// Calorie tracker and calorie logging routes
pub struct CalorieRoutes;

impl CalorieRoutes {
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/calories/create", post(Self::handle_create_tracker))
            .route("/api/calories/:tracker_id", get(Self::handle_get_tracker))
            .route("/api/calories/:tracker_id/log", post(Self::handle_log))
            .route("/api/calories/:tracker_id/today", get(Self::handle_today))
            .with_state(resources)
    }

    /// Create an immutable tracker from the caller's stored body profile
    /// plus the requested goal.
    async fn handle_create_tracker(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateTrackerRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let goal_str = request
            .weight_goal
            .ok_or_else(|| AppError::missing_field("weight_goal"))?;
        let weight_goal = WeightGoal::parse(&goal_str).ok_or_else(|| {
            AppError::invalid_input("weight_goal must be 'gain', 'lose', or 'maintain'")
        })?;
        let age = request.age.ok_or_else(|| AppError::missing_field("age"))?;
        if !(1..=120).contains(&age) {
            return Err(AppError::out_of_range("age must be between 1 and 120"));
        }
        let exercise_days = request
            .exercise_days_per_week
            .ok_or_else(|| AppError::missing_field("exercise_days_per_week"))?;
        if exercise_days > 7 {
            return Err(AppError::out_of_range(
                "exercise_days_per_week must be between 0 and 7",
            ));
        }

        let body = resources
            .database
            .get_body_profile(owner_id)
            .await?
            .ok_or_else(|| {
                AppError::invalid_input(
                    "No body profile on record; set gender, height, and weight first",
                )
            })?;

        let targets = compute_tracker_targets(
            body.gender,
            age,
            body.height_cm,
            body.weight_kg,
            exercise_days,
            weight_goal,
            &resources.tables,
        )?;

        let tracker = CalorieTracker {
            id: Uuid::new_v4(),
            owner_id,
            weight_goal,
            age,
            exercise_days_per_week: exercise_days,
            gender: body.gender,
            height_cm: body.height_cm,
            weight_kg: body.weight_kg,
            pal: targets.pal,
            bmr: targets.bmr,
            tdee: targets.tdee,
            target_calories: targets.target_calories,
            created_at: Utc::now(),
        };
        resources.database.create_tracker(&tracker).await?;

        let response = TrackerResponse {
            message: "Calorie tracker created",
            tracker,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Tracker plus its most recent logs, newest day first.
    async fn handle_get_tracker(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(tracker_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let tracker = resources
            .database
            .get_tracker(owner_id, tracker_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tracker"))?;
        let logs = resources
            .database
            .recent_calorie_logs(owner_id, tracker_id, RECENT_LOG_LIMIT)
            .await?;

        Ok((StatusCode::OK, Json(TrackerWithLogsResponse { tracker, logs })).into_response())
    }

    /// Append to (or patch) the day's calorie aggregate.
    ///
    /// Three shapes, matching how clients use it:
    /// - `log_id` set: patch that log in place.
    /// - `items` set: explicit wholesale create; a duplicate day conflicts.
    /// - otherwise: atomic append of one `{name, calories}` entry to the
    ///   day's aggregate, creating it on first use.
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(tracker_id): Path<Uuid>,
        Json(request): Json<LogCaloriesRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        if let Some(calories) = request.calories {
            if !calories.is_finite() || calories < 0.0 {
                return Err(AppError::out_of_range("calories must be zero or positive"));
            }
        }

        // Ownership check before any write
        resources
            .database
            .get_tracker(owner_id, tracker_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tracker"))?;

        let date = CALORIE_LOG_BOUNDARY.resolve(request.date);

        if let Some(log_id) = request.log_id {
            let patch = crate::database::CalorieLogPatch {
                calories: request.calories,
                note: request.note,
                items: request.items,
                date: request.date.map(|_| date),
            };
            let log = resources
                .database
                .update_calorie_log(owner_id, log_id, &patch)
                .await?
                .ok_or_else(|| AppError::not_found("Log"))?;
            let response = LogCaloriesResponse {
                message: "Calorie log updated",
                log,
            };
            return Ok((StatusCode::OK, Json(response)).into_response());
        }

        let log = if let Some(items) = request.items {
            let log = CalorieLog {
                id: Uuid::new_v4(),
                owner_id,
                tracker_id,
                date,
                calories: request.calories.unwrap_or(0.0),
                note: request.note,
                items,
            };
            resources.database.create_calorie_log(&log).await?;
            log
        } else {
            let item = CalorieItem {
                name: request.name,
                calories: request.calories.unwrap_or(0.0),
            };
            resources
                .database
                .append_calorie_item(owner_id, tracker_id, date, &item)
                .await?
        };

        let response = LogCaloriesResponse {
            message: "Calorie log created",
            log,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Today's aggregate for a tracker; zero-valued when nothing has been
    /// logged yet, never a 404.
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(tracker_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        resources
            .database
            .get_tracker(owner_id, tracker_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tracker"))?;

        let date = CALORIE_LOG_BOUNDARY.today();
        let response = match resources
            .database
            .get_calorie_day(owner_id, tracker_id, date)
            .await?
        {
            Some(log) => DayCaloriesResponse {
                tracker_id,
                date,
                calories: log.calories,
                items: log.items,
                note: log.note,
                log_id: Some(log.id),
            },
            None => DayCaloriesResponse {
                tracker_id,
                date,
                calories: 0.0,
                items: Vec::new(),
                note: None,
                log_id: None,
            },
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
