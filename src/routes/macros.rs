// ABOUTME: Daily macro logging routes - append meals, read today's totals
// ABOUTME: Macro days bucket by local midnight

use crate::day::MACRO_LOG_BOUNDARY;
use crate::errors::AppError;
use crate::models::Meal;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LogMacrosRequest {
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub meal_name: Option<String>,
    /// Timestamp bucketed to a local-midnight day; defaults to now
    pub date: Option<DateTime<Utc>>,
}

/// Updated running totals plus the full ordered meal list
#[derive(Debug, Serialize)]
pub struct MacroDayResponse {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub meals: Vec<Meal>,
}

fn non_negative(value: Option<f64>, field: &str) -> Result<f64, AppError> {
    let v = value.unwrap_or(0.0);
    if !v.is_finite() || v < 0.0 {
        return Err(AppError::out_of_range(format!(
            "{field} must be zero or positive"
        )));
    }
    Ok(v)
}

/// Daily macro logging routes
pub struct MacroRoutes;

impl MacroRoutes {
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/macros/log", post(Self::handle_log))
            .route("/api/macros/today", get(Self::handle_today))
            .with_state(resources)
    }

    /// Append one meal to the day's aggregate. Absent macro amounts count
    /// as zero; an unnamed meal is logged as "Meal".
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogMacrosRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let meal = Meal {
            name: request.meal_name.unwrap_or_else(|| "Meal".to_string()),
            protein: non_negative(request.protein, "protein")?,
            fat: non_negative(request.fat, "fat")?,
            carbs: non_negative(request.carbs, "carbs")?,
        };

        let date = MACRO_LOG_BOUNDARY.resolve(request.date);
        let log = resources.database.append_meal(owner_id, date, &meal).await?;

        let response = MacroDayResponse {
            protein: log.protein,
            fat: log.fat,
            carbs: log.carbs,
            meals: log.meals,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Today's totals and meals; all zero and empty when nothing has been
    /// logged yet, never a 404.
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let date = MACRO_LOG_BOUNDARY.today();
        let log = resources.database.get_macro_day(owner_id, date).await?;

        let response = MacroDayResponse {
            protein: log.protein,
            fat: log.fat,
            carbs: log.carbs,
            meals: log.meals,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
