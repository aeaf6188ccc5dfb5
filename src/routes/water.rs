// ABOUTME: Daily water logging routes - atomic increment of the day's total
// ABOUTME: No entry list; water days bucket by local midnight

use crate::day::WATER_LOG_BOUNDARY;
use crate::errors::AppError;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LogWaterRequest {
    /// Amount to add, in milliliters
    pub amount_ml: Option<f64>,
    /// Timestamp bucketed to a local-midnight day; defaults to now
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct WaterDayResponse {
    pub date: NaiveDate,
    pub amount_ml: f64,
}

/// Daily water logging routes
pub struct WaterRoutes;

impl WaterRoutes {
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/water/log", post(Self::handle_log))
            .route("/api/water/today", get(Self::handle_today))
            .with_state(resources)
    }

    /// Add to the day's water total and return the updated total.
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogWaterRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let amount = request
            .amount_ml
            .ok_or_else(|| AppError::missing_field("amount_ml"))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::out_of_range("amount_ml must be positive"));
        }

        let date = WATER_LOG_BOUNDARY.resolve(request.date);
        let log = resources.database.add_water(owner_id, date, amount).await?;

        let response = WaterDayResponse {
            date: log.date,
            amount_ml: log.amount_ml,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Today's total; 0 when nothing has been logged yet.
    async fn handle_today(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let date = WATER_LOG_BOUNDARY.today();
        let log = resources.database.get_water_day(owner_id, date).await?;

        let response = WaterDayResponse {
            date: log.date,
            amount_ml: log.amount_ml,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
