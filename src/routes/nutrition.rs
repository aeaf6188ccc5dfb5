// ABOUTME: Nutrition target routes - stateless computation plus the per-user snapshot store
// ABOUTME: Computation needs no identity; saving/reading the snapshot does

use crate::errors::AppError;
use crate::models::{ActivityLevel, BodyProfile, Gender, MacroBreakdown, NutritionTargets};
use crate::nutrition::compute_targets;
use crate::routes::authenticate;
use crate::server::ServerResources;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct CalculateTargetsRequest {
    pub gender: Option<String>,
    pub age: Option<u32>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
}

/// Inputs echoed back with the resolved PAL
#[derive(Debug, Serialize)]
pub struct EchoedInputs {
    pub gender: Gender,
    pub age: u32,
    pub height: f64,
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub pal: f64,
}

#[derive(Debug, Serialize)]
pub struct CalculateTargetsResponse {
    pub inputs: EchoedInputs,
    pub targets: NutritionTargets,
    pub note: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SaveTargetsRequest {
    pub pal: Option<f64>,
    pub bmr: Option<i64>,
    pub tdee: Option<i64>,
    pub macros: Option<MacroBreakdown>,
}

/// Nutrition computation and target snapshot routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutritive/calculate", post(Self::handle_calculate))
            .route("/api/nutritive/targets", post(Self::handle_save_targets))
            .route("/api/nutritive/targets", get(Self::handle_get_targets))
            .with_state(resources)
    }

    /// Compute BMR/TDEE/macro targets from body metrics. Stateless; no
    /// identity required and nothing is persisted.
    async fn handle_calculate(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CalculateTargetsRequest>,
    ) -> Result<Response, AppError> {
        let gender_str = request
            .gender
            .ok_or_else(|| AppError::missing_field("gender"))?;
        let gender = Gender::parse(&gender_str)
            .ok_or_else(|| AppError::invalid_input("gender must be 'male' or 'female'"))?;
        let age = request.age.ok_or_else(|| AppError::missing_field("age"))?;
        let height = request
            .height
            .ok_or_else(|| AppError::missing_field("height"))?;
        let weight = request
            .weight
            .ok_or_else(|| AppError::missing_field("weight"))?;
        // Unknown levels fall back to sedentary; only absence is an error.
        let activity_level = ActivityLevel::parse_lenient(
            &request
                .activity_level
                .ok_or_else(|| AppError::missing_field("activity_level"))?,
        );

        let profile = BodyProfile {
            gender,
            age,
            height_cm: height,
            weight_kg: weight,
            activity_level,
        };
        let targets = compute_targets(&profile, &resources.tables)?;

        let response = CalculateTargetsResponse {
            inputs: EchoedInputs {
                gender,
                age,
                height,
                weight,
                activity_level,
                pal: targets.pal,
            },
            targets,
            note: "Macro splits are example distributions; adjust per personal goals.",
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Save computed targets for the caller, replacing any prior snapshot.
    async fn handle_save_targets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SaveTargetsRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;

        let macros = request
            .macros
            .ok_or_else(|| AppError::missing_field("macros"))?;

        let snapshot = resources
            .database
            .save_targets(
                owner_id,
                request.pal.unwrap_or_default(),
                request.bmr.unwrap_or_default(),
                request.tdee.unwrap_or_default(),
                &macros,
            )
            .await?;

        Ok((StatusCode::OK, Json(snapshot)).into_response())
    }

    /// Read the caller's saved snapshot; `null` when never saved.
    async fn handle_get_targets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers, &resources)?;
        let snapshot = resources.database.get_targets(owner_id).await?;
        Ok((StatusCode::OK, Json(snapshot)).into_response())
    }
}
