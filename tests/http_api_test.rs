// ABOUTME: End-to-end HTTP tests exercising the full router with bearer auth
// ABOUTME: Covers target calculation, tracker lifecycle, and daily log endpoints

mod common;
mod helpers;

use anyhow::Result;
use axum::Router;
use helpers::axum_test::AxumTestRequest;
use macrolog::errors::{ErrorCode, ErrorResponse};
use macrolog::models::Gender;
use macrolog::server::{HttpServer, ServerResources};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

async fn test_app() -> Result<(Router, Arc<ServerResources>)> {
    let database = common::create_test_database().await?;
    let auth = common::create_test_auth_manager();
    let resources = Arc::new(ServerResources::new(database, auth));
    let app = HttpServer::new(resources.clone()).router();
    Ok((app, resources))
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (app, _) = test_app().await?;
    let response = AxumTestRequest::get("/api/health").send(app).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_calculate_needs_no_auth() -> Result<()> {
    let (app, _) = test_app().await?;
    let response = AxumTestRequest::post("/api/nutritive/calculate")
        .json(&json!({
            "gender": "male",
            "age": 30,
            "height": 180.0,
            "weight": 90.0,
            "activity_level": "moderate"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["targets"]["bmr"], 1880);
    assert_eq!(body["targets"]["tdee"], 2914);
    assert_eq!(body["targets"]["macros"]["protein_g"], 182);
    assert_eq!(body["inputs"]["pal"], 1.55);
    Ok(())
}

#[tokio::test]
async fn test_calculate_unknown_activity_falls_back() -> Result<()> {
    let (app, _) = test_app().await?;
    let response = AxumTestRequest::post("/api/nutritive/calculate")
        .json(&json!({
            "gender": "female",
            "age": 25,
            "height": 165.0,
            "weight": 60.0,
            "activity_level": "couch-potato"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["inputs"]["activity_level"], "sedentary");
    assert_eq!(body["inputs"]["pal"], 1.2);
    Ok(())
}

#[tokio::test]
async fn test_calculate_missing_field_is_rejected() -> Result<()> {
    let (app, _) = test_app().await?;
    let response = AxumTestRequest::post("/api/nutritive/calculate")
        .json(&json!({
            "age": 30,
            "height": 180.0,
            "weight": 90.0,
            "activity_level": "moderate"
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, ErrorCode::MissingRequiredField);
    Ok(())
}

#[tokio::test]
async fn test_stateful_routes_require_bearer_token() -> Result<()> {
    let (app, _) = test_app().await?;
    let response = AxumTestRequest::post("/api/macros/log")
        .json(&json!({ "protein": 30.0 }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);

    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, ErrorCode::AuthRequired);
    Ok(())
}

#[tokio::test]
async fn test_garbage_token_is_rejected() -> Result<()> {
    let (app, _) = test_app().await?;
    let response = AxumTestRequest::get("/api/macros/today")
        .bearer("not-a-jwt")
        .send(app)
        .await;
    assert_eq!(response.status(), 401);

    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, ErrorCode::AuthInvalid);
    Ok(())
}

#[tokio::test]
async fn test_tracker_lifecycle_over_http() -> Result<()> {
    let (app, resources) = test_app().await?;
    let user_id = common::seed_body_profile(&resources.database, Gender::Male).await?;
    let token = resources.auth.generate_token(user_id)?;

    // Create: profile is 180cm/80kg male, so BMR 1780 -> 1800 after
    // 50-kcal rounding, TDEE 2800 at PAL 1.55, lose target 2300.
    let response = AxumTestRequest::post("/api/calories/create")
        .bearer(&token)
        .json(&json!({
            "weight_goal": "lose",
            "age": 30,
            "exercise_days_per_week": 4
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let body: Value = response.json();
    assert_eq!(body["tracker"]["bmr"], 1800);
    assert_eq!(body["tracker"]["tdee"], 2800);
    assert_eq!(body["tracker"]["target_calories"], 2300);
    let tracker_id = body["tracker"]["id"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("tracker id missing"))?
        .to_owned();

    // Two appends accumulate into one day
    let response = AxumTestRequest::post(&format!("/api/calories/{tracker_id}/log"))
        .bearer(&token)
        .json(&json!({ "name": "Toast", "calories": 200.0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post(&format!("/api/calories/{tracker_id}/log"))
        .bearer(&token)
        .json(&json!({ "calories": 300.0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["log"]["calories"], 500.0);
    assert_eq!(body["log"]["items"].as_array().map(Vec::len), Some(2));

    let response = AxumTestRequest::get(&format!("/api/calories/{tracker_id}/today"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["calories"], 500.0);

    // Fetch includes the log in the recent list
    let response = AxumTestRequest::get(&format!("/api/calories/{tracker_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["logs"].as_array().map(Vec::len), Some(1));

    // Unknown tracker is a 404
    let response = AxumTestRequest::get(&format!("/api/calories/{}", Uuid::new_v4()))
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
    Ok(())
}

#[tokio::test]
async fn test_tracker_create_without_body_profile() -> Result<()> {
    let (app, resources) = test_app().await?;
    let token = resources.auth.generate_token(Uuid::new_v4())?;

    let response = AxumTestRequest::post("/api/calories/create")
        .bearer(&token)
        .json(&json!({
            "weight_goal": "maintain",
            "age": 40,
            "exercise_days_per_week": 2
        }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_macro_log_defaults_and_totals() -> Result<()> {
    let (app, resources) = test_app().await?;
    let token = resources.auth.generate_token(Uuid::new_v4())?;

    let response = AxumTestRequest::post("/api/macros/log")
        .bearer(&token)
        .json(&json!({ "protein": 30.0, "carbs": 40.0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["protein"], 30.0);
    assert_eq!(body["fat"], 0.0);
    assert_eq!(body["meals"][0]["name"], "Meal");

    let response = AxumTestRequest::post("/api/macros/log")
        .bearer(&token)
        .json(&json!({ "protein": 20.0, "meal_name": "Dinner" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["protein"], 50.0);
    assert_eq!(body["meals"][1]["name"], "Dinner");

    let response = AxumTestRequest::get("/api/macros/today")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["protein"], 50.0);
    assert_eq!(body["carbs"], 40.0);
    Ok(())
}

#[tokio::test]
async fn test_macro_log_rejects_negative_amounts() -> Result<()> {
    let (app, resources) = test_app().await?;
    let token = resources.auth.generate_token(Uuid::new_v4())?;

    let response = AxumTestRequest::post("/api/macros/log")
        .bearer(&token)
        .json(&json!({ "protein": -5.0 }))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, ErrorCode::ValueOutOfRange);
    Ok(())
}

#[tokio::test]
async fn test_water_log_accumulates() -> Result<()> {
    let (app, resources) = test_app().await?;
    let token = resources.auth.generate_token(Uuid::new_v4())?;

    let response = AxumTestRequest::post("/api/water/log")
        .bearer(&token)
        .json(&json!({ "amount_ml": 250.0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);

    let response = AxumTestRequest::post("/api/water/log")
        .bearer(&token)
        .json(&json!({ "amount_ml": 500.0 }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["amount_ml"], 750.0);

    let response = AxumTestRequest::get("/api/water/today")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["amount_ml"], 750.0);
    Ok(())
}

#[tokio::test]
async fn test_targets_snapshot_round_trip() -> Result<()> {
    let (app, resources) = test_app().await?;
    let token = resources.auth.generate_token(Uuid::new_v4())?;

    // Nothing saved yet reads back as null
    let response = AxumTestRequest::get("/api/nutritive/targets")
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert!(body.is_null());

    let response = AxumTestRequest::post("/api/nutritive/targets")
        .bearer(&token)
        .json(&json!({
            "pal": 1.55,
            "bmr": 1880,
            "tdee": 2914,
            "macros": {
                "protein_g": 182, "fat_g": 97, "carbs_g": 328,
                "protein_pct": 0.25, "fat_pct": 0.30, "carbs_pct": 0.45
            }
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get("/api/nutritive/targets")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["tdee"], 2914);
    assert_eq!(body["macros"]["protein_g"], 182);
    Ok(())
}
