// ABOUTME: Main library entry point for the macrolog nutrition tracking API
// ABOUTME: REST backend for energy targets, calorie trackers, and daily macro/water logs

#![deny(unsafe_code)]

//! # Macrolog
//!
//! A nutrition tracking backend. It computes energy and macronutrient
//! targets from body metrics, and keeps per-user daily aggregates for
//! calories, macros, and water.
//!
//! ## Features
//!
//! - **Target computation**: Mifflin-St Jeor BMR, PAL-scaled TDEE, and
//!   per-activity-level macro splits
//! - **Calorie trackers**: immutable goal snapshots with daily logs
//! - **Daily aggregates**: one row per user per day, appended atomically
//! - **Bearer auth**: JWT-resolved owner ids on every stateful route
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use macrolog::config::environment::ServerConfig;
//! use macrolog::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("macrolog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod database;
pub mod day;
pub mod errors;
pub mod logging;
pub mod models;
pub mod nutrition;
pub mod routes;
pub mod server;
