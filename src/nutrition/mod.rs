// ABOUTME: Nutrition formula engine computing BMR, TDEE, and macro targets
// ABOUTME: Pure functions over immutable lookup tables, no I/O

//! Formula engine: BMR/TDEE/macro-split computation.
//!
//! All lookup tables live in [`tables::NutritionTables`] and are injected
//! into the calculator functions; nothing here touches storage.

pub mod calculator;
pub mod tables;

pub use calculator::{compute_targets, compute_tracker_targets, round50, TrackerTargets};
pub use tables::{MacroSplit, NutritionTables};
