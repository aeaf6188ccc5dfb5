// ABOUTME: Domain models for nutrition targets, trackers, and daily aggregates
// ABOUTME: Shared between the formula engine, database layer, and HTTP routes

//! Common data models.
//!
//! Daily aggregates (`MacroLog`, `CalorieLog`, `WaterLog`) are keyed by
//! owner and calendar day; readers get a zero-valued aggregate when no row
//! exists yet, so "no log today" is never an error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological gender used by the BMR formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Strict parse; anything outside the enumerated set is rejected.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Self-reported activity level driving the PAL and macro-split tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Lenient parse: an unrecognized level falls back to sedentary
    /// instead of erroring. Missing fields are still rejected upstream.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "very_active" => Self::VeryActive,
            _ => Self::Sedentary,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

/// Weight goal selecting the calorie delta for a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    Gain,
    Lose,
    Maintain,
}

impl WeightGoal {
    /// Strict parse over the enumerated set.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gain" => Some(Self::Gain),
            "lose" => Some(Self::Lose),
            "maintain" => Some(Self::Maintain),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::Lose => "lose",
            Self::Maintain => "maintain",
        }
    }
}

/// Ephemeral body metrics consumed by the formula engine; never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyProfile {
    pub gender: Gender,
    /// Age in years (1-120)
    pub age: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
}

/// Macro gram targets with the split fractions that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_g: i64,
    pub fat_g: i64,
    pub carbs_g: i64,
    pub protein_pct: f64,
    pub fat_pct: f64,
    pub carbs_pct: f64,
}

/// Per-macro calorie allocation (rounded kcal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroCalories {
    pub protein_cals: i64,
    pub fat_cals: i64,
    pub carb_cals: i64,
}

/// Complete output of one target computation; immutable once computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Mifflin-St Jeor BMR, rounded kcal/day
    pub bmr: i64,
    /// Harris-Benedict (revised) BMR, rounded kcal/day. Display only,
    /// never used downstream.
    pub harris_benedict_bmr: i64,
    /// Physical activity level multiplier applied to BMR
    pub pal: f64,
    /// TDEE = BMR x PAL, rounded kcal/day
    pub tdee: i64,
    pub macros: MacroBreakdown,
    pub macro_calories: MacroCalories,
    /// Recommended protein intake range in g/kg body weight
    pub protein_per_kg: (f64, f64),
}

/// Long-lived calorie target profile. Created once per goal-setting
/// action; there is no update or delete, only newer trackers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieTracker {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub weight_goal: WeightGoal,
    pub age: u32,
    pub exercise_days_per_week: u8,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub pal: f64,
    /// BMR rounded to the nearest 50 kcal
    pub bmr: i64,
    /// TDEE rounded to the nearest 50 kcal
    pub tdee: i64,
    /// Goal-adjusted daily calorie target
    pub target_calories: i64,
    pub created_at: DateTime<Utc>,
}

/// One meal contributing to a day's macro totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Daily macro aggregate: running sums plus the ordered meal list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroLog {
    pub owner_id: Uuid,
    pub date: NaiveDate,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    /// Insertion-ordered, never deduplicated
    pub meals: Vec<Meal>,
}

impl MacroLog {
    /// Zero-valued aggregate for a day with no entries yet
    #[must_use]
    pub const fn empty(owner_id: Uuid, date: NaiveDate) -> Self {
        Self {
            owner_id,
            date,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            meals: Vec::new(),
        }
    }
}

/// One food item contributing to a day's calorie total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub calories: f64,
}

/// Daily calorie aggregate scoped to one tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieLog {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub tracker_id: Uuid,
    pub date: NaiveDate,
    pub calories: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Insertion-ordered, never deduplicated
    pub items: Vec<CalorieItem>,
}

/// Daily water aggregate: a single running total, no entry list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLog {
    pub owner_id: Uuid,
    pub date: NaiveDate,
    /// Accumulated intake in milliliters
    pub amount_ml: f64,
}

/// Latest computed macro targets for a user, replaced wholesale on save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargetSnapshot {
    pub owner_id: Uuid,
    pub pal: f64,
    pub bmr: i64,
    pub tdee: i64,
    pub macros: MacroBreakdown,
    pub updated_at: DateTime<Utc>,
}

/// Per-user body fields read by tracker creation (identity collaborator
/// owns the rest of the user record)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBodyProfile {
    pub user_id: Uuid,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_lenient_fallback() {
        assert_eq!(ActivityLevel::parse_lenient("moderate"), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::parse_lenient("VERY_ACTIVE"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::parse_lenient("couch-potato"), ActivityLevel::Sedentary);
    }

    #[test]
    fn test_gender_strict_parse() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
    }

    #[test]
    fn test_weight_goal_serde_wire_format() {
        let json = serde_json::to_string(&WeightGoal::Maintain).unwrap();
        assert_eq!(json, "\"maintain\"");
        let goal: WeightGoal = serde_json::from_str("\"lose\"").unwrap();
        assert_eq!(goal, WeightGoal::Lose);
    }

    #[test]
    fn test_empty_macro_log_is_zero_valued() {
        let log = MacroLog::empty(Uuid::new_v4(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(log.protein, 0.0);
        assert!(log.meals.is_empty());
    }
}
