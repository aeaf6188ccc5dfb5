// ABOUTME: BMR, TDEE, and macro gram calculations using Mifflin-St Jeor
// ABOUTME: Includes the goal-adjusted tracker path with nearest-50-kcal rounding

//! Nutrition calculations.
//!
//! Two distinct rounding policies coexist here on purpose: the formula
//! engine rounds macro grams to the nearest gram, while the tracker path
//! rounds BMR/TDEE/target calories to the nearest 50 kcal.
//!
//! # Reference
//!
//! Mifflin, M.D., et al. (1990). A new predictive equation for resting
//! energy expenditure. *American Journal of Clinical Nutrition*, 51(2).

use crate::errors::{AppError, AppResult};
use crate::models::{
    BodyProfile, Gender, MacroBreakdown, MacroCalories, NutritionTargets, WeightGoal,
};
use crate::nutrition::tables::NutritionTables;

/// Protein and carbohydrate energy density (kcal per gram)
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Fat energy density (kcal per gram)
const KCAL_PER_G_FAT: f64 = 9.0;

/// Calorie deficit applied for a weight-loss goal
const LOSE_DELTA_KCAL: f64 = -500.0;
/// Calorie surplus applied for a weight-gain goal
const GAIN_DELTA_KCAL: f64 = 300.0;

/// Round to the nearest multiple of 50 kcal
#[must_use]
pub fn round50(kcal: f64) -> i64 {
    ((kcal / 50.0).round() * 50.0) as i64
}

fn validate_metrics(weight_kg: f64, height_cm: f64, age: u32) -> AppResult<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::out_of_range("weight must be a positive number of kilograms"));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AppError::out_of_range("height must be a positive number of centimeters"));
    }
    if !(1..=120).contains(&age) {
        return Err(AppError::out_of_range("age must be between 1 and 120 years"));
    }
    Ok(())
}

/// Basal metabolic rate via Mifflin-St Jeor (kcal/day, unrounded)
///
/// `10*w + 6.25*h - 5*a`, plus 5 for men or minus 161 for women.
///
/// # Errors
///
/// Returns `ValueOutOfRange` if weight/height are not positive or age is
/// outside 1-120.
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> AppResult<f64> {
    validate_metrics(weight_kg, height_cm, age)?;

    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    Ok(10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset)
}

/// Harris-Benedict (revised) BMR, computed alongside Mifflin for display
/// and comparison only. Never used downstream.
#[must_use]
pub fn harris_benedict(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let a = f64::from(age);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * a,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * a,
    }
}

/// Compute the full set of nutrition targets for a body profile.
///
/// Deterministic and I/O free. Macro grams are rounded to the nearest
/// integer gram; the split fractions are echoed so `protein_pct + fat_pct
/// + carbs_pct == 1.0` holds exactly as defined by the table row.
///
/// # Errors
///
/// Returns `ValueOutOfRange` on out-of-range body metrics.
pub fn compute_targets(
    profile: &BodyProfile,
    tables: &NutritionTables,
) -> AppResult<NutritionTargets> {
    let bmr = mifflin_st_jeor(profile.weight_kg, profile.height_cm, profile.age, profile.gender)?;
    let hb = harris_benedict(profile.weight_kg, profile.height_cm, profile.age, profile.gender);

    let pal = tables.pal_for_level(profile.activity_level);
    let tdee = bmr * pal;

    let split = tables.split_for_level(profile.activity_level);
    let protein_cals = tdee * split.protein;
    let fat_cals = tdee * split.fat;
    let carb_cals = tdee * split.carbs;

    Ok(NutritionTargets {
        bmr: bmr.round() as i64,
        harris_benedict_bmr: hb.round() as i64,
        pal,
        tdee: tdee.round() as i64,
        macros: MacroBreakdown {
            protein_g: (protein_cals / KCAL_PER_G_PROTEIN_CARB).round() as i64,
            fat_g: (fat_cals / KCAL_PER_G_FAT).round() as i64,
            carbs_g: (carb_cals / KCAL_PER_G_PROTEIN_CARB).round() as i64,
            protein_pct: split.protein,
            fat_pct: split.fat,
            carbs_pct: split.carbs,
        },
        macro_calories: MacroCalories {
            protein_cals: protein_cals.round() as i64,
            fat_cals: fat_cals.round() as i64,
            carb_cals: carb_cals.round() as i64,
        },
        protein_per_kg: tables.protein_range_for_level(profile.activity_level),
    })
}

/// Goal-adjusted targets for a calorie tracker
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerTargets {
    pub pal: f64,
    /// BMR rounded to the nearest 50 kcal
    pub bmr: i64,
    /// TDEE rounded to the nearest 50 kcal
    pub tdee: i64,
    /// tdee - 500 (lose), tdee + 300 (gain), or tdee (maintain),
    /// re-rounded to the nearest 50 kcal
    pub target_calories: i64,
}

/// Compute tracker calorie targets from exercise days and a weight goal.
///
/// Uses the exercise-days PAL table (not the activity-level one) and the
/// nearest-50-kcal rounding policy throughout.
///
/// # Errors
///
/// Returns `ValueOutOfRange` if age is outside 1-120, exercise days are
/// outside 0-7, or body metrics are not positive.
pub fn compute_tracker_targets(
    gender: Gender,
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    exercise_days_per_week: u8,
    goal: WeightGoal,
    tables: &NutritionTables,
) -> AppResult<TrackerTargets> {
    if exercise_days_per_week > 7 {
        return Err(AppError::out_of_range(
            "exercise_days_per_week must be between 0 and 7",
        ));
    }

    let pal = tables.pal_for_exercise_days(exercise_days_per_week);
    let bmr = round50(mifflin_st_jeor(weight_kg, height_cm, age, gender)?);
    let tdee = round50(bmr as f64 * pal);

    let target_calories = match goal {
        WeightGoal::Lose => round50(tdee as f64 + LOSE_DELTA_KCAL),
        WeightGoal::Gain => round50(tdee as f64 + GAIN_DELTA_KCAL),
        WeightGoal::Maintain => tdee,
    };

    Ok(TrackerTargets {
        pal,
        bmr,
        tdee,
        target_calories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn reference_profile() -> BodyProfile {
        BodyProfile {
            gender: Gender::Male,
            age: 30,
            height_cm: 180.0,
            weight_kg: 90.0,
            activity_level: ActivityLevel::Moderate,
        }
    }

    #[test]
    fn test_reference_male_moderate() {
        let tables = NutritionTables::default();
        let targets = compute_targets(&reference_profile(), &tables).unwrap();

        // 10*90 + 6.25*180 - 5*30 + 5 = 1880
        assert_eq!(targets.bmr, 1880);
        assert_eq!(targets.pal, 1.55);
        assert_eq!(targets.tdee, 2914);
        // protein: 2914.0 * 0.25 = 728.5 kcal -> 729 rounded, 182 g
        assert_eq!(targets.macro_calories.protein_cals, 729);
        assert_eq!(targets.macros.protein_g, 182);
        assert_eq!(targets.protein_per_kg, (1.2, 1.6));
    }

    #[test]
    fn test_female_offset() {
        let bmr = mifflin_st_jeor(60.0, 165.0, 25, Gender::Female).unwrap();
        // 600 + 1031.25 - 125 - 161 = 1345.25
        assert!((bmr - 1345.25).abs() < 1e-9);
    }

    #[test]
    fn test_macro_energy_reconciles_with_tdee() {
        let tables = NutritionTables::default();
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ] {
            let mut profile = reference_profile();
            profile.activity_level = level;
            let t = compute_targets(&profile, &tables).unwrap();

            let kcal_from_grams = t.macros.protein_g * 4 + t.macros.carbs_g * 4 + t.macros.fat_g * 9;
            // Rounding each macro to whole grams costs at most a few kcal
            // (up to half a gram each at 4/4/9 kcal per gram).
            assert!(
                (kcal_from_grams - t.tdee).abs() <= 9,
                "{level:?}: grams imply {kcal_from_grams} kcal vs tdee {}",
                t.tdee
            );

            let pct_sum = t.macros.protein_pct + t.macros.fat_pct + t.macros.carbs_pct;
            assert!((pct_sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_harris_benedict_is_display_only() {
        let tables = NutritionTables::default();
        let t = compute_targets(&reference_profile(), &tables).unwrap();
        // 88.362 + 13.397*90 + 4.799*180 - 5.677*30 = 1987.602
        assert_eq!(t.harris_benedict_bmr, 1988);
        // tdee derives from Mifflin, not HB
        assert_eq!(t.tdee, 2914);
    }

    #[test]
    fn test_tracker_reference_lose_goal() {
        let tables = NutritionTables::default();
        let t = compute_tracker_targets(
            Gender::Male,
            30,
            180.0,
            90.0,
            4,
            WeightGoal::Lose,
            &tables,
        )
        .unwrap();
        assert_eq!(t.pal, 1.55);
        assert_eq!(t.bmr, 1900); // round50(1880)
        assert_eq!(t.tdee, 2950); // round50(1900 * 1.55 = 2945)
        assert_eq!(t.target_calories, 2450); // round50(2950 - 500)
    }

    #[test]
    fn test_tracker_gain_and_maintain() {
        let tables = NutritionTables::default();
        let gain = compute_tracker_targets(
            Gender::Male,
            30,
            180.0,
            90.0,
            4,
            WeightGoal::Gain,
            &tables,
        )
        .unwrap();
        assert_eq!(gain.target_calories, 3250); // round50(2950 + 300)

        let maintain = compute_tracker_targets(
            Gender::Male,
            30,
            180.0,
            90.0,
            4,
            WeightGoal::Maintain,
            &tables,
        )
        .unwrap();
        assert_eq!(maintain.target_calories, maintain.tdee);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let tables = NutritionTables::default();
        assert!(mifflin_st_jeor(0.0, 180.0, 30, Gender::Male).is_err());
        assert!(mifflin_st_jeor(80.0, -1.0, 30, Gender::Male).is_err());
        assert!(mifflin_st_jeor(80.0, 180.0, 0, Gender::Male).is_err());
        assert!(mifflin_st_jeor(80.0, 180.0, 121, Gender::Male).is_err());
        assert!(compute_tracker_targets(
            Gender::Female,
            30,
            165.0,
            60.0,
            8,
            WeightGoal::Maintain,
            &tables
        )
        .is_err());
    }

    #[test]
    fn test_round50_midpoints() {
        assert_eq!(round50(2945.0), 2950);
        assert_eq!(round50(2925.0), 2950); // .5 rounds away from zero
        assert_eq!(round50(2924.9), 2900);
        assert_eq!(round50(0.0), 0);
    }
}
