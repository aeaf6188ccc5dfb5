// ABOUTME: Immutable lookup tables for PAL multipliers, macro splits, and protein ranges
// ABOUTME: Two deliberately divergent PAL tables: by activity level and by exercise days

use crate::models::ActivityLevel;
use serde::{Deserialize, Serialize};

/// Macro split row: fractions of TDEE allocated to each macro.
/// Every row sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// PAL multipliers keyed by activity level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPalTable {
    pub sedentary: f64,
    pub light: f64,
    pub moderate: f64,
    pub active: f64,
    pub very_active: f64,
}

impl Default for ActivityPalTable {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// PAL multipliers keyed by exercise days per week.
///
/// This table is NOT the activity-level table: it tops out at 1.725 and
/// has no very-active tier. Both are kept as separate entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDaysPalTable {
    /// 0-1 days per week
    pub up_to_one_day: f64,
    /// 2-3 days per week
    pub two_to_three_days: f64,
    /// 4-5 days per week
    pub four_to_five_days: f64,
    /// 6-7 days per week
    pub six_to_seven_days: f64,
}

impl Default for ExerciseDaysPalTable {
    fn default() -> Self {
        Self {
            up_to_one_day: 1.2,
            two_to_three_days: 1.375,
            four_to_five_days: 1.55,
            six_to_seven_days: 1.725,
        }
    }
}

/// Macro split rows keyed by activity level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitTable {
    pub sedentary: MacroSplit,
    pub light: MacroSplit,
    pub moderate: MacroSplit,
    pub active: MacroSplit,
    pub very_active: MacroSplit,
}

impl Default for MacroSplitTable {
    fn default() -> Self {
        Self {
            sedentary: MacroSplit {
                protein: 0.20,
                fat: 0.30,
                carbs: 0.50,
            },
            light: MacroSplit {
                protein: 0.22,
                fat: 0.28,
                carbs: 0.50,
            },
            moderate: MacroSplit {
                protein: 0.25,
                fat: 0.30,
                carbs: 0.45,
            },
            active: MacroSplit {
                protein: 0.28,
                fat: 0.30,
                carbs: 0.42,
            },
            very_active: MacroSplit {
                protein: 0.30,
                fat: 0.25,
                carbs: 0.45,
            },
        }
    }
}

/// Recommended protein intake ranges in g/kg body weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinPerKgTable {
    pub sedentary: (f64, f64),
    pub light: (f64, f64),
    pub moderate: (f64, f64),
    pub active: (f64, f64),
    pub very_active: (f64, f64),
}

impl Default for ProteinPerKgTable {
    fn default() -> Self {
        Self {
            sedentary: (0.8, 1.0),
            light: (1.0, 1.2),
            moderate: (1.2, 1.6),
            active: (1.6, 1.8),
            very_active: (1.8, 2.0),
        }
    }
}

/// All formula-engine configuration in one injectable bundle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionTables {
    pub pal_by_activity: ActivityPalTable,
    pub pal_by_exercise_days: ExerciseDaysPalTable,
    pub splits: MacroSplitTable,
    pub protein_per_kg: ProteinPerKgTable,
}

impl NutritionTables {
    /// PAL multiplier for a self-reported activity level
    #[must_use]
    pub fn pal_for_level(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.pal_by_activity.sedentary,
            ActivityLevel::Light => self.pal_by_activity.light,
            ActivityLevel::Moderate => self.pal_by_activity.moderate,
            ActivityLevel::Active => self.pal_by_activity.active,
            ActivityLevel::VeryActive => self.pal_by_activity.very_active,
        }
    }

    /// PAL multiplier derived from exercise days per week (0-7).
    /// Callers validate the range; values above 5 land in the top tier.
    #[must_use]
    pub fn pal_for_exercise_days(&self, days: u8) -> f64 {
        match days {
            0 | 1 => self.pal_by_exercise_days.up_to_one_day,
            2 | 3 => self.pal_by_exercise_days.two_to_three_days,
            4 | 5 => self.pal_by_exercise_days.four_to_five_days,
            _ => self.pal_by_exercise_days.six_to_seven_days,
        }
    }

    /// Macro split row for an activity level
    #[must_use]
    pub fn split_for_level(&self, level: ActivityLevel) -> MacroSplit {
        match level {
            ActivityLevel::Sedentary => self.splits.sedentary,
            ActivityLevel::Light => self.splits.light,
            ActivityLevel::Moderate => self.splits.moderate,
            ActivityLevel::Active => self.splits.active,
            ActivityLevel::VeryActive => self.splits.very_active,
        }
    }

    /// Protein g/kg recommendation range for an activity level
    #[must_use]
    pub fn protein_range_for_level(&self, level: ActivityLevel) -> (f64, f64) {
        match level {
            ActivityLevel::Sedentary => self.protein_per_kg.sedentary,
            ActivityLevel::Light => self.protein_per_kg.light,
            ActivityLevel::Moderate => self.protein_per_kg.moderate,
            ActivityLevel::Active => self.protein_per_kg.active,
            ActivityLevel::VeryActive => self.protein_per_kg.very_active,
        }
    }
}
