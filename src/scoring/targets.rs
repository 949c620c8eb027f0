use serde::{Deserialize, Serialize};

pub const MEALS_PER_DAY: f64 = 3.0;

// Share of daily calories per macronutrient.
pub const PROTEIN_CALORIE_SHARE: f64 = 0.4;
pub const FAT_CALORIE_SHARE: f64 = 0.3;
pub const CARB_CALORIE_SHARE: f64 = 0.3;

// Atwater factors, kcal per gram.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Gram targets for a single meal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    #[serde(rename = "Protein (g)")]
    pub protein_g: f64,
    #[serde(rename = "Fat (g)")]
    pub fat_g: f64,
    #[serde(rename = "Carbs (g)")]
    pub carbs_g: f64,
}

/// Splits a daily TEE into per-meal macro targets (40/30/30 over three meals).
/// A non-positive TEE yields non-positive targets.
pub fn compute_target_macros_per_meal(tee: f64) -> MacroTargets {
    MacroTargets {
        protein_g: tee * PROTEIN_CALORIE_SHARE / KCAL_PER_G_PROTEIN / MEALS_PER_DAY,
        fat_g: tee * FAT_CALORIE_SHARE / KCAL_PER_G_FAT / MEALS_PER_DAY,
        carbs_g: tee * CARB_CALORIE_SHARE / KCAL_PER_G_CARB / MEALS_PER_DAY,
    }
}
