use serde::{Deserialize, Serialize};

use super::score_fns::{bounded_score, penalized_score};
use super::targets::MacroTargets;
use super::ScoringError;
use crate::nutrient_extractor::FoodRecord;
use crate::profile::Goal;

/// Weights applied to the (Calories, Protein, Fat, Carbs) scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalWeights {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl GoalWeights {
    pub fn sum(&self) -> f64 {
        self.calories + self.protein + self.fat + self.carbs
    }
}

const MUSCLE_GAIN_WEIGHTS: GoalWeights = GoalWeights {
    calories: 0.2,
    protein: 0.4,
    fat: 0.2,
    carbs: 0.2,
};

// Sums to 1.2, not 1.0. Kept as-is; totals for fat_loss can exceed 1.
const FAT_LOSS_WEIGHTS: GoalWeights = GoalWeights {
    calories: 0.3,
    protein: 0.4,
    fat: 0.3,
    carbs: 0.2,
};

impl Goal {
    pub fn weights(&self) -> GoalWeights {
        match self {
            Goal::MuscleGain => MUSCLE_GAIN_WEIGHTS,
            Goal::FatLoss => FAT_LOSS_WEIGHTS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoredFoodRecord {
    #[serde(flatten)]
    pub record: FoodRecord,
    #[serde(rename = "Calories Score")]
    pub calories_score: f64,
    #[serde(rename = "Protein Score")]
    pub protein_score: f64,
    #[serde(rename = "Fat Score")]
    pub fat_score: f64,
    #[serde(rename = "Carbs Score")]
    pub carbs_score: f64,
    #[serde(rename = "Total Score")]
    pub total_score: f64,
}

fn score_record(record: &FoodRecord, targets: &MacroTargets, tee: f64, weights: &GoalWeights) -> ScoredFoodRecord {
    let nutrients = &record.nutrients;
    // Calories are measured against the full daily TEE, macros against per-meal targets.
    let calories_score = penalized_score(nutrients.calories, tee);
    let protein_score = bounded_score(nutrients.protein_g, targets.protein_g);
    let fat_score = penalized_score(nutrients.fat_g, targets.fat_g);
    let carbs_score = penalized_score(nutrients.carbs_g, targets.carbs_g);

    let total_score = calories_score * weights.calories
        + protein_score * weights.protein
        + fat_score * weights.fat
        + carbs_score * weights.carbs;

    ScoredFoodRecord {
        record: record.clone(),
        calories_score,
        protein_score,
        fat_score,
        carbs_score,
        total_score,
    }
}

/// Scores every record for `goal` and sorts by total score, highest first.
/// Records with equal totals keep their input order.
pub fn score_for_goal(records: &[FoodRecord], targets: &MacroTargets, tee: f64, goal: Goal) -> Vec<ScoredFoodRecord> {
    let weights = goal.weights();
    let mut scored: Vec<ScoredFoodRecord> = records
        .iter()
        .map(|record| score_record(record, targets, tee, &weights))
        .collect();

    // `sort_by` is stable, which gives the input-order tie break.
    scored.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    tracing::debug!(
        count = scored.len(),
        goal = %goal,
        best = ?scored.first().map(|s| s.total_score),
        "scored food batch"
    );
    scored
}

/// String-goal entry point. Unknown goals are rejected with
/// [`ScoringError::UnknownGoal`]; there is no fallback weighting.
pub fn score(records: &[FoodRecord], targets: &MacroTargets, tee: f64, goal: &str) -> Result<Vec<ScoredFoodRecord>, ScoringError> {
    let goal: Goal = goal.parse()?;
    Ok(score_for_goal(records, targets, tee, goal))
}

/// Keeps the first `n` entries of an already-sorted collection.
pub fn top_n(mut scored: Vec<ScoredFoodRecord>, n: usize) -> Vec<ScoredFoodRecord> {
    scored.truncate(n);
    scored
}
