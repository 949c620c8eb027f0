use crate::energy::{estimate_energy, EnergyEstimate};
use crate::nutrient_extractor::{extract_nutrients, FoodPayload, FoodRecord};
use crate::profile::UserProfile;
use crate::scoring::{compute_target_macros_per_meal, score_for_goal, MacroTargets, ScoredFoodRecord};

/// Everything a scoring request produces for one profile and one food batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMenu {
    pub energy: EnergyEstimate,
    pub targets: MacroTargets,
    pub records: Vec<FoodRecord>,
    pub ranked: Vec<ScoredFoodRecord>,
}

/// Energy estimate, per-meal targets, extraction and scoring, in that order.
pub fn rank_for_profile(profile: &UserProfile, foods: &[FoodPayload]) -> RankedMenu {
    let energy = estimate_energy(profile);
    let targets = compute_target_macros_per_meal(energy.tee);
    let records = extract_nutrients(foods);
    let ranked = score_for_goal(&records, &targets, energy.tee, profile.goal);
    tracing::info!(
        foods = records.len(),
        tee = energy.tee,
        goal = %profile.goal,
        "ranked food batch"
    );
    RankedMenu {
        energy,
        targets,
        records,
        ranked,
    }
}
