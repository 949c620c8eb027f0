pub mod ranker;
pub mod score_fns;
pub mod targets;

use std::error::Error;
use std::fmt;

pub use ranker::{score, score_for_goal, top_n, GoalWeights, ScoredFoodRecord};
pub use score_fns::{bounded_score, penalized_score};
pub use targets::{compute_target_macros_per_meal, MacroTargets};

#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    UnknownGoal(String),
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::UnknownGoal(goal) => {
                write!(f, "Unknown goal '{}': expected 'fat_loss' or 'muscle_gain'", goal)
            }
        }
    }
}

impl Error for ScoringError {}
