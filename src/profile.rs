use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scoring::ScoringError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
}

impl From<&str> for Gender {
    /// Case-insensitive. Anything that is not "male" is treated as female.
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::from(value.as_str())
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Self-reported activity level. `Other` is the catch-all bucket: "very_active"
/// and any unrecognized label land here and select the fourth TEE formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    Inactive,
    LowActive,
    Active,
    Other(String),
}

impl From<&str> for ActivityLevel {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "inactive" => ActivityLevel::Inactive,
            "low_active" => ActivityLevel::LowActive,
            "active" => ActivityLevel::Active,
            _ => ActivityLevel::Other(value.to_string()),
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        ActivityLevel::from(value.as_str())
    }
}

impl From<ActivityLevel> for String {
    fn from(value: ActivityLevel) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Inactive => write!(f, "inactive"),
            ActivityLevel::LowActive => write!(f, "low_active"),
            ActivityLevel::Active => write!(f, "active"),
            ActivityLevel::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Dietary objective. There is deliberately no fallback variant: an unknown
/// goal is an error, unlike unknown activity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
}

impl FromStr for Goal {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fat_loss" => Ok(Goal::FatLoss),
            "muscle_gain" => Ok(Goal::MuscleGain),
            other => Err(ScoringError::UnknownGoal(other.to_string())),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::FatLoss => write!(f, "fat_loss"),
            Goal::MuscleGain => write!(f, "muscle_gain"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub age: u32,
    /// Centimetres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl UserProfile {
    /// Body mass index, kg / m².
    pub fn bmi(&self) -> f64 {
        let height_m = self.height / 100.0;
        self.weight / (height_m * height_m)
    }
}
