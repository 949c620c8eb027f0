use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const DEFAULT_SPEED_KMH: f64 = 5.0;
const OVERWEIGHT_BMI: f64 = 25.0;
const OVERWEIGHT_SPEED_FACTOR: f64 = 0.9;
const OLDER_AGE: u32 = 40;
const OLDER_SPEED_FACTOR: f64 = 0.95;

/// Exercise types, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Activity {
    Running,
    Swimming,
    Cycling,
    Walking,
}

impl Activity {
    pub const ALL: [Activity; 4] = [
        Activity::Running,
        Activity::Swimming,
        Activity::Cycling,
        Activity::Walking,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Activity::Running => "Running",
            Activity::Swimming => "Swimming",
            Activity::Cycling => "Cycling",
            Activity::Walking => "Walking",
        }
    }

    pub fn from_name(name: &str) -> Option<Activity> {
        Activity::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn base_speed_kmh(&self) -> f64 {
        match self {
            Activity::Running => 9.0,
            Activity::Swimming => 3.0,
            Activity::Cycling => 15.0,
            Activity::Walking => 5.0,
        }
    }

    pub fn kcal_per_minute(&self) -> f64 {
        match self {
            Activity::Running => 10.0,
            Activity::Swimming => 14.0,
            Activity::Cycling => 8.0,
            Activity::Walking => 4.0,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEstimate {
    pub time_min: i64,
    pub distance_km: f64,
    pub speed_kmh: f64,
}

// Rounds the exact binary value, so 2.565 (stored as 2.56499...) becomes 2.56.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Average speed in km/h for `activity`, slowed for BMI over 25 and age over 40.
/// Unknown activity names use walking pace.
pub fn estimate_speed(activity: &str, bmi: f64, age: u32) -> f64 {
    let mut speed = Activity::from_name(activity)
        .map(|a| a.base_speed_kmh())
        .unwrap_or(DEFAULT_SPEED_KMH);

    if bmi > OVERWEIGHT_BMI {
        speed *= OVERWEIGHT_SPEED_FACTOR;
    }
    if age > OLDER_AGE {
        speed *= OLDER_SPEED_FACTOR;
    }

    round_to(speed, 2)
}

/// Time and distance needed to burn `calories` with each activity.
pub fn calories_to_exercise(calories: f64, bmi: f64, age: u32) -> BTreeMap<Activity, ExerciseEstimate> {
    Activity::ALL
        .into_iter()
        .map(|activity| {
            let minutes = calories / activity.kcal_per_minute();
            let speed_kmh = estimate_speed(activity.name(), bmi, age);
            let distance = (minutes / 60.0) * speed_kmh;
            let estimate = ExerciseEstimate {
                time_min: minutes.round_ties_even() as i64,
                distance_km: round_to(distance, 2),
                speed_kmh,
            };
            (activity, estimate)
        })
        .collect()
}
