//! Daily energy estimates: basal metabolic rate and total energy expenditure.

use serde::{Deserialize, Serialize};

use crate::profile::{ActivityLevel, Gender, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    /// kcal/day at rest.
    pub bmr: f64,
    /// kcal/day including activity.
    pub tee: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    /// 0-2 years. Activity level is ignored.
    Infant,
    /// 3-18 years.
    Child,
    /// 19 years and over.
    Adult,
}

impl AgeBand {
    pub fn for_age(age: u32) -> Self {
        if age <= 2 {
            AgeBand::Infant
        } else if age < 19 {
            AgeBand::Child
        } else {
            AgeBand::Adult
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityBucket {
    Inactive,
    LowActive,
    Active,
    Other,
}

impl From<&ActivityLevel> for ActivityBucket {
    fn from(level: &ActivityLevel) -> Self {
        match level {
            ActivityLevel::Inactive => ActivityBucket::Inactive,
            ActivityLevel::LowActive => ActivityBucket::LowActive,
            ActivityLevel::Active => ActivityBucket::Active,
            ActivityLevel::Other(_) => ActivityBucket::Other,
        }
    }
}

/// One row of the TEE regression table: `a0 + age*a_age + height*a_height + weight*a_weight`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeeCoefficients {
    pub a0: f64,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
}

impl TeeCoefficients {
    const fn new(a0: f64, age: f64, height: f64, weight: f64) -> Self {
        Self { a0, age, height, weight }
    }

    pub fn evaluate(&self, age: u32, height_cm: f64, weight_kg: f64) -> f64 {
        self.a0 + self.age * age as f64 + self.height * height_cm + self.weight * weight_kg
    }
}

// Rows are ordered inactive, low_active, active, other.
const MALE_INFANT: TeeCoefficients = TeeCoefficients::new(-716.45, -1.00, 17.82, 15.06);
const MALE_CHILD: [TeeCoefficients; 4] = [
    TeeCoefficients::new(-447.51, -3.68, 13.01, 13.15),
    TeeCoefficients::new(19.12, 3.68, 8.62, 20.28),
    TeeCoefficients::new(-388.19, 3.68, 12.66, 20.46),
    TeeCoefficients::new(-671.75, 3.68, 15.38, 23.25),
];
const MALE_ADULT: [TeeCoefficients; 4] = [
    TeeCoefficients::new(753.07, -10.83, 6.50, 14.10),
    TeeCoefficients::new(581.47, -10.83, 8.30, 14.94),
    TeeCoefficients::new(1004.82, -10.83, 6.52, 15.91),
    TeeCoefficients::new(-517.88, -10.83, 15.61, 19.11),
];
const FEMALE_INFANT: TeeCoefficients = TeeCoefficients::new(-69.15, 80.0, 2.65, 54.15);
const FEMALE_CHILD: [TeeCoefficients; 4] = [
    TeeCoefficients::new(55.59, -22.25, 8.43, 17.07),
    TeeCoefficients::new(-297.54, -22.25, 12.77, 14.73),
    TeeCoefficients::new(-189.55, -22.25, 11.74, 18.34),
    TeeCoefficients::new(-709.59, -22.25, 18.22, 14.25),
];
const FEMALE_ADULT: [TeeCoefficients; 4] = [
    TeeCoefficients::new(584.90, -7.01, 5.72, 11.71),
    TeeCoefficients::new(575.77, -7.01, 6.60, 12.14),
    TeeCoefficients::new(710.25, -7.01, 6.54, 12.34),
    TeeCoefficients::new(511.83, -7.01, 9.07, 12.56),
];

fn bucket_index(bucket: ActivityBucket) -> usize {
    match bucket {
        ActivityBucket::Inactive => 0,
        ActivityBucket::LowActive => 1,
        ActivityBucket::Active => 2,
        ActivityBucket::Other => 3,
    }
}

/// Looks up the regression row for a (gender, age band, activity bucket) key.
pub fn tee_coefficients(gender: Gender, band: AgeBand, bucket: ActivityBucket) -> TeeCoefficients {
    match (gender, band) {
        (Gender::Male, AgeBand::Infant) => MALE_INFANT,
        (Gender::Male, AgeBand::Child) => MALE_CHILD[bucket_index(bucket)],
        (Gender::Male, AgeBand::Adult) => MALE_ADULT[bucket_index(bucket)],
        (Gender::Female, AgeBand::Infant) => FEMALE_INFANT,
        (Gender::Female, AgeBand::Child) => FEMALE_CHILD[bucket_index(bucket)],
        (Gender::Female, AgeBand::Adult) => FEMALE_ADULT[bucket_index(bucket)],
    }
}

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
pub fn compute_bmr(gender: Gender, age: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total energy expenditure, kcal/day. Never fails and never clamps; extreme
/// inputs can produce negative values.
///
/// `gender` comes from the same case-insensitive parse as BMR, so "MALE" selects
/// the male rows here too, unlike an exact `== "male"` string match.
pub fn compute_tee(
    gender: Gender,
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    activity_level: &ActivityLevel,
) -> f64 {
    let coefficients = tee_coefficients(gender, AgeBand::for_age(age), activity_level.into());
    coefficients.evaluate(age, height_cm, weight_kg)
}

pub fn estimate_energy(profile: &UserProfile) -> EnergyEstimate {
    let bmr = compute_bmr(profile.gender, profile.age, profile.height, profile.weight);
    let tee = compute_tee(
        profile.gender,
        profile.age,
        profile.height,
        profile.weight,
        &profile.activity_level,
    );
    tracing::debug!(bmr, tee, age = profile.age, "estimated daily energy");
    EnergyEstimate { bmr, tee }
}
