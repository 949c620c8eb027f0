/// Rewards proportionally up to the target and saturates at 1.
///
/// Defined for `target > 0`.
pub fn bounded_score(value: f64, target: f64) -> f64 {
    (value / target).min(1.0)
}

/// Tent function peaking at 1 when `value == target`.
///
/// Below the target the score is `value / target`, which cannot exceed 1 on that
/// branch. Above it the score falls linearly to 0 at twice the target and stays
/// at 0 beyond. Defined for `target > 0`.
pub fn penalized_score(value: f64, target: f64) -> f64 {
    let ratio = value / target;
    if value > target {
        (2.0 - ratio).max(0.0)
    } else {
        ratio
    }
}
