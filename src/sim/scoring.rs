//! Survival score and difficulty ramp
//!
//! Both are step functions of elapsed run time.

use crate::tuning::Tuning;

/// Score for a given survival time: one point per `score_interval_ms`
pub fn score_for(elapsed_ms: f64, tuning: &Tuning) -> u64 {
    if elapsed_ms <= 0.0 {
        return 0;
    }
    (elapsed_ms / tuning.score_interval_ms).floor() as u64
}

/// Obstacle speed for a given survival time
///
/// Holds at `base_speed` until the first ramp interval has passed, then
/// steps up by `ramp_step` per whole interval.
pub fn speed_for(elapsed_ms: f64, tuning: &Tuning) -> f32 {
    if elapsed_ms < tuning.ramp_interval_ms {
        return tuning.base_speed;
    }
    let steps = (elapsed_ms / tuning.ramp_interval_ms).floor() as f32;
    tuning.base_speed + steps * tuning.ramp_step
}
