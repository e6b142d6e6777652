//! Data-driven game balance
//!
//! Every knob defaults to the shipped balance, so an empty JSON object
//! (`{}`) yields `Tuning::default()`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty ===
    /// Obstacle speed at run start (pixels/s)
    pub base_speed: f32,
    /// Speed steps up once per interval (ms)
    pub ramp_interval_ms: f64,
    /// Speed added per elapsed interval (pixels/s)
    pub ramp_step: f32,

    // === Scoring ===
    /// One point per this many ms survived
    pub score_interval_ms: f64,

    // === Spawning ===
    /// Lower bound of the randomized delay between spawns (ms, inclusive)
    pub spawn_delay_min_ms: u32,
    /// Upper bound of the randomized delay between spawns (ms, inclusive)
    pub spawn_delay_max_ms: u32,

    // === Player ===
    /// Jumps available before a landing is required
    pub max_jumps: u8,
    /// Swipe-down crouch releases itself after this long (ms)
    pub swipe_crouch_ms: f64,

    // === Input classification ===
    /// Minimum vertical travel for a swipe (pixels)
    pub swipe_min_distance: f32,
    /// Swipes must finish within this time (ms)
    pub swipe_max_duration_ms: f64,
    /// Taps must move less than this (pixels)
    pub tap_max_distance: f32,
    /// Taps must finish within this time (ms)
    pub tap_max_duration_ms: f64,

    // === Diagnostics ===
    /// Intents kept in the diagnostic history
    pub intent_history_len: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 200.0,
            ramp_interval_ms: 10_000.0,
            ramp_step: 20.0,

            score_interval_ms: 100.0,

            spawn_delay_min_ms: 2500,
            spawn_delay_max_ms: 4500,

            max_jumps: 2,
            swipe_crouch_ms: 600.0,

            swipe_min_distance: 30.0,
            swipe_max_duration_ms: 800.0,
            tap_max_distance: 20.0,
            tap_max_duration_ms: 300.0,

            intent_history_len: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for shipping a tuning file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.base_speed.is_nan() || self.base_speed <= 0.0 {
            return Err(TuningError::Invalid {
                field: "base_speed",
                reason: "must be positive",
            });
        }
        if self.ramp_interval_ms.is_nan() || self.ramp_interval_ms <= 0.0 {
            return Err(TuningError::Invalid {
                field: "ramp_interval_ms",
                reason: "must be positive",
            });
        }
        if self.ramp_step < 0.0 {
            return Err(TuningError::Invalid {
                field: "ramp_step",
                reason: "speed may only increase",
            });
        }
        if self.score_interval_ms.is_nan() || self.score_interval_ms <= 0.0 {
            return Err(TuningError::Invalid {
                field: "score_interval_ms",
                reason: "must be positive",
            });
        }
        if self.spawn_delay_min_ms > self.spawn_delay_max_ms {
            return Err(TuningError::Invalid {
                field: "spawn_delay_min_ms",
                reason: "must not exceed spawn_delay_max_ms",
            });
        }
        if self.max_jumps == 0 {
            return Err(TuningError::Invalid {
                field: "max_jumps",
                reason: "at least one jump is required",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 300.0, "max_jumps": 3 }"#).unwrap();
        assert_eq!(tuning.base_speed, 300.0);
        assert_eq!(tuning.max_jumps, 3);
        assert_eq!(tuning.ramp_step, 20.0);
    }

    #[test]
    fn test_rejects_inverted_spawn_range() {
        let err = Tuning::from_json(r#"{ "spawn_delay_min_ms": 5000, "spawn_delay_max_ms": 100 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_delay_min_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_jumps() {
        let err = Tuning::from_json(r#"{ "max_jumps": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_jumps", .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut tuning = Tuning::default();
        tuning.ramp_step = 35.0;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
