//! Data-driven game balance
//!
//! Every gameplay constant a designer might want to touch lives here, with
//! defaults matching `crate::consts`. Partial JSON overrides are supported:
//! omitted fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Balance knobs threaded into [`crate::sim::GameState`] at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed in cells per second
    pub player_speed: f32,
    /// Ghost step interval range (seconds), sampled once per ghost
    pub ghost_step_min: f32,
    pub ghost_step_max: f32,
    /// Power mode duration (seconds)
    pub power_duration: f32,
    /// Post-capture invulnerability window (seconds)
    pub invuln_duration: f32,
    /// Defeated-ghost freeze time at spawn (seconds)
    pub ghost_respawn_delay: f32,
    /// Power-mode seconds between projectile shots
    pub fire_interval: f32,
    /// Pickup spawn delay range (seconds), re-sampled each cycle
    pub pickup_delay_min: f32,
    pub pickup_delay_max: f32,
    /// Bounded retry count for pickup placement
    pub pickup_sample_attempts: u32,
    pub pellet_points: u64,
    pub pickup_points: u64,
    pub ghost_points: u64,
    pub starting_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: consts::PLAYER_SPEED,
            ghost_step_min: consts::GHOST_STEP_MIN,
            ghost_step_max: consts::GHOST_STEP_MAX,
            power_duration: consts::POWER_DURATION,
            invuln_duration: consts::INVULN_DURATION,
            ghost_respawn_delay: consts::GHOST_RESPAWN_DELAY,
            fire_interval: consts::FIRE_INTERVAL,
            pickup_delay_min: consts::PICKUP_DELAY_MIN,
            pickup_delay_max: consts::PICKUP_DELAY_MAX,
            pickup_sample_attempts: consts::PICKUP_SAMPLE_ATTEMPTS,
            pellet_points: consts::PELLET_POINTS,
            pickup_points: consts::PICKUP_POINTS,
            ghost_points: consts::GHOST_POINTS,
            starting_lives: consts::STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.player_speed, consts::PLAYER_SPEED);
        assert_eq!(tuning.starting_lives, consts::STARTING_LIVES);
        assert_eq!(tuning.pellet_points, consts::PELLET_POINTS);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{"player_speed": 8.0, "starting_lives": 5}"#).unwrap();
        assert_eq!(tuning.player_speed, 8.0);
        assert_eq!(tuning.starting_lives, 5);
        // Untouched fields keep their defaults
        assert_eq!(tuning.power_duration, consts::POWER_DURATION);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(Tuning::from_json("{not json").is_err());
    }
}
