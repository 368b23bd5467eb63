//! Score-driven difficulty curve
//!
//! Recomputed from the session score every frame; nothing is cached.

use crate::consts::*;

/// Derived tuning for the current score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Fall speed in pixels per frame
    pub speed: f32,
    /// Minimum gap between spawns (ms)
    pub spawn_interval_ms: f64,
    pub bomb_chance: f32,
    pub powerup_chance: f32,
}

/// Scores at which fall speed steps up by [`SPEED_STEP`]
pub const SPEED_THRESHOLDS: [u64; 4] = [2_000, 6_000, 10_000, 14_000];

/// Score at which bombs and powerups join the spawn mix
pub const MIXED_SPAWNS_SCORE: u64 = 5_000;

impl Difficulty {
    pub fn for_score(score: u64) -> Self {
        let mut speed = BASE_FALL_SPEED;
        for threshold in SPEED_THRESHOLDS {
            if score >= threshold {
                speed *= SPEED_STEP;
            }
        }

        // Order matters: the 5000 and 14000 checks run last and overwrite
        // the 2000/6000 intervals, so 6000..14000 still spawns every 1400ms.
        let mut spawn_interval_ms = BASE_SPAWN_INTERVAL_MS;
        if score >= 2_000 {
            spawn_interval_ms = 1800.0;
        }
        if score >= 6_000 {
            spawn_interval_ms = 1600.0;
        }

        let mut bomb_chance = 0.0;
        let mut powerup_chance = 0.0;
        if score >= MIXED_SPAWNS_SCORE {
            spawn_interval_ms = 1400.0;
            bomb_chance = 0.40;
            powerup_chance = 0.05;
        }

        if score >= 14_000 {
            spawn_interval_ms = 1200.0;
        }

        Self {
            speed,
            spawn_interval_ms,
            bomb_chance,
            powerup_chance,
        }
    }
}
