//! Neon Strike - a three-lane arcade hit-scan shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (difficulty, spawning, hit-scan, particles)
//! - `session`: Score/lives owner that consumes simulation events
//! - `audio`: Sound cue dispatch (synthesis is left to the host)
//! - `settings`: Player preferences loaded from JSON
//! - `highscores`: Single best-score persistence

pub mod audio;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::BestScore;
pub use session::Session;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Number of vertical lanes targets fall through
    pub const LANE_COUNT: u32 = 3;
    /// Spawn height for new targets (above the top edge)
    pub const SPAWN_Y: f32 = -100.0;

    /// Difficulty base values
    pub const BASE_FALL_SPEED: f32 = 2.0;
    pub const SPEED_STEP: f32 = 1.5;
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Flat reward for any destroyed target
    pub const TARGET_REWARD: u32 = 100;

    /// Hit-scan tuning
    pub const RAY_SLACK: f32 = 100.0;
    pub const MISS_BEAM_LENGTH: f32 = 2000.0;
    pub const POWERED_TOLERANCE: f32 = 2.0;
    pub const POWERUP_DURATION_MS: f64 = 20_000.0;

    /// Beam fade per frame
    pub const BEAM_DECAY: f32 = 0.1;

    /// Particle physics (per frame)
    pub const GRAVITY: f32 = 0.15;
    pub const FRICTION: f32 = 0.98;
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Idle (menu) mode
    pub const IDLE_POPULATION: usize = 3;
    pub const IDLE_FIRE_INTERVAL_MS: f64 = 1000.0;
    pub const IDLE_BAND_HALF_WIDTH: f32 = 200.0;
    pub const IDLE_BAND_HALF_HEIGHT: f32 = 100.0;
    pub const IDLE_BOB_PERIOD_MS: f64 = 500.0;
    pub const IDLE_BOB_AMPLITUDE: f32 = 0.5;

    /// Boundary explosions are drawn this far above the bottom edge
    pub const BOUNDARY_BURST_OFFSET: f32 = 50.0;

    /// Session defaults
    pub const STARTING_LIVES: i32 = 3;
}

/// Neon palette, packed 0xRRGGBB
pub mod palette {
    pub const PRIMARY: u32 = 0x00f3ff;
    pub const SECONDARY: u32 = 0xff00ff;
    pub const ACCENT: u32 = 0xffe600;
    pub const DANGER: u32 = 0xff2a2a;
    pub const SUCCESS: u32 = 0x00ff41;
    pub const SPARK: u32 = 0xffffff;
}

/// Gun muzzle position: bottom center of the viewport
#[inline]
pub fn gun_position(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height)
}

/// Horizontal center of a lane
#[inline]
pub fn lane_center(width: f32, lane: u32) -> f32 {
    let lane_width = width / consts::LANE_COUNT as f32;
    lane_width * lane as f32 + lane_width / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers_split_viewport_in_thirds() {
        assert_eq!(lane_center(900.0, 0), 150.0);
        assert_eq!(lane_center(900.0, 1), 450.0);
        assert_eq!(lane_center(900.0, 2), 750.0);
    }

    #[test]
    fn test_gun_sits_bottom_center() {
        assert_eq!(gun_position(800.0, 600.0), Vec2::new(400.0, 600.0));
    }
}
