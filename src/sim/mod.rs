//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - Timers compare driver timestamps, never frame counts
//! - Outbound events are returned, never called back
//! - No rendering, audio, or platform dependencies

pub mod difficulty;
pub mod hitscan;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use difficulty::Difficulty;
pub use hitscan::{FireResult, find_hit, fire};
pub use particles::{explode, integrate};
pub use spawner::{choose_kind, spawn_idle, spawn_target, spawn_timed};
pub use state::{
    Beam, Burst, GameEvent, GameMode, Outbox, Particle, RenderSnapshot, SimState, SoundCue,
    Target, TargetKind, MAX_PARTICLES,
};
pub use tick::{FrameInput, Viewport, fire_at, tick};
