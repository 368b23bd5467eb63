//! Simulation state and core entity types
//!
//! Everything the frame step and hit resolver mutate lives in [`SimState`].
//! Score and lives are deliberately absent: they belong to the session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::palette;

/// Which loop the simulation runs this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Menu backdrop: floating targets, auto-fire
    #[default]
    Idle,
    /// Active play: falling targets, player fire, boundary damage
    Playing,
}

/// Target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetKind {
    #[default]
    Normal,
    Bomb,
    Powerup,
}

impl TargetKind {
    pub fn radius(self) -> f32 {
        match self {
            TargetKind::Normal => 40.0,
            TargetKind::Bomb => 50.0,
            TargetKind::Powerup => 35.0,
        }
    }

    pub fn max_health(self) -> i32 {
        match self {
            TargetKind::Bomb => 2,
            TargetKind::Normal | TargetKind::Powerup => 1,
        }
    }

    /// Lives lost when this target reaches the bottom edge
    pub fn boundary_damage(self) -> i32 {
        match self {
            TargetKind::Bomb => 2,
            TargetKind::Normal | TargetKind::Powerup => 1,
        }
    }

    /// Color and size of the burst when the player destroys this target
    pub fn destroy_burst(self) -> (u32, Burst) {
        match self {
            TargetKind::Normal => (palette::SECONDARY, Burst::Normal),
            TargetKind::Bomb => (palette::DANGER, Burst::Big),
            TargetKind::Powerup => (palette::SUCCESS, Burst::Big),
        }
    }
}

/// Explosion size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Burst {
    Normal,
    Big,
}

impl Burst {
    pub fn particle_count(self) -> usize {
        match self {
            Burst::Normal => 20,
            Burst::Big => 40,
        }
    }

    /// Full width of the per-axis velocity range
    pub fn spread(self) -> f32 {
        match self {
            Burst::Normal => 15.0,
            Burst::Big => 25.0,
        }
    }
}

/// A destructible target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Lane index (0..3)
    pub lane: u32,
    pub radius: f32,
    /// May drop below zero on an overkill hit
    pub health: i32,
    pub max_health: i32,
    pub kind: TargetKind,
    pub active: bool,
    /// Cosmetic only, never read by the simulation
    pub shatter_progress: f32,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, lane: u32, kind: TargetKind) -> Self {
        Self {
            id,
            pos,
            lane,
            radius: kind.radius(),
            health: kind.max_health(),
            max_health: kind.max_health(),
            kind,
            active: true,
            shatter_progress: 0.0,
        }
    }

    /// Apply damage, returning true if this hit destroyed the target
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.health -= damage;
        if self.health <= 0 {
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// A particle for explosion feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed once it reaches 0
    pub life: f32,
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
}

/// The single live laser beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub start: Vec2,
    pub end: Vec2,
    pub life: f32,
    pub hit: bool,
    pub powered: bool,
}

impl Beam {
    pub fn new(start: Vec2, end: Vec2, hit: bool, powered: bool) -> Self {
        Self {
            start,
            end,
            life: 1.0,
            hit,
            powered,
        }
    }
}

/// Gameplay events reported to the session owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TargetDestroyed { points: u32 },
    PlayerHit { damage: i32 },
    PowerupActivated,
}

/// Fire-and-forget audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Fire,
    Explosion,
    MetallicHit,
    Upgrade,
    /// Background music loop on/off
    MusicStart,
    MusicStop,
    UiClick,
}

/// Outbound messages produced by one step or fire call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outbox {
    pub events: Vec<GameEvent>,
    pub cues: Vec<SoundCue>,
}

impl Outbox {
    pub fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.cues.is_empty()
    }
}

/// Default particle cap (matches the Medium quality preset)
pub const MAX_PARTICLES: usize = 500;

/// Complete simulation state for one play session
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation RNG (spawn lanes/kinds, idle placement, particle scatter)
    pub rng: Pcg32,
    /// Live targets, in spawn order
    pub targets: Vec<Target>,
    /// Live particles
    pub particles: Vec<Particle>,
    pub beam: Option<Beam>,
    /// Timestamp (ms) when the powerup lapses; 0 when never earned
    pub powerup_expiry: f64,
    pub last_spawn: f64,
    /// Last idle auto-fire timestamp
    pub last_shot: f64,
    /// Upper bound on live particles
    pub max_particles: usize,
    next_id: u32,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            targets: Vec::new(),
            particles: Vec::new(),
            beam: None,
            powerup_expiry: 0.0,
            last_spawn: 0.0,
            last_shot: 0.0,
            max_particles: MAX_PARTICLES,
            next_id: 1,
        }
    }

    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear everything for a fresh session (RNG stream continues)
    pub fn reset(&mut self) {
        self.targets.clear();
        self.particles.clear();
        self.beam = None;
        self.powerup_expiry = 0.0;
        self.last_spawn = 0.0;
        self.last_shot = 0.0;
    }

    pub fn is_powered(&self, now: f64) -> bool {
        now < self.powerup_expiry
    }

    /// Milliseconds of powerup left at `now`
    pub fn powerup_remaining(&self, now: f64) -> f64 {
        (self.powerup_expiry - now).max(0.0)
    }

    /// Drop targets that were deactivated this frame
    pub fn purge_inactive(&mut self) {
        self.targets.retain(|t| t.active);
    }

    /// Read-only view for an external renderer
    pub fn snapshot(&self, now: f64) -> RenderSnapshot {
        RenderSnapshot {
            targets: self.targets.iter().filter(|t| t.active).cloned().collect(),
            particles: self.particles.clone(),
            beam: self.beam,
            powered: self.is_powered(now),
            powerup_remaining_ms: self.powerup_remaining(now),
        }
    }
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub targets: Vec<Target>,
    pub particles: Vec<Particle>,
    pub beam: Option<Beam>,
    pub powered: bool,
    pub powerup_remaining_ms: f64,
}
