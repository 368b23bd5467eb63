//! Session owner: score, lives, and HUD flair
//!
//! The simulation never touches score or lives. It reports events, and the
//! session folds them in here. Short-lived HUD effects are timestamps checked
//! against `now`, not scheduled callbacks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::STARTING_LIVES;
use crate::highscores::BestScore;
use crate::settings::Settings;
use crate::sim::{
    FrameInput, GameEvent, GameMode, Outbox, RenderSnapshot, SimState, SoundCue, Viewport, tick,
};

/// How long the critical-hit banner stays up (ms)
pub const CRITICAL_FLAIR_MS: f64 = 800.0;
/// Chance a kill shows the critical-hit banner
pub const CRITICAL_FLAIR_CHANCE: f32 = 0.2;
/// Power gauge at rest
pub const FULL_POWER: u32 = 100;
/// Gauge drop per kill, and the floor it can't dip below
pub const POWER_DIP: u32 = 10;
pub const POWER_FLOOR: u32 = 50;
/// Time for the gauge to snap back after a kill (ms)
pub const POWER_RECOVERY_MS: f64 = 500.0;

/// One player's run, from start screen to game over
#[derive(Debug, Clone)]
pub struct Session {
    sim: SimState,
    /// Rolls for HUD flair; kept apart from the simulation stream
    rng: Pcg32,
    playing: bool,
    score: u64,
    lives: i32,
    best: BestScore,
    pointer: Vec2,
    fire_pending: bool,
    critical_until: f64,
    dipped_power: u32,
    /// When the last dip happened
    dipped_at: f64,
    /// One pending snap-back per kill; any that fires after the last dip restores the gauge
    power_restores: Vec<f64>,
}

impl Session {
    pub fn new(seed: u64, settings: &Settings, best: BestScore) -> Self {
        Self {
            sim: SimState::new(seed).with_max_particles(settings.max_particles()),
            rng: Pcg32::seed_from_u64(seed.wrapping_add(0x9e37_79b9)),
            playing: false,
            score: 0,
            lives: STARTING_LIVES,
            best,
            pointer: Vec2::ZERO,
            fire_pending: false,
            critical_until: 0.0,
            dipped_power: FULL_POWER,
            dipped_at: 0.0,
            power_restores: Vec::new(),
        }
    }

    /// Leave the menu and begin a fresh run
    ///
    /// Returns the music and click cues for the host to play.
    pub fn start(&mut self) -> Outbox {
        self.sim.reset();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.dipped_power = FULL_POWER;
        self.dipped_at = 0.0;
        self.power_restores.clear();
        self.critical_until = 0.0;
        self.fire_pending = false;
        self.playing = true;
        log::info!("Session started (best {})", self.best.score);

        let mut out = Outbox::default();
        out.cue(SoundCue::MusicStart);
        out.cue(SoundCue::UiClick);
        out
    }

    /// Quit back to the menu, keeping the score on screen
    pub fn exit(&mut self) -> Outbox {
        let mut out = Outbox::default();
        if !self.playing {
            return out;
        }
        self.playing = false;
        self.best.record(self.score);
        log::info!("Session exited at {}", self.score);
        out.cue(SoundCue::MusicStop);
        out.cue(SoundCue::UiClick);
        out
    }

    pub fn set_pointer(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Queue a shot for the next frame (ignored outside play)
    pub fn trigger_fire(&mut self) {
        if self.playing {
            self.fire_pending = true;
        }
    }

    /// Run one simulation frame and fold its events into the session
    pub fn frame(&mut self, now: f64, viewport: Viewport) -> Outbox {
        let input = FrameInput {
            mode: self.mode(),
            score: self.score,
            pointer: self.pointer,
            fire: std::mem::take(&mut self.fire_pending),
        };
        let mut out = tick(&mut self.sim, &input, now, viewport);
        let events = std::mem::take(&mut out.events);
        for &event in &events {
            self.apply(event, now, &mut out);
        }
        out.events = events;
        out
    }

    /// React to one simulation event, queueing any session cues into `out`
    pub fn apply(&mut self, event: GameEvent, now: f64, out: &mut Outbox) {
        match event {
            GameEvent::TargetDestroyed { points } => {
                self.score += u64::from(points);
                if self.rng.random::<f32>() < CRITICAL_FLAIR_CHANCE {
                    self.critical_until = now + CRITICAL_FLAIR_MS;
                }
                let current = self.power_level(now);
                self.dipped_power = current.saturating_sub(POWER_DIP).max(POWER_FLOOR);
                self.dipped_at = now;
                self.power_restores.retain(|&at| at > now);
                self.power_restores.push(now + POWER_RECOVERY_MS);
            }
            GameEvent::PlayerHit { damage } => {
                self.lives -= damage;
                if self.lives <= 0 {
                    self.game_over(out);
                }
            }
            GameEvent::PowerupActivated => {}
        }
    }

    fn game_over(&mut self, out: &mut Outbox) {
        log::info!("GAME OVER - final score {}", self.score);
        self.playing = false;
        self.best.record(self.score);
        self.lives = STARTING_LIVES;
        out.cue(SoundCue::MusicStop);
    }

    pub fn mode(&self) -> GameMode {
        if self.playing {
            GameMode::Playing
        } else {
            GameMode::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn best(&self) -> BestScore {
        self.best
    }

    pub fn critical_hit_visible(&self, now: f64) -> bool {
        now < self.critical_until
    }

    /// Power gauge reading (50..=100)
    pub fn power_level(&self, now: f64) -> u32 {
        let restored = self
            .power_restores
            .iter()
            .any(|&at| at > self.dipped_at && at <= now);
        if restored { FULL_POWER } else { self.dipped_power }
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimState {
        &mut self.sim
    }

    pub fn snapshot(&self, now: f64) -> RenderSnapshot {
        self.sim.snapshot(now)
    }
}
