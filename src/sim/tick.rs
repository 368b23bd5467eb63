//! Per-frame simulation step
//!
//! Called once per animation frame by the driver. Frame spacing follows the
//! display, so every timer compares against the `now` passed in rather than
//! counting frames.

use glam::Vec2;

use super::difficulty::Difficulty;
use super::hitscan::{FireResult, fire};
use super::particles::{explode, integrate};
use super::spawner::{idle_bob, spawn_idle, spawn_timed};
use super::state::{Beam, Burst, GameEvent, GameMode, Outbox, SimState, SoundCue};
use crate::consts::*;
use crate::{gun_position, palette};

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub mode: GameMode,
    /// Session score, read for difficulty only
    pub score: u64,
    /// Latest pointer position
    pub pointer: Vec2,
    /// Fire trigger pressed since the last frame
    pub fire: bool,
}

/// Frame geometry and clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn gun(&self) -> Vec2 {
        gun_position(self.width, self.height)
    }
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, input: &FrameInput, now: f64, viewport: Viewport) -> Outbox {
    let mut out = Outbox::default();

    // Player fire only counts during play
    if input.fire && input.mode == GameMode::Playing {
        fire_at(state, input.pointer, now, viewport, &mut out);
    }

    match input.mode {
        GameMode::Playing => {
            let difficulty = Difficulty::for_score(input.score);
            spawn_timed(state, now, viewport.width, &difficulty);
            advance_falling(state, difficulty.speed, viewport.height, &mut out);
        }
        GameMode::Idle => {
            spawn_idle(state, viewport.width, viewport.height);
            let bob = idle_bob(now);
            for target in &mut state.targets {
                target.pos.y += bob;
            }
        }
    }

    state.purge_inactive();

    if input.mode == GameMode::Idle {
        idle_auto_fire(state, now, viewport, &mut out);
    }

    integrate(&mut state.particles);
    decay_beam(state);

    out
}

/// Fire from the gun toward `aim`
pub fn fire_at(
    state: &mut SimState,
    aim: Vec2,
    now: f64,
    viewport: Viewport,
    out: &mut Outbox,
) -> FireResult {
    fire(state, viewport.gun(), aim, now, out)
}

/// Move targets down and resolve the bottom-edge crossings
fn advance_falling(state: &mut SimState, speed: f32, height: f32, out: &mut Outbox) {
    let mut crossings = Vec::new();
    for target in &mut state.targets {
        target.pos.y += speed;
        if target.active && target.pos.y > height {
            target.active = false;
            crossings.push((target.pos.x, target.kind));
        }
    }

    for (x, kind) in crossings {
        let damage = kind.boundary_damage();
        log::debug!("{:?} reached the gun line, {} damage", kind, damage);
        out.event(GameEvent::PlayerHit { damage });
        explode(
            state,
            Vec2::new(x, height - BOUNDARY_BURST_OFFSET),
            palette::DANGER,
            Burst::Big,
        );
        out.cue(SoundCue::Explosion);
    }
}

/// Menu backdrop: shoot the oldest floating target once a second
///
/// Returns true if a shot was taken.
pub fn idle_auto_fire(state: &mut SimState, now: f64, viewport: Viewport, out: &mut Outbox) -> bool {
    if now - state.last_shot <= IDLE_FIRE_INTERVAL_MS {
        return false;
    }
    let Some(target) = state.targets.first_mut() else {
        return false;
    };

    target.active = false;
    let pos = target.pos;
    state.beam = Some(Beam::new(viewport.gun(), pos, true, false));
    explode(state, pos, palette::SECONDARY, Burst::Normal);
    state.last_shot = now;
    out.cue(SoundCue::Fire);
    true
}

/// Fade the live beam, clearing it once spent
fn decay_beam(state: &mut SimState) {
    if let Some(beam) = state.beam.as_mut() {
        beam.life -= BEAM_DECAY;
        if beam.life <= 0.0 {
            state.beam = None;
        }
    }
}
