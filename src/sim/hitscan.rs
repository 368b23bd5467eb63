//! Hit-scan resolution for the player's laser
//!
//! The beam is instantaneous: a ray from the gun through the pointer,
//! truncated a little past the pointer, tested against every active target's
//! hit circle.

use glam::Vec2;

use super::particles::explode;
use super::state::{Beam, Burst, GameEvent, Outbox, SimState, SoundCue, Target, TargetKind};
use crate::consts::*;
use crate::palette;

/// Outcome of a single fire action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireResult {
    /// ID of the target that took the shot, if any
    pub hit_target: Option<u32>,
    /// Damage dealt (0 on a miss)
    pub damage_applied: i32,
    pub destroyed: bool,
    pub beam_end: Vec2,
}

/// Geometry of one target relative to the aim ray
#[derive(Debug, Clone, Copy)]
pub struct RayProbe {
    /// Distance along the aim direction to the closest approach
    pub along: f32,
    /// Perpendicular distance from the ray to the target center
    pub off_axis: f32,
    /// Straight-line distance from the gun to the target center
    pub range: f32,
}

/// Unit aim direction and aim distance, or None when aim sits on the gun
pub fn aim_direction(gun: Vec2, aim: Vec2) -> Option<(Vec2, f32)> {
    let delta = aim - gun;
    let dist = delta.length();
    if dist > f32::EPSILON && dist.is_finite() {
        Some((delta / dist, dist))
    } else {
        None
    }
}

/// Project a target center onto the ray
pub fn probe(gun: Vec2, dir: Vec2, center: Vec2) -> RayProbe {
    let to_target = center - gun;
    let along = to_target.dot(dir);
    let closest = gun + dir * along;
    RayProbe {
        along,
        off_axis: closest.distance(center),
        range: to_target.length(),
    }
}

/// Index of the nearest active target the ray passes through
pub fn find_hit(
    gun: Vec2,
    aim: Vec2,
    targets: &[Target],
    tolerance: f32,
) -> Option<usize> {
    let (dir, aim_dist) = aim_direction(gun, aim)?;

    let mut best: Option<(usize, f32)> = None;
    for (idx, target) in targets.iter().enumerate() {
        if !target.active {
            continue;
        }
        let p = probe(gun, dir, target.pos);
        let in_tube = p.off_axis < target.radius * tolerance;
        let in_reach = p.along > 0.0 && p.along < aim_dist + RAY_SLACK;
        if in_tube && in_reach && best.is_none_or(|(_, range)| p.range < range) {
            best = Some((idx, p.range));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Fire the laser from `gun` toward `aim` at time `now`
///
/// Replaces the live beam, applies damage, and reports events and cues to
/// `out`. A zero-length aim resolves as a miss along +x (heading angle 0).
pub fn fire(state: &mut SimState, gun: Vec2, aim: Vec2, now: f64, out: &mut Outbox) -> FireResult {
    let powered = state.is_powered(now);
    let damage = if powered { 2 } else { 1 };
    let tolerance = if powered { POWERED_TOLERANCE } else { 1.0 };

    let mut result = FireResult {
        hit_target: None,
        damage_applied: 0,
        destroyed: false,
        beam_end: gun,
    };

    match find_hit(gun, aim, &state.targets, tolerance) {
        Some(idx) => {
            let target = &mut state.targets[idx];
            let destroyed = target.take_damage(damage);
            let (id, pos, kind) = (target.id, target.pos, target.kind);

            result.hit_target = Some(id);
            result.damage_applied = damage;
            result.destroyed = destroyed;
            result.beam_end = pos;

            if destroyed {
                log::debug!("destroyed {:?} #{}", kind, id);
                if kind == TargetKind::Powerup {
                    state.powerup_expiry = now + POWERUP_DURATION_MS;
                    log::info!("powerup active until {:.0}ms", state.powerup_expiry);
                    out.event(GameEvent::PowerupActivated);
                    out.cue(SoundCue::Upgrade);
                }
                let (color, burst) = kind.destroy_burst();
                explode(state, pos, color, burst);
                out.cue(SoundCue::Explosion);
                out.event(GameEvent::TargetDestroyed {
                    points: TARGET_REWARD,
                });
            } else {
                log::debug!("chipped {:?} #{} to {} hp", kind, id, state.targets[idx].health);
                explode(state, pos, palette::SPARK, Burst::Normal);
                out.cue(SoundCue::MetallicHit);
            }
        }
        None => {
            // Zero-length aim has heading 0, so the beam runs along +x
            let dir = aim_direction(gun, aim).map_or(Vec2::X, |(dir, _)| dir);
            result.beam_end = gun + dir * MISS_BEAM_LENGTH;
        }
    }

    state.beam = Some(Beam::new(
        gun,
        result.beam_end,
        result.hit_target.is_some(),
        powered,
    ));
    out.cue(SoundCue::Fire);

    result
}
