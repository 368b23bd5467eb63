//! Target spawning for play and idle modes

use glam::Vec2;
use rand::Rng;

use super::difficulty::Difficulty;
use super::state::{SimState, Target, TargetKind};
use crate::consts::*;
use crate::lane_center;

/// Build a fresh target at the top of `lane`
pub fn spawn_target(id: u32, viewport_width: f32, lane: u32, kind: TargetKind) -> Target {
    let x = lane_center(viewport_width, lane);
    Target::new(id, Vec2::new(x, SPAWN_Y), lane, kind)
}

/// Map a uniform roll in [0, 1) onto a target kind
pub fn choose_kind(roll: f32, difficulty: &Difficulty) -> TargetKind {
    if roll < difficulty.powerup_chance {
        TargetKind::Powerup
    } else if roll < difficulty.powerup_chance + difficulty.bomb_chance {
        TargetKind::Bomb
    } else {
        TargetKind::Normal
    }
}

/// Spawn one target if the interval has elapsed. Returns the new target's ID.
pub fn spawn_timed(
    state: &mut SimState,
    now: f64,
    viewport_width: f32,
    difficulty: &Difficulty,
) -> Option<u32> {
    if now - state.last_spawn <= difficulty.spawn_interval_ms {
        return None;
    }

    let lane = state.rng.random_range(0..LANE_COUNT);
    let roll: f32 = state.rng.random();
    let kind = choose_kind(roll, difficulty);
    let id = state.next_entity_id();
    state.targets.push(spawn_target(id, viewport_width, lane, kind));
    state.last_spawn = now;

    log::debug!("spawned {:?} #{} in lane {}", kind, id, lane);
    Some(id)
}

/// Keep the menu backdrop populated with floating targets
pub fn spawn_idle(state: &mut SimState, viewport_width: f32, viewport_height: f32) -> Option<u32> {
    if state.targets.len() >= IDLE_POPULATION {
        return None;
    }

    let x = viewport_width / 2.0
        + state
            .rng
            .random_range(-IDLE_BAND_HALF_WIDTH..IDLE_BAND_HALF_WIDTH);
    let y = viewport_height / 2.0
        + state
            .rng
            .random_range(-IDLE_BAND_HALF_HEIGHT..IDLE_BAND_HALF_HEIGHT);
    let id = state.next_entity_id();
    state
        .targets
        .push(Target::new(id, Vec2::new(x, y), 1, TargetKind::Normal));
    Some(id)
}

/// Vertical bob applied to idle targets each frame
pub fn idle_bob(now: f64) -> f32 {
    (now / IDLE_BOB_PERIOD_MS).sin() as f32 * IDLE_BOB_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_target_geometry() {
        let t = spawn_target(5, 900.0, 2, TargetKind::Bomb);
        assert_eq!(t.pos, Vec2::new(750.0, -100.0));
        assert_eq!(t.lane, 2);
        assert_eq!(t.radius, 50.0);
        assert_eq!(t.health, 2);
        assert_eq!(t.max_health, 2);
        assert!(t.active);
        assert_eq!(t.shatter_progress, 0.0);
    }

    #[test]
    fn test_choose_kind_bands() {
        let mixed = Difficulty::for_score(5_000);
        assert_eq!(choose_kind(0.0, &mixed), TargetKind::Powerup);
        assert_eq!(choose_kind(0.049, &mixed), TargetKind::Powerup);
        assert_eq!(choose_kind(0.05, &mixed), TargetKind::Bomb);
        assert_eq!(choose_kind(0.449, &mixed), TargetKind::Bomb);
        // Band edge is the f32 sum 0.05 + 0.40, a hair above 0.45
        assert_eq!(choose_kind(0.45, &mixed), TargetKind::Bomb);
        assert_eq!(choose_kind(0.4501, &mixed), TargetKind::Normal);

        let early = Difficulty::for_score(0);
        assert_eq!(choose_kind(0.0, &early), TargetKind::Normal);
    }

    #[test]
    fn test_spawn_timed_respects_interval() {
        let mut state = SimState::new(11);
        let d = Difficulty::for_score(0);
        assert!(spawn_timed(&mut state, 2000.0, 900.0, &d).is_none());
        assert!(spawn_timed(&mut state, 2000.5, 900.0, &d).is_some());
        assert_eq!(state.last_spawn, 2000.5);
        assert!(spawn_timed(&mut state, 3500.0, 900.0, &d).is_none());
        assert!(spawn_timed(&mut state, 4001.0, 900.0, &d).is_some());
        assert_eq!(state.targets.len(), 2);
        for t in &state.targets {
            assert!(t.lane < LANE_COUNT);
            assert_eq!(t.kind, TargetKind::Normal);
        }
    }

    #[test]
    fn test_idle_population_tops_out_at_three() {
        let mut state = SimState::new(4);
        for _ in 0..10 {
            spawn_idle(&mut state, 1000.0, 800.0);
        }
        assert_eq!(state.targets.len(), 3);
        for t in &state.targets {
            assert!(t.pos.x >= 300.0 && t.pos.x < 700.0);
            assert!(t.pos.y >= 300.0 && t.pos.y < 500.0);
            assert_eq!(t.kind, TargetKind::Normal);
        }
    }
}
