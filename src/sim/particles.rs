//! Explosion particles
//!
//! Integration is per frame, not per second: the driver calls the step once
//! per animation frame and particles fade out in about fifty frames.

use glam::Vec2;
use rand::Rng;

use super::state::{Burst, Particle, SimState};
use crate::consts::*;

/// Spawn a burst of particles at `pos`
///
/// Stops early if the state's particle cap is reached.
pub fn explode(state: &mut SimState, pos: Vec2, color: u32, burst: Burst) {
    let half = burst.spread() / 2.0;
    for _ in 0..burst.particle_count() {
        if state.particles.len() >= state.max_particles {
            log::debug!("particle cap {} reached", state.max_particles);
            break;
        }
        let vel = Vec2::new(
            state.rng.random_range(-half..half),
            state.rng.random_range(-half..half),
        );
        let size = state.rng.random_range(2.0..6.0);
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos,
            vel,
            life: 1.0,
            max_life: 1.0,
            color,
            size,
        });
    }
}

impl Particle {
    /// Advance one frame: move, fall, drag, fade
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += GRAVITY;
        self.vel *= FRICTION;
        self.life -= PARTICLE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Step every particle and drop the ones that burned out
pub fn integrate(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.step();
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    fn lone_particle(vel: Vec2) -> Particle {
        Particle {
            id: 1,
            pos: Vec2::ZERO,
            vel,
            life: 1.0,
            max_life: 1.0,
            color: palette::SPARK,
            size: 3.0,
        }
    }

    #[test]
    fn test_burst_counts() {
        let mut state = SimState::new(42);
        explode(&mut state, Vec2::new(10.0, 10.0), palette::SECONDARY, Burst::Normal);
        assert_eq!(state.particles.len(), 20);
        explode(&mut state, Vec2::new(10.0, 10.0), palette::DANGER, Burst::Big);
        assert_eq!(state.particles.len(), 60);
    }

    #[test]
    fn test_burst_ranges() {
        let mut state = SimState::new(9);
        explode(&mut state, Vec2::ZERO, palette::DANGER, Burst::Big);
        for p in &state.particles {
            assert!(p.vel.x >= -12.5 && p.vel.x < 12.5);
            assert!(p.vel.y >= -12.5 && p.vel.y < 12.5);
            assert!(p.size >= 2.0 && p.size < 6.0);
            assert_eq!(p.life, 1.0);
            assert_eq!(p.color, palette::DANGER);
        }
    }

    #[test]
    fn test_cap_limits_burst() {
        let mut state = SimState::new(1).with_max_particles(30);
        explode(&mut state, Vec2::ZERO, palette::SPARK, Burst::Big);
        assert_eq!(state.particles.len(), 30);
    }

    #[test]
    fn test_step_physics() {
        let mut p = lone_particle(Vec2::new(1.0, -2.0));
        p.step();
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.x - 0.98).abs() < 1e-6);
        assert!((p.vel.y - (-2.0 + GRAVITY) * FRICTION).abs() < 1e-6);
        assert!((p.life - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_life_drops_each_frame_until_purged() {
        let mut particles = vec![lone_particle(Vec2::ZERO)];
        let mut frames = 0;
        let mut last_life = 1.0;
        while !particles.is_empty() {
            integrate(&mut particles);
            frames += 1;
            if let Some(p) = particles.first() {
                assert!((last_life - p.life - PARTICLE_DECAY).abs() < 1e-5);
                assert!(p.life > 0.0);
                last_life = p.life;
            }
            assert!(frames <= 51, "particle outlived its fade");
        }
        assert!(frames >= 50);
    }
}
