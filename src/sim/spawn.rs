//! Procedural spawning: asteroids, explosion bursts, power-up drops
//!
//! All randomness comes from the state's seeded RNG. Ranges are fixed or
//! clamped so radii, lifespans and probabilities stay valid by construction.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::entity::{Asteroid, Particle, ParticleTint, PowerUpDrop, PowerUpKind, SizeClass};
use super::state::GameState;
use crate::consts::{
    ASTEROID_MAX_SPIN, OUTLINE_MAX_POINTS, OUTLINE_MAX_SCALE, OUTLINE_MIN_POINTS,
    OUTLINE_MIN_SCALE,
};
use crate::heading;

/// Rejection-sampling attempts before falling back to the safe-radius ring
const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Build an asteroid of `size` at `pos` with a random heading and outline
///
/// Speed grows with `level`; small rocks move faster.
pub fn create_asteroid(state: &mut GameState, pos: Vec2, size: SizeClass, level: u32) -> Asteroid {
    let radius = state.tuning.asteroid_radius(size);
    let speed = state.tuning.asteroid_speed(size, level);
    let direction: f32 = state.rng.random_range(0.0..TAU);

    let points = state
        .rng
        .random_range(OUTLINE_MIN_POINTS..=OUTLINE_MAX_POINTS);
    let outline = (0..points)
        .map(|_| state.rng.random_range(OUTLINE_MIN_SCALE..=OUTLINE_MAX_SCALE))
        .collect();

    let angle = state.rng.random_range(0.0..TAU);
    let rotation_speed = state.rng.random_range(-ASTEROID_MAX_SPIN..=ASTEROID_MAX_SPIN);

    Asteroid {
        id: state.next_entity_id(),
        pos,
        vel: heading(direction) * speed,
        radius,
        angle,
        size,
        rotation_speed,
        outline,
    }
}

/// Emit `count` debris particles at `pos`
///
/// Oldest particles are evicted once the population hits the cap.
pub fn create_explosion(state: &mut GameState, pos: Vec2, tint: ParticleTint, count: usize) {
    let cap = state.tuning.max_particles;
    if cap == 0 {
        return;
    }
    let overflow = (state.particles.len() + count).saturating_sub(cap);
    if overflow > 0 {
        let evict = overflow.min(state.particles.len());
        state.particles.drain(..evict);
    }

    for _ in 0..count.min(cap) {
        let direction: f32 = state.rng.random_range(0.0..TAU);
        let speed: f32 = state.rng.random_range(0.0..=3.0);
        let radius = state.rng.random_range(1.0..=3.0);
        let decay = state.rng.random_range(0.02..=0.05);
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos,
            vel: heading(direction) * speed,
            radius,
            angle: 0.0,
            tint,
            life: 1.0,
            decay,
        });
    }
}

/// Roll the drop chance and maybe leave a power-up at `pos`
///
/// Returns the kind dropped, if any.
pub fn spawn_power_up(state: &mut GameState, pos: Vec2, now: f64) -> Option<PowerUpKind> {
    let chance = f64::from(state.tuning.power_up_drop_chance.clamp(0.0, 1.0));
    if !state.rng.random_bool(chance) {
        return None;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let direction: f32 = state.rng.random_range(0.0..TAU);
    let drop = PowerUpDrop {
        id: state.next_entity_id(),
        kind,
        pos,
        vel: heading(direction) * state.tuning.power_up_speed,
        radius: state.tuning.power_up_radius,
        angle: 0.0,
        created_at: now,
    };
    log::debug!("Power-up {:?} dropped at ({:.0}, {:.0})", kind, pos.x, pos.y);
    state.power_ups.push(drop);
    Some(kind)
}

/// Pick a point on screen at least the safe radius away from center
pub fn safe_spawn_position(state: &mut GameState) -> Vec2 {
    let bounds = state.bounds;
    let center = bounds.center();
    let safe_radius = state.tuning.safe_spawn_radius;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            state.rng.random_range(0.0..bounds.width),
            state.rng.random_range(0.0..bounds.height),
        );
        if candidate.distance(center) >= safe_radius {
            return candidate;
        }
    }

    // Screen too small for sampling: sit exactly on the safe ring
    let direction: f32 = state.rng.random_range(0.0..TAU);
    bounds.wrap(center + heading(direction) * safe_radius)
}

/// Replace the asteroid field with the starting rocks for the current level
pub fn populate_field(state: &mut GameState) {
    let level = state.session.level;
    let count = state.asteroid_count_for_level(level);
    state.asteroids.clear();
    for _ in 0..count {
        let pos = safe_spawn_position(state);
        let asteroid = create_asteroid(state, pos, SizeClass::Large, level);
        state.asteroids.push(asteroid);
    }
    log::debug!("Level {} field: {} asteroids", level, count);
}
