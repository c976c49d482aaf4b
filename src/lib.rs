//! Asteroid Drift - A wrap-around asteroid field shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, session state)
//! - `game`: Frame driver wiring the simulation to its adapters
//! - `renderer`: Scene geometry and the wgpu pipeline that draws it
//! - `platform`: Frame clock and the browser entry point
//! - `input`: Keyboard to held-control mapping
//! - `audio`: Fire-and-forget sound effects
//! - `persistence`: Key-value storage (LocalStorage on web, files on native)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use game::Game;
pub use highscores::HighScoreStore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Motion values are per display frame, times are milliseconds.
pub mod consts {
    /// Default playfield size (the browser host resizes to the window)
    pub const DEFAULT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_HEIGHT: f32 = 720.0;

    /// Ship handling
    pub const SHIP_SIZE: f32 = 20.0; // Radius
    pub const SHIP_THRUST: f32 = 0.15;
    pub const SHIP_ROTATION_SPEED: f32 = 0.08; // Radians per frame
    pub const FRICTION: f32 = 0.98; // Low friction for drift
    pub const SHIP_INVULNERABILITY_TIME: f64 = 3000.0;
    /// 0.8 scale on both radii makes the ship hitbox slightly forgiving
    pub const SHIP_HITBOX_SCALE: f32 = 0.8;
    pub const STARTING_LIVES: u8 = 3;

    /// Weapons
    pub const BULLET_SPEED: f32 = 7.0;
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_LIFESPAN: f64 = 1500.0;
    pub const BULLET_INHERIT: f32 = 0.5; // Share of ship velocity carried by bullets
    pub const FIRE_RATE_DEFAULT: f64 = 250.0;
    pub const FIRE_RATE_RAPID: f64 = 100.0;
    pub const SPREAD_ANGLE: f32 = 0.2;

    /// Asteroids
    pub const ASTEROID_SPEED_BASE: f32 = 1.5;
    pub const ASTEROID_SPEED_PER_LEVEL: f32 = 0.1;
    pub const SMALL_SPEED_MULTIPLIER: f32 = 1.5;
    pub const ASTEROID_LARGE: f32 = 45.0;
    pub const ASTEROID_MEDIUM: f32 = 25.0;
    pub const ASTEROID_SMALL: f32 = 15.0;
    pub const ASTEROID_MAX_SPIN: f32 = 0.025;
    pub const OUTLINE_MIN_POINTS: usize = 8;
    pub const OUTLINE_MAX_POINTS: usize = 13;
    pub const OUTLINE_MIN_SCALE: f32 = 0.8;
    pub const OUTLINE_MAX_SCALE: f32 = 1.2;
    /// Level asteroids = BASE_ASTEROID_COUNT + level
    pub const BASE_ASTEROID_COUNT: u32 = 3;
    /// New asteroids keep this distance from screen center
    pub const SAFE_SPAWN_RADIUS: f32 = 200.0;

    /// Scoring
    pub const POINTS_LARGE: u64 = 20;
    pub const POINTS_MEDIUM: u64 = 50;
    pub const POINTS_SMALL: u64 = 100;
    pub const POWERUP_BONUS: u64 = 500;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 15.0;
    pub const POWERUP_SPEED: f32 = 0.5;
    pub const POWERUP_DROP_CHANCE: f32 = 0.1;
    pub const POWERUP_DURATION: f64 = 10_000.0;

    /// Explosions
    pub const DEBRIS_PARTICLES: usize = 8;
    pub const SMALL_DEBRIS_PARTICLES: usize = 15;
    pub const SHIP_DEBRIS_PARTICLES: usize = 20;
    pub const MAX_PARTICLES: usize = 512;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap `value` into `[min, min + span)`
///
/// Overshoot carries over to the opposite edge.
#[inline]
pub fn wrap_range(value: f32, min: f32, span: f32) -> f32 {
    let wrapped = (value - min).rem_euclid(span) + min;
    // rem_euclid can round up to exactly `span` for tiny negative inputs
    if wrapped >= min + span { min } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_range_carries_overshoot() {
        assert_eq!(wrap_range(805.0, 0.0, 800.0), 5.0);
        assert_eq!(wrap_range(-5.0, 0.0, 800.0), 795.0);
        assert_eq!(wrap_range(400.0, 0.0, 800.0), 400.0);
    }

    #[test]
    fn test_wrap_range_never_returns_upper_edge() {
        let w = wrap_range(-1e-9, 0.0, 800.0);
        assert!((0.0..800.0).contains(&w));
        let w = wrap_range(800.0, 0.0, 800.0);
        assert_eq!(w, 0.0);
    }

    #[test]
    fn test_heading_is_unit() {
        let h = heading(1.234);
        assert!((h.length() - 1.0).abs() < 1e-6);
        let up = heading(-std::f32::consts::FRAC_PI_2);
        assert!(up.y < -0.999);
    }
}
