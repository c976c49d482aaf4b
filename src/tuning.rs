//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! file may override any subset of fields; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::{PowerUpKind, SizeClass};

/// Gameplay balance values read by the simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ship ===
    pub ship_radius: f32,
    pub ship_thrust: f32,
    pub ship_rotation_speed: f32,
    pub friction: f32,
    pub invulnerability_ms: f64,
    pub ship_hitbox_scale: f32,
    pub starting_lives: u8,

    // === Weapons ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_lifespan_ms: f64,
    pub fire_rate_ms: f64,
    pub rapid_fire_rate_ms: f64,
    pub spread_angle: f32,

    // === Asteroids ===
    pub asteroid_speed_base: f32,
    pub asteroid_speed_per_level: f32,
    pub small_speed_multiplier: f32,
    pub large_radius: f32,
    pub medium_radius: f32,
    pub small_radius: f32,
    pub base_asteroid_count: u32,
    pub safe_spawn_radius: f32,

    // === Scoring ===
    pub points_large: u64,
    pub points_medium: u64,
    pub points_small: u64,
    pub power_up_bonus: u64,

    // === Power-ups ===
    pub power_up_radius: f32,
    pub power_up_speed: f32,
    pub power_up_drop_chance: f32,
    pub power_up_duration_ms: f64,

    // === Effects ===
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ship_radius: SHIP_SIZE,
            ship_thrust: SHIP_THRUST,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            friction: FRICTION,
            invulnerability_ms: SHIP_INVULNERABILITY_TIME,
            ship_hitbox_scale: SHIP_HITBOX_SCALE,
            starting_lives: STARTING_LIVES,

            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_lifespan_ms: BULLET_LIFESPAN,
            fire_rate_ms: FIRE_RATE_DEFAULT,
            rapid_fire_rate_ms: FIRE_RATE_RAPID,
            spread_angle: SPREAD_ANGLE,

            asteroid_speed_base: ASTEROID_SPEED_BASE,
            asteroid_speed_per_level: ASTEROID_SPEED_PER_LEVEL,
            small_speed_multiplier: SMALL_SPEED_MULTIPLIER,
            large_radius: ASTEROID_LARGE,
            medium_radius: ASTEROID_MEDIUM,
            small_radius: ASTEROID_SMALL,
            base_asteroid_count: BASE_ASTEROID_COUNT,
            safe_spawn_radius: SAFE_SPAWN_RADIUS,

            points_large: POINTS_LARGE,
            points_medium: POINTS_MEDIUM,
            points_small: POINTS_SMALL,
            power_up_bonus: POWERUP_BONUS,

            power_up_radius: POWERUP_RADIUS,
            power_up_speed: POWERUP_SPEED,
            power_up_drop_chance: POWERUP_DROP_CHANCE,
            power_up_duration_ms: POWERUP_DURATION,

            max_particles: MAX_PARTICLES,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load overrides from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Clamp values that would break spawn or collision invariants
    pub fn sanitized(mut self) -> Self {
        self.ship_radius = self.ship_radius.max(1.0);
        self.bullet_radius = self.bullet_radius.max(0.5);
        self.power_up_radius = self.power_up_radius.max(1.0);
        self.large_radius = self.large_radius.max(1.0);
        self.medium_radius = self.medium_radius.max(1.0);
        self.small_radius = self.small_radius.max(1.0);
        self.bullet_lifespan_ms = self.bullet_lifespan_ms.max(0.0);
        self.power_up_drop_chance = self.power_up_drop_chance.clamp(0.0, 1.0);
        self.ship_hitbox_scale = self.ship_hitbox_scale.clamp(0.1, 1.0);
        self.starting_lives = self.starting_lives.max(1);
        self
    }

    /// Collision radius for an asteroid size class
    pub fn asteroid_radius(&self, size: SizeClass) -> f32 {
        match size {
            SizeClass::Large => self.large_radius,
            SizeClass::Medium => self.medium_radius,
            SizeClass::Small => self.small_radius,
        }
    }

    /// Points awarded for destroying an asteroid of this class
    pub fn points(&self, size: SizeClass) -> u64 {
        match size {
            SizeClass::Large => self.points_large,
            SizeClass::Medium => self.points_medium,
            SizeClass::Small => self.points_small,
        }
    }

    /// Drift speed for an asteroid of this class at the given level
    pub fn asteroid_speed(&self, size: SizeClass, level: u32) -> f32 {
        let base = self.asteroid_speed_base + level as f32 * self.asteroid_speed_per_level;
        match size {
            SizeClass::Small => base * self.small_speed_multiplier,
            _ => base,
        }
    }

    /// Minimum milliseconds between shots for the active power-up
    pub fn fire_rate(&self, power_up: Option<PowerUpKind>) -> f64 {
        match power_up {
            Some(PowerUpKind::RapidFire) => self.rapid_fire_rate_ms,
            _ => self.fire_rate_ms,
        }
    }
}
