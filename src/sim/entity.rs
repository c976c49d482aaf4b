//! Entity records
//!
//! Passive data only. Every entity carries a position, velocity, collision
//! radius and facing angle; behavior lives in `spawn` and `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SHIP_SIZE;

/// Asteroid tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    /// Class of the two fragments left behind, `None` for the smallest tier
    pub fn split(self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    SpreadShot,
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::SpreadShot,
        PowerUpKind::RapidFire,
    ];

    /// Single-letter HUD label
    pub fn label(self) -> char {
        match self {
            PowerUpKind::Shield => 'S',
            PowerUpKind::SpreadShot => 'W',
            PowerUpKind::RapidFire => 'R',
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Facing (radians)
    pub angle: f32,
    /// Angular delta applied on the last step (-rot, 0 or +rot)
    pub rotation: f32,
    pub thrusting: bool,
    /// Asteroid collisions are ignored while `now < invulnerable_until`
    pub invulnerable_until: f64,
    pub power_up: Option<PowerUpKind>,
    pub power_up_expires_at: f64,
    pub last_shot_at: f64,
}

impl Ship {
    /// Fresh ship at `pos`, facing up, invulnerable until `invulnerable_until`
    pub fn new(id: u32, pos: Vec2, radius: f32, invulnerable_until: f64) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            angle: -std::f32::consts::FRAC_PI_2, // Point up
            rotation: 0.0,
            thrusting: false,
            invulnerable_until,
            power_up: None,
            power_up_expires_at: 0.0,
            last_shot_at: 0.0,
        }
    }

    pub fn is_invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }

    /// Shield is simply "the active power-up is Shield"
    pub fn shield_active(&self) -> bool {
        self.power_up == Some(PowerUpKind::Shield)
    }

    /// Tip of the hull, where bullets leave the ship
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::heading(self.angle) * self.radius
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new(0, Vec2::ZERO, SHIP_SIZE, 0.0)
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub size: SizeClass,
    /// Visual spin per frame (no effect on collisions)
    pub rotation_speed: f32,
    /// Jagged outline as radius multipliers, fixed at creation
    pub outline: Vec<f32>,
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub created_at: f64,
    pub lifespan: f64,
}

impl Bullet {
    /// Expired once its age reaches its lifespan
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.created_at >= self.lifespan
    }
}

/// What a particle is debris of (mapped to a color by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    Ship,
    Asteroid,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub tint: ParticleTint,
    pub life: f32, // 0-1, decreases by `decay` every frame
    pub decay: f32,
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpDrop {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub created_at: f64,
}
