//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, clock sampled by the caller
//! - Seeded RNG only
//! - Populations are sets: membership is stable, order is not (removal swaps)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bounds::Bounds;
pub use collision::{Circle, circles_overlap, first_hit, overlaps, overlaps_scaled};
pub use entity::{Asteroid, Bullet, Particle, ParticleTint, PowerUpDrop, PowerUpKind, Ship, SizeClass};
pub use spawn::{create_asteroid, create_explosion, populate_field, safe_spawn_position, spawn_power_up};
pub use state::{GameEvent, GamePhase, GameState, Hud, Session};
pub use tick::{TickInput, asteroid_census, restart_game, start_game, tick};
