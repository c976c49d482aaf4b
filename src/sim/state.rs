//! Game state and session types
//!
//! Everything the step reads or writes lives in [`GameState`], passed by
//! exclusive reference. The RNG is owned here too, so a run is reproducible
//! from its seed, clock values and inputs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::entity::{Asteroid, Bullet, Particle, PowerUpDrop, PowerUpKind, Ship};
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    NotStarted,
    /// Active gameplay (level changes and respawns stay here)
    Playing,
    /// Lives ran out, waiting for the restart command
    GameOver,
}

/// Score, level and lives for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub score: u64,
    /// Starts at 1
    pub level: u32,
    pub lives: u8,
    /// Best score across runs, loaded from storage at startup
    pub high_score: u64,
}

impl Session {
    pub fn new(starting_lives: u8, high_score: u64) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            lives: starting_lives,
            high_score,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Things that happened during a step, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shoot,
    Thrust,
    Explode,
    PowerUp(PowerUpKind),
    LifeLost { lives_left: u8 },
    LevelCleared { level: u32 },
    GameOver { score: u64, high_score: u64 },
}

/// HUD summary for the host page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub lives: u8,
    pub power_up: Option<PowerUpKind>,
    pub power_up_label: Option<char>,
    /// Milliseconds left on the active power-up
    pub power_up_remaining: f64,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub session: Session,
    pub bounds: Bounds,
    pub tuning: Tuning,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUpDrop>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle (not started) state with the given seed
    pub fn new(seed: u64, bounds: Bounds, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            session: Session::new(tuning.starting_lives, 0),
            bounds,
            ship: Ship::default(),
            tuning,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        // Parked ship for the title screen
        let id = state.next_entity_id();
        state.ship = Ship::new(id, state.bounds.center(), state.tuning.ship_radius, 0.0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Update the playfield size (window resize)
    ///
    /// Entities keep their coordinates; the next step wraps anything left
    /// outside the new bounds.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        log::debug!("Playfield resized to {}x{}", self.bounds.width, self.bounds.height);
    }

    /// Number of asteroids a level starts with
    pub fn asteroid_count_for_level(&self, level: u32) -> u32 {
        self.tuning.base_asteroid_count + level
    }

    /// Screen center, where the ship spawns
    pub fn spawn_point(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn hud(&self, now: f64) -> Hud {
        let power_up = self.ship.power_up;
        let power_up_remaining = match power_up {
            Some(_) => (self.ship.power_up_expires_at - now).max(0.0),
            None => 0.0,
        };
        Hud {
            phase: self.session.phase,
            score: self.session.score,
            high_score: self.session.high_score,
            level: self.session.level,
            lives: self.session.lives,
            power_up,
            power_up_label: power_up.map(PowerUpKind::label),
            power_up_remaining,
        }
    }
}
