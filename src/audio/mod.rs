//! Fire-and-forget sound effects
//!
//! The simulation only records [`GameEvent`]s. The frame driver maps them to
//! [`SoundEffect`]s and hands them to an [`AudioSink`]; nothing flows back.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Asteroid or ship destroyed
    Explode,
    /// Engine rumble while thrusting
    Thrust,
    /// Power-up collected
    PowerUp,
}

impl SoundEffect {
    /// Sound for a step event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(Self::Shoot),
            GameEvent::Explode => Some(Self::Explode),
            GameEvent::Thrust => Some(Self::Thrust),
            GameEvent::PowerUp(_) => Some(Self::PowerUp),
            GameEvent::LifeLost { .. } | GameEvent::LevelCleared { .. } | GameEvent::GameOver { .. } => {
                None
            }
        }
    }
}

/// Destination for sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Pick up volume and mute changes
    fn apply_settings(&mut self, settings: &Settings);
}

/// Counts effects instead of playing them (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct SoundLog {
    pub played: Vec<SoundEffect>,
    /// Silent sinks record nothing
    pub muted: bool,
}

impl SoundLog {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}

impl AudioSink for SoundLog {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        log::trace!("sfx {:?}", effect);
        self.played.push(effect);
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.muted = settings.effective_volume() <= 0.0;
    }
}
