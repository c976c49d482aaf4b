//! Frame driver
//!
//! Glue between the simulation and its adapters: keys go into the input map,
//! one step runs per frame, then the step's events are drained into the audio
//! sink and the high-score store.

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::HighScoreStore;
use crate::input::{InputMap, SessionCommand};
use crate::settings::Settings;
use crate::sim::{Bounds, GameEvent, GameState, Hud, restart_game, start_game, tick};
use crate::tuning::Tuning;

/// A running game with its adapters
pub struct Game<S, A> {
    state: GameState,
    input: InputMap,
    settings: Settings,
    scores: S,
    audio: A,
}

impl<S: HighScoreStore, A: AudioSink> Game<S, A> {
    /// Create a game on the title screen, seeded with the stored high score
    pub fn new(seed: u64, bounds: Bounds, tuning: Tuning, scores: S, audio: A) -> Self {
        let mut state = GameState::new(seed, bounds, tuning);
        state.session.high_score = scores.high_score();
        log::info!(
            "Game initialized with seed {} ({}x{})",
            seed,
            state.bounds.width,
            state.bounds.height
        );
        Self {
            state,
            input: InputMap::new(),
            settings: Settings::default(),
            scores,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply player settings to the particle cap and the audio sink
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.tuning.max_particles = settings.max_particles();
        if self.state.particles.len() > self.state.tuning.max_particles {
            self.state.particles.clear();
        }
        self.audio.apply_settings(settings);
        self.settings = settings.clone();
        log::info!(
            "Settings: {} quality, particles {}, muted {}",
            settings.quality.as_str(),
            settings.particles,
            settings.muted
        );
    }

    /// Press a key; returns the command it triggered so the host can
    /// persist settings changes
    pub fn key_down(&mut self, key: &str, now: f64) -> Option<SessionCommand> {
        let phase = self.state.session.phase;
        let command = self.input.key_down(key, phase);
        match command {
            Some(SessionCommand::Start) => {
                start_game(&mut self.state, now);
            }
            Some(SessionCommand::Restart) => {
                restart_game(&mut self.state, now);
            }
            Some(SessionCommand::ToggleMute) => {
                let mut settings = self.settings.clone();
                settings.muted = !settings.muted;
                self.apply_settings(&settings);
            }
            None => {}
        }
        command
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Window focus lost: nothing stays held
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn hud(&self, now: f64) -> Hud {
        self.state.hud(now)
    }

    /// Run one step at `now` and dispatch its events
    pub fn frame(&mut self, now: f64) {
        let input = self.input.held();
        tick(&mut self.state, &input, now);

        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
            if let GameEvent::GameOver { high_score, .. } = event {
                self.scores.set_high_score(high_score);
            }
        }
    }
}
