//! Keyboard to held-control mapping
//!
//! Key names follow `KeyboardEvent.key` ("ArrowLeft", "a", " ", "Enter").
//! Single-character keys match case-insensitively so Shift or Caps Lock
//! doesn't drop a held control.

use crate::sim::{GamePhase, TickInput};

/// Logical controls the step reads as held booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

/// Discrete session commands raised by key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Space on the title screen
    Start,
    /// Enter on the game-over screen
    Restart,
    /// M in any phase
    ToggleMute,
}

const START_KEY: &str = " ";
const RESTART_KEY: &str = "Enter";
const MUTE_KEY: &str = "m";

/// Key bindings plus the currently held controls
#[derive(Debug, Clone)]
pub struct InputMap {
    bindings: Vec<(String, Control)>,
    held: TickInput,
}

impl Default for InputMap {
    fn default() -> Self {
        let mut map = Self {
            bindings: Vec::new(),
            held: TickInput::default(),
        };
        for (key, control) in [
            ("ArrowLeft", Control::RotateLeft),
            ("a", Control::RotateLeft),
            ("ArrowRight", Control::RotateRight),
            ("d", Control::RotateRight),
            ("ArrowUp", Control::Thrust),
            ("w", Control::Thrust),
            (" ", Control::Fire),
        ] {
            map.bind(key, control);
        }
        map
    }
}

fn normalize(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_owned()
    }
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding (a key may drive only one control)
    pub fn bind(&mut self, key: &str, control: Control) {
        let key = normalize(key);
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, control));
    }

    pub fn control_for(&self, key: &str) -> Option<Control> {
        let key = normalize(key);
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| *c)
    }

    /// Press a key; returns a session command when the press means one
    pub fn key_down(&mut self, key: &str, phase: GamePhase) -> Option<SessionCommand> {
        if let Some(control) = self.control_for(key) {
            self.set_held(control, true);
        }
        if normalize(key) == MUTE_KEY {
            return Some(SessionCommand::ToggleMute);
        }
        match (phase, key) {
            (GamePhase::NotStarted, START_KEY) => Some(SessionCommand::Start),
            (GamePhase::GameOver, RESTART_KEY) => Some(SessionCommand::Restart),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = self.control_for(key) {
            self.set_held(control, false);
        }
    }

    /// Drop every held control (focus loss)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }

    /// Snapshot of held controls for the next step
    pub fn held(&self) -> TickInput {
        self.held
    }

    fn set_held(&mut self, control: Control, down: bool) {
        let slot = match control {
            Control::RotateLeft => &mut self.held.rotate_left,
            Control::RotateRight => &mut self.held.rotate_right,
            Control::Thrust => &mut self.held.thrust,
            Control::Fire => &mut self.held.fire,
        };
        *slot = down;
    }
}
