//! Web Audio sound synthesis
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, SoundEffect};
use crate::settings::Settings;

/// Oscillator-based sound player
pub struct WebAudio {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume a suspended context; browsers only allow it from a user gesture
    pub fn resume(&self) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Shoot - square sweep down
    fn play_shoot(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Explosion - low sawtooth drop
    fn play_explode(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(100.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(10.0, t + 0.3)
            .ok();
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Thrust - short triangle rumble
    fn play_thrust(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(50.0, t).ok();
        gain.gain().set_value_at_time(vol * 0.05, t).ok();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.1).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Power-up - rising sine chirp
    fn play_power_up(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = Self::create_osc(ctx, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .linear_ramp_to_value_at_time(1200.0, t + 0.1)
            .ok();
        gain.gain().set_value_at_time(vol * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        match effect {
            SoundEffect::Shoot => Self::play_shoot(ctx, vol),
            SoundEffect::Explode => Self::play_explode(ctx, vol),
            SoundEffect::Thrust => Self::play_thrust(ctx, vol),
            SoundEffect::PowerUp => Self::play_power_up(ctx, vol),
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }
}
