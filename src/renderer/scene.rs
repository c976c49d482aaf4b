//! Scene assembly: one triangle list per frame
//!
//! Draw order, back to front: particles, power-ups, asteroids, bullets, ship.

use glam::Vec2;

use super::shapes::{circle, closed_polyline, line, ring};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{GameState, ParticleTint, PowerUpKind, Ship};

/// Stroke width for outlines
const LINE_WIDTH: f32 = 2.0;
/// Shield ring sits this far outside the hull
const SHIELD_GAP: f32 = 10.0;

/// Presentation switches derived from settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub circle_segments: u32,
    /// Steady alpha instead of flicker and pulse
    pub reduced_motion: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl SceneOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            circle_segments: settings.quality.circle_segments(),
            reduced_motion: settings.reduced_motion,
        }
    }
}

pub fn power_up_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Shield => colors::POWERUP_SHIELD,
        PowerUpKind::SpreadShot => colors::POWERUP_SPREAD,
        PowerUpKind::RapidFire => colors::POWERUP_RAPID,
    }
}

/// Build every vertex for the frame at `now`
///
/// Only a running game draws entities; the title and game-over screens
/// leave the field clear for their overlays.
pub fn build_scene(state: &GameState, now: f64, options: &SceneOptions) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if !state.session.is_playing() {
        return vertices;
    }
    let segments = options.circle_segments;

    for p in &state.particles {
        let base = match p.tint {
            ParticleTint::Ship => colors::SHIP,
            ParticleTint::Asteroid => colors::ASTEROID,
        };
        let color = colors::faded(base, p.life);
        vertices.extend(circle(p.pos, p.radius, color, segments));
    }

    for p in &state.power_ups {
        let color = power_up_color(p.kind);
        vertices.extend(ring(
            p.pos,
            p.radius - LINE_WIDTH / 2.0,
            p.radius + LINE_WIDTH / 2.0,
            color,
            segments,
        ));
    }

    for a in &state.asteroids {
        let step = std::f32::consts::TAU / a.outline.len().max(1) as f32;
        let points: Vec<Vec2> = a
            .outline
            .iter()
            .enumerate()
            .map(|(i, mag)| a.pos + Vec2::from_angle(a.angle + i as f32 * step) * (a.radius * mag))
            .collect();
        vertices.extend(closed_polyline(&points, LINE_WIDTH, colors::ASTEROID));
    }

    for b in &state.bullets {
        vertices.extend(circle(b.pos, b.radius, colors::BULLET, segments));
    }

    ship(&mut vertices, &state.ship, now, options);
    vertices
}

/// Hull alpha: blinks at 5 Hz while invulnerable
pub fn ship_alpha(ship: &Ship, now: f64, reduced_motion: bool) -> f32 {
    if !ship.is_invulnerable(now) {
        return 1.0;
    }
    if reduced_motion || (now / 100.0).floor() as i64 % 2 == 0 {
        0.5
    } else {
        1.0
    }
}

fn ship(out: &mut Vec<Vertex>, ship: &Ship, now: f64, options: &SceneOptions) {
    let r = ship.radius;
    let rot = Vec2::from_angle(ship.angle);
    let local = |x: f32, y: f32| ship.pos + rot.rotate(Vec2::new(x, y));

    let alpha = ship_alpha(ship, now, options.reduced_motion);
    let hull = [
        local(r, 0.0),
        local(-r, r * 0.7),
        local(-r * 0.6, 0.0),
        local(-r, -r * 0.7),
    ];
    out.extend(closed_polyline(&hull, LINE_WIDTH, colors::faded(colors::SHIP, alpha)));

    if ship.thrusting {
        // Flame length jitters with the clock
        let jitter = ((now / 30.0).sin() * 0.5 + 0.5) as f32 * 10.0;
        out.extend(line(
            local(-r * 0.6, 0.0),
            local(-r * 1.5 - jitter, 0.0),
            LINE_WIDTH,
            colors::faded(colors::FLAME, alpha),
        ));
    }

    if ship.shield_active() {
        let pulse = if options.reduced_motion {
            0.6
        } else {
            0.6 + (now / 100.0).sin() as f32 * 0.2
        };
        let radius = r + SHIELD_GAP;
        out.extend(ring(
            ship.pos,
            radius - LINE_WIDTH / 2.0,
            radius + LINE_WIDTH / 2.0,
            colors::faded(colors::SHIELD, pulse),
            options.circle_segments,
        ));
    }
}
