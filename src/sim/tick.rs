//! Per-frame simulation step
//!
//! [`tick`] runs eight phases in a fixed order: ship control, power-up
//! expiry, firing, entity integration, bullet hits, ship hits, pickups and the
//! level-clear check. `now` is sampled once per frame by the caller and every
//! timer in the step compares against that single value.

use glam::Vec2;
use rand::Rng;

use super::collision::{first_hit, overlaps, overlaps_scaled};
use super::entity::{Asteroid, Bullet, ParticleTint, PowerUpKind, Ship, SizeClass};
use super::spawn::{create_asteroid, create_explosion, populate_field, spawn_power_up};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{
    BULLET_INHERIT, DEBRIS_PARTICLES, SHIP_DEBRIS_PARTICLES, SMALL_DEBRIS_PARTICLES,
};
use crate::heading;

/// Held controls for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Start a run from the title screen
///
/// Ignored unless the session has not started yet.
pub fn start_game(state: &mut GameState, now: f64) -> bool {
    if state.session.phase != GamePhase::NotStarted {
        return false;
    }
    begin_run(state, now);
    log::info!("Game started (seed {})", state.seed);
    true
}

/// Start a new run after game over
///
/// Ignored unless the session is over.
pub fn restart_game(state: &mut GameState, now: f64) -> bool {
    if state.session.phase != GamePhase::GameOver {
        return false;
    }
    begin_run(state, now);
    log::info!("Game restarted");
    true
}

/// Reset score/level/lives and lay out the first level
fn begin_run(state: &mut GameState, now: f64) {
    state.session.score = 0;
    state.session.level = 1;
    state.session.lives = state.tuning.starting_lives;
    state.session.phase = GamePhase::Playing;

    respawn_ship(state, now);
    populate_field(state);
    state.bullets.clear();
    state.particles.clear();
    state.power_ups.clear();
}

/// Replace the ship with a fresh one at screen center
fn respawn_ship(state: &mut GameState, now: f64) {
    let id = state.next_entity_id();
    state.ship = Ship::new(
        id,
        state.spawn_point(),
        state.tuning.ship_radius,
        now + state.tuning.invulnerability_ms,
    );
}

/// Advance the game state by one display frame
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    // Don't tick on the title screen or after game over
    if !state.session.is_playing() {
        return;
    }

    update_ship(state, input);
    expire_power_up(state, now);
    fire(state, input, now);
    integrate(state, now);
    resolve_bullet_hits(state, now);
    if resolve_ship_hit(state, now) {
        // Ship hit ends the step
        return;
    }
    collect_power_ups(state, now);
    check_level_clear(state, now);
}

/// Phase 1: rotation, thrust, drag, movement, wrap
fn update_ship(state: &mut GameState, input: &TickInput) {
    let rot = state.tuning.ship_rotation_speed;
    let ship = &mut state.ship;

    ship.rotation = 0.0;
    if input.rotate_left {
        ship.rotation -= rot;
    }
    if input.rotate_right {
        ship.rotation += rot;
    }
    ship.angle += ship.rotation;

    ship.thrusting = input.thrust;
    if ship.thrusting {
        ship.vel += heading(ship.angle) * state.tuning.ship_thrust;
    }

    // Drag applies every frame regardless of input
    ship.vel *= state.tuning.friction;
    ship.pos = state.bounds.wrap(ship.pos + ship.vel);

    // Engine rumble is rate-limited by a coin flip
    if input.thrust && state.rng.random_bool(0.5) {
        state.push_event(GameEvent::Thrust);
    }
}

/// Phase 2: drop the power-up once its time is up
fn expire_power_up(state: &mut GameState, now: f64) {
    let ship = &mut state.ship;
    if let Some(kind) = ship.power_up {
        if now > ship.power_up_expires_at {
            ship.power_up = None;
            log::debug!("Power-up {:?} expired", kind);
        }
    }
}

/// Phase 3: spawn bullets when the trigger is held and the gun is ready
fn fire(state: &mut GameState, input: &TickInput, now: f64) {
    if !input.fire {
        return;
    }
    let fire_rate = state.tuning.fire_rate(state.ship.power_up);
    if now - state.ship.last_shot_at <= fire_rate {
        return;
    }

    let spread = state.tuning.spread_angle;
    let offsets = match state.ship.power_up {
        Some(PowerUpKind::SpreadShot) => vec![0.0, spread, -spread],
        _ => vec![0.0],
    };

    let origin = state.ship.nose();
    let drift = state.ship.vel * BULLET_INHERIT;
    for offset in offsets {
        let angle = state.ship.angle + offset;
        let bullet = Bullet {
            id: state.next_entity_id(),
            pos: origin,
            vel: heading(angle) * state.tuning.bullet_speed + drift,
            radius: state.tuning.bullet_radius,
            angle,
            created_at: now,
            lifespan: state.tuning.bullet_lifespan_ms,
        };
        state.bullets.push(bullet);
    }

    state.ship.last_shot_at = now;
    state.push_event(GameEvent::Shoot);
}

/// Phase 4: move everything, wrap, age out bullets and particles
fn integrate(state: &mut GameState, now: f64) {
    let bounds = state.bounds;

    state.bullets.retain(|b| !b.is_expired(now));
    for bullet in &mut state.bullets {
        bullet.pos = bounds.wrap(bullet.pos + bullet.vel);
    }

    for asteroid in &mut state.asteroids {
        asteroid.pos = bounds.wrap_with_margin(asteroid.pos + asteroid.vel, asteroid.radius);
        asteroid.angle += asteroid.rotation_speed;
    }

    for power_up in &mut state.power_ups {
        power_up.pos = bounds.wrap(power_up.pos + power_up.vel);
    }

    // Particles never wrap, they fade out first
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life -= particle.decay;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Phase 5: each bullet destroys at most the first asteroid it overlaps
fn resolve_bullet_hits(state: &mut GameState, now: f64) {
    let mut i = 0;
    while i < state.bullets.len() {
        let Some(j) = first_hit(&state.bullets[i], &state.asteroids) else {
            i += 1;
            continue;
        };
        // swap_remove pulls the last bullet into slot i, which is examined next
        state.bullets.swap_remove(i);
        let asteroid = state.asteroids.swap_remove(j);
        destroy_asteroid(state, asteroid, now);
    }
}

/// Score, debris, fragments or a power-up roll for a destroyed asteroid
fn destroy_asteroid(state: &mut GameState, asteroid: Asteroid, now: f64) {
    state.session.score += state.tuning.points(asteroid.size);
    state.push_event(GameEvent::Explode);
    create_explosion(state, asteroid.pos, ParticleTint::Asteroid, DEBRIS_PARTICLES);

    match asteroid.size.split() {
        Some(child) => {
            let level = state.session.level;
            for _ in 0..2 {
                let fragment = create_asteroid(state, asteroid.pos, child, level);
                state.asteroids.push(fragment);
            }
        }
        None => {
            create_explosion(state, asteroid.pos, ParticleTint::Asteroid, SMALL_DEBRIS_PARTICLES);
            spawn_power_up(state, asteroid.pos, now);
        }
    }
    log::trace!(
        "{:?} asteroid {} destroyed, score {}",
        asteroid.size,
        asteroid.id,
        state.session.score
    );
}

/// Phase 6: ship against asteroids
///
/// Returns true when the ship was hit; the rest of the step is skipped.
fn resolve_ship_hit(state: &mut GameState, now: f64) -> bool {
    if state.ship.is_invulnerable(now) || state.ship.shield_active() {
        return false;
    }
    let scale = state.tuning.ship_hitbox_scale;
    let hit = state
        .asteroids
        .iter()
        .any(|a| overlaps_scaled(&state.ship, a, scale));
    if !hit {
        return false;
    }

    state.push_event(GameEvent::Explode);
    let wreck = state.ship.pos;
    create_explosion(state, wreck, ParticleTint::Ship, SHIP_DEBRIS_PARTICLES);

    state.session.lives = state.session.lives.saturating_sub(1);
    if state.session.lives == 0 {
        let session = &mut state.session;
        session.high_score = session.high_score.max(session.score);
        session.phase = GamePhase::GameOver;
        let (score, high_score) = (session.score, session.high_score);
        state.push_event(GameEvent::GameOver { score, high_score });
        log::info!("Game over: score {} (best {})", score, high_score);
    } else {
        let lives_left = state.session.lives;
        state.push_event(GameEvent::LifeLost { lives_left });
        // Same level: asteroid field stays, shots and drops are cleared
        respawn_ship(state, now);
        state.bullets.clear();
        state.power_ups.clear();
        log::info!("Ship destroyed, {} lives left", lives_left);
    }
    true
}

/// Phase 7: ship against power-up drops
fn collect_power_ups(state: &mut GameState, now: f64) {
    let mut i = 0;
    while i < state.power_ups.len() {
        if !overlaps(&state.ship, &state.power_ups[i]) {
            i += 1;
            continue;
        }
        let drop = state.power_ups.swap_remove(i);
        state.ship.power_up = Some(drop.kind);
        state.ship.power_up_expires_at = now + state.tuning.power_up_duration_ms;
        state.session.score += state.tuning.power_up_bonus;
        state.push_event(GameEvent::PowerUp(drop.kind));
        log::debug!("Picked up {:?}", drop.kind);
    }
}

/// Phase 8: empty field advances the level
fn check_level_clear(state: &mut GameState, now: f64) {
    if !state.asteroids.is_empty() {
        return;
    }
    state.session.level += 1;
    let level = state.session.level;

    populate_field(state);
    state.bullets.clear();
    state.power_ups.clear();

    // Ship keeps its power-up and facing, but restarts from center
    state.ship.pos = state.spawn_point();
    state.ship.vel = Vec2::ZERO;
    state.ship.invulnerable_until = now + state.tuning.invulnerability_ms;

    state.push_event(GameEvent::LevelCleared { level });
    log::info!("Level {} ({} asteroids)", level, state.asteroids.len());
}

/// Count live asteroids by size class (for logging and tests)
pub fn asteroid_census(state: &GameState) -> [usize; 3] {
    let mut counts = [0; 3];
    for a in &state.asteroids {
        let slot = match a.size {
            SizeClass::Large => 0,
            SizeClass::Medium => 1,
            SizeClass::Small => 2,
        };
        counts[slot] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::PowerUpDrop;
    use crate::sim::Bounds;
    use crate::tuning::Tuning;

    const T0: f64 = 100_000.0;

    /// Started game with an empty field and a vulnerable, parked ship
    fn playing() -> GameState {
        let mut state = GameState::new(12345, Bounds::new(800.0, 600.0), Tuning::default());
        assert!(start_game(&mut state, T0));
        state.asteroids.clear();
        state.ship.invulnerable_until = 0.0;
        state.drain_events();
        state
    }

    fn rock(state: &mut GameState, x: f32, y: f32, size: SizeClass) -> Asteroid {
        let radius = state.tuning.asteroid_radius(size);
        Asteroid {
            id: state.next_entity_id(),
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            size,
            rotation_speed: 0.0,
            outline: vec![1.0; 8],
        }
    }

    fn shot(state: &mut GameState, x: f32, y: f32, created_at: f64) -> Bullet {
        Bullet {
            id: state.next_entity_id(),
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 2.0,
            angle: 0.0,
            created_at,
            lifespan: 1500.0,
        }
    }

    fn drop_at(state: &mut GameState, pos: Vec2, kind: PowerUpKind) -> PowerUpDrop {
        PowerUpDrop {
            id: state.next_entity_id(),
            kind,
            pos,
            vel: Vec2::ZERO,
            radius: 15.0,
            angle: 0.0,
            created_at: T0,
        }
    }

    /// Far corner rock that keeps the level from clearing
    fn anchor(state: &mut GameState) {
        let a = rock(state, 60.0, 60.0, SizeClass::Large);
        state.asteroids.push(a);
    }

    #[test]
    fn test_start_lays_out_first_level() {
        let mut state = GameState::new(1, Bounds::new(800.0, 600.0), Tuning::default());
        tick(&mut state, &TickInput::default(), T0);
        assert_eq!(state.session.phase, GamePhase::NotStarted);

        assert!(start_game(&mut state, T0));
        assert_eq!(state.session.phase, GamePhase::Playing);
        assert_eq!(state.asteroids.len(), 4);
        assert_eq!(state.session.lives, 3);
        assert!(state.ship.is_invulnerable(T0 + 2999.0));
        assert!(!start_game(&mut state, T0), "start while playing is ignored");
        assert!(!restart_game(&mut state, T0), "restart while playing is ignored");
    }

    #[test]
    fn test_ship_rotation_thrust_and_drag() {
        let mut state = playing();
        anchor(&mut state);
        let start = state.ship.pos;
        let input = TickInput {
            rotate_right: true,
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &input, T0 + 16.0);
        let angle = -std::f32::consts::FRAC_PI_2 + 0.08;
        assert!((state.ship.angle - angle).abs() < 1e-6);
        let expected_vel = heading(angle) * 0.15 * 0.98;
        assert!((state.ship.vel - expected_vel).length() < 1e-6);
        assert!((state.ship.pos - (start + expected_vel)).length() < 1e-4);

        // Coasting just decays
        tick(&mut state, &TickInput::default(), T0 + 32.0);
        assert!((state.ship.vel - expected_vel * 0.98).length() < 1e-6);
        assert!((state.ship.angle - angle).abs() < 1e-6);
    }

    #[test]
    fn test_ship_wraps_with_zero_margin() {
        let mut state = playing();
        anchor(&mut state);
        state.ship.pos = Vec2::new(799.5, 300.0);
        state.ship.vel = Vec2::new(5.0, 0.0);
        tick(&mut state, &TickInput::default(), T0);
        assert!(state.bounds.contains(state.ship.pos));
        assert!(state.ship.pos.x < 10.0);
    }

    #[test]
    fn test_entities_stay_inside_wrap_bands() {
        let mut state = GameState::new(777, Bounds::new(640.0, 480.0), Tuning::default());
        start_game(&mut state, T0);
        state.ship.invulnerable_until = f64::MAX;
        let input = TickInput {
            rotate_left: true,
            thrust: true,
            fire: true,
            ..Default::default()
        };
        for frame in 0..600 {
            let now = T0 + frame as f64 * 16.0;
            let settled: Vec<u32> = state.asteroids.iter().map(|a| a.id).collect();
            tick(&mut state, &input, now);
            assert!(state.bounds.contains(state.ship.pos));
            for b in &state.bullets {
                assert!(state.bounds.contains(b.pos));
            }
            for p in &state.power_ups {
                assert!(state.bounds.contains(p.pos));
            }
            // Fresh fragments sit at their parent's position until the next step
            for a in state.asteroids.iter().filter(|a| settled.contains(&a.id)) {
                let r = a.radius + 1e-3;
                assert!(a.pos.x >= -r && a.pos.x < 640.0 + r);
                assert!(a.pos.y >= -r && a.pos.y < 480.0 + r);
            }
        }
    }

    #[test]
    fn test_fire_rate_gating() {
        let mut state = playing();
        anchor(&mut state);
        state.ship.pos = Vec2::new(700.0, 500.0);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, T0);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::Shoot));

        // Exactly the fire rate later is still too soon (strictly greater required)
        tick(&mut state, &input, T0 + 250.0);
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &input, T0 + 251.0);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_rapid_fire_shortens_cooldown() {
        let mut state = playing();
        anchor(&mut state);
        state.ship.pos = Vec2::new(700.0, 500.0);
        state.ship.power_up = Some(PowerUpKind::RapidFire);
        state.ship.power_up_expires_at = T0 + 10_000.0;
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, T0);
        tick(&mut state, &input, T0 + 101.0);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_spread_shot_fires_three() {
        let mut state = playing();
        anchor(&mut state);
        state.ship.pos = Vec2::new(700.0, 500.0);
        state.ship.vel = Vec2::new(1.0, 0.0);
        state.ship.power_up = Some(PowerUpKind::SpreadShot);
        state.ship.power_up_expires_at = T0 + 10_000.0;
        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
            T0,
        );
        assert_eq!(state.bullets.len(), 3);
        let facing = state.ship.angle;
        let mut offsets: Vec<f32> = state.bullets.iter().map(|b| b.angle - facing).collect();
        offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((offsets[0] + 0.2).abs() < 1e-5);
        assert!(offsets[1].abs() < 1e-5);
        assert!((offsets[2] - 0.2).abs() < 1e-5);
        // Half the ship's drift is inherited
        let straight = state.bullets.iter().find(|b| (b.angle - facing).abs() < 1e-5).unwrap();
        let expected = heading(facing) * 7.0 + state.ship.vel * 0.5;
        assert!((straight.vel - expected).length() < 1e-3);
    }

    #[test]
    fn test_bullet_lifespan() {
        let mut state = playing();
        anchor(&mut state);
        let b = shot(&mut state, 400.0, 100.0, T0);
        state.bullets.push(b);
        tick(&mut state, &TickInput::default(), T0 + 1499.0);
        assert_eq!(state.bullets.len(), 1);
        tick(&mut state, &TickInput::default(), T0 + 1500.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_large_splits_into_two_mediums_at_its_position() {
        let mut state = playing();
        anchor(&mut state);
        let target = rock(&mut state, 300.0, 450.0, SizeClass::Large);
        let target_id = target.id;
        state.asteroids.push(target);
        let b = shot(&mut state, 300.0, 450.0, T0);
        state.bullets.push(b);

        tick(&mut state, &TickInput::default(), T0);

        assert!(state.bullets.is_empty());
        assert!(!state.asteroids.iter().any(|a| a.id == target_id));
        let mediums: Vec<_> = state
            .asteroids
            .iter()
            .filter(|a| a.size == SizeClass::Medium)
            .collect();
        assert_eq!(mediums.len(), 2);
        for m in mediums {
            assert_eq!(m.pos, Vec2::new(300.0, 450.0));
            assert_eq!(m.radius, 25.0);
        }
        assert_eq!(state.session.score, 20);
    }

    #[test]
    fn test_medium_splits_and_small_vanishes() {
        let mut state = playing();
        anchor(&mut state);
        let m = rock(&mut state, 200.0, 450.0, SizeClass::Medium);
        let s = rock(&mut state, 600.0, 450.0, SizeClass::Small);
        state.asteroids.push(m);
        state.asteroids.push(s);
        let b1 = shot(&mut state, 200.0, 450.0, T0);
        let b2 = shot(&mut state, 600.0, 450.0, T0);
        state.bullets.push(b1);
        state.bullets.push(b2);

        tick(&mut state, &TickInput::default(), T0);

        // Anchor plus two smalls from the medium
        assert_eq!(asteroid_census(&state), [1, 0, 2]);
        assert!(
            state
                .asteroids
                .iter()
                .filter(|a| a.size == SizeClass::Small)
                .all(|a| a.pos == Vec2::new(200.0, 450.0))
        );
    }

    #[test]
    fn test_score_for_one_of_each_size() {
        let mut state = playing();
        anchor(&mut state);
        for (x, size) in [
            (200.0, SizeClass::Large),
            (400.0, SizeClass::Medium),
            (600.0, SizeClass::Small),
        ] {
            let a = rock(&mut state, x, 480.0, size);
            state.asteroids.push(a);
            let b = shot(&mut state, x, 480.0, T0);
            state.bullets.push(b);
        }
        tick(&mut state, &TickInput::default(), T0);
        assert_eq!(state.session.score, 170);
    }

    #[test]
    fn test_small_kill_drops_power_up() {
        let mut state = playing();
        anchor(&mut state);
        state.tuning.power_up_drop_chance = 1.0;
        let s = rock(&mut state, 600.0, 450.0, SizeClass::Small);
        state.asteroids.push(s);
        let b = shot(&mut state, 600.0, 450.0, T0);
        state.bullets.push(b);

        tick(&mut state, &TickInput::default(), T0);

        assert_eq!(state.power_ups.len(), 1);
        let drop = &state.power_ups[0];
        assert_eq!(drop.pos, Vec2::new(600.0, 450.0));
        assert_eq!(drop.created_at, T0);
        assert!((drop.vel.length() - state.tuning.power_up_speed).abs() < 1e-5);
    }

    #[test]
    fn test_larger_kills_never_drop() {
        let mut state = playing();
        anchor(&mut state);
        state.tuning.power_up_drop_chance = 1.0;
        for (x, size) in [(200.0, SizeClass::Large), (600.0, SizeClass::Medium)] {
            let a = rock(&mut state, x, 450.0, size);
            state.asteroids.push(a);
            let b = shot(&mut state, x, 450.0, T0);
            state.bullets.push(b);
        }

        tick(&mut state, &TickInput::default(), T0);

        assert_eq!(asteroid_census(&state), [1, 2, 2]);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_pickup_each_kind() {
        for kind in PowerUpKind::ALL {
            let mut state = playing();
            anchor(&mut state);
            let center = state.ship.pos;
            let bonus = drop_at(&mut state, center, kind);
            state.power_ups.push(bonus);

            tick(&mut state, &TickInput::default(), T0);

            assert_eq!(state.ship.power_up, Some(kind));
            assert_eq!(state.ship.power_up_expires_at, T0 + 10_000.0);
            assert_eq!(state.session.score, 500);
            assert!(state.power_ups.is_empty());
            assert!(state.drain_events().contains(&GameEvent::PowerUp(kind)));
        }
    }

    #[test]
    fn test_one_bullet_destroys_at_most_one_asteroid() {
        let mut state = playing();
        let a = rock(&mut state, 300.0, 450.0, SizeClass::Small);
        let b = rock(&mut state, 305.0, 450.0, SizeClass::Small);
        state.asteroids.push(a);
        state.asteroids.push(b);
        let bullet = shot(&mut state, 302.0, 450.0, T0);
        state.bullets.push(bullet);

        tick(&mut state, &TickInput::default(), T0);

        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.session.score, 100);
        assert_eq!(state.session.level, 1);
    }

    #[test]
    fn test_invulnerable_ship_ignores_overlap() {
        let mut state = playing();
        let center = state.ship.pos;
        let a = rock(&mut state, center.x, center.y, SizeClass::Large);
        state.asteroids.push(a);
        state.ship.invulnerable_until = T0 + 3000.0;

        tick(&mut state, &TickInput::default(), T0 + 2999.0);
        assert_eq!(state.session.lives, 3);

        tick(&mut state, &TickInput::default(), T0 + 3000.0);
        assert_eq!(state.session.lives, 2);
        // Field preserved, fresh ship with a new window
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.ship.is_invulnerable(T0 + 3001.0));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LifeLost { lives_left: 2 })
        );
    }

    #[test]
    fn test_forgiving_hitbox() {
        let mut state = playing();
        let center = state.ship.pos;
        // Full radii overlap (20 + 45 = 65 > 60) but scaled ones do not (52 < 60)
        let a = rock(&mut state, center.x + 60.0, center.y, SizeClass::Large);
        state.asteroids.push(a);
        tick(&mut state, &TickInput::default(), T0);
        assert_eq!(state.session.lives, 3);
    }

    #[test]
    fn test_shield_blocks_damage_until_expiry() {
        let mut state = playing();
        anchor(&mut state);
        let center = state.ship.pos;
        let shield = drop_at(&mut state, center, PowerUpKind::Shield);
        state.power_ups.push(shield);

        tick(&mut state, &TickInput::default(), T0);
        assert!(state.ship.shield_active());
        assert_eq!(state.session.score, 500);
        assert!(state.power_ups.is_empty());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUp(PowerUpKind::Shield))
        );
        let expires = state.ship.power_up_expires_at;
        assert_eq!(expires, T0 + 10_000.0);

        let a = rock(&mut state, center.x, center.y, SizeClass::Medium);
        state.asteroids.push(a);
        tick(&mut state, &TickInput::default(), T0 + 5000.0);
        tick(&mut state, &TickInput::default(), expires);
        assert_eq!(state.session.lives, 3);
        assert!(state.ship.shield_active());

        tick(&mut state, &TickInput::default(), expires + 1.0);
        assert_eq!(state.session.lives, 2);
        assert!(!state.ship.shield_active());
    }

    #[test]
    fn test_ship_hit_ends_the_step() {
        let mut state = playing();
        state.session.lives = 2;
        let center = state.ship.pos;
        let a = rock(&mut state, center.x, center.y, SizeClass::Large);
        state.asteroids.push(a);
        let bonus = drop_at(&mut state, center, PowerUpKind::RapidFire);
        state.power_ups.push(bonus);

        tick(&mut state, &TickInput::default(), T0);

        assert_eq!(state.session.lives, 1);
        assert_eq!(state.session.score, 0, "pickup must not run after a hit");
        assert_eq!(state.ship.power_up, None);
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut state = playing();
        state.session.lives = 1;
        state.session.score = 1234;
        state.session.high_score = 1000;
        let center = state.ship.pos;
        let a = rock(&mut state, center.x, center.y, SizeClass::Small);
        state.asteroids.push(a);

        tick(&mut state, &TickInput::default(), T0);

        assert!(state.session.is_game_over());
        assert_eq!(state.session.lives, 0);
        assert_eq!(state.session.high_score, 1234);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 1234,
            high_score: 1234
        }));

        // Frozen until restart
        let score = state.session.score;
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, T0 + 1000.0);
        assert_eq!(state.session.score, score);
        assert!(state.bullets.is_empty());
        assert!(!start_game(&mut state, T0 + 1000.0));

        assert!(restart_game(&mut state, T0 + 2000.0));
        assert_eq!(state.session.phase, GamePhase::Playing);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.level, 1);
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.session.high_score, 1234);
        assert_eq!(asteroid_census(&state), [4, 0, 0]);
    }

    #[test]
    fn test_high_score_kept_when_not_beaten() {
        let mut state = playing();
        state.session.lives = 1;
        state.session.score = 100;
        state.session.high_score = 5000;
        let center = state.ship.pos;
        let a = rock(&mut state, center.x, center.y, SizeClass::Small);
        state.asteroids.push(a);
        tick(&mut state, &TickInput::default(), T0);
        assert!(state.session.is_game_over());
        assert_eq!(state.session.high_score, 5000);
    }

    #[test]
    fn test_level_clear_repopulates_and_keeps_power_up() {
        let mut state = playing();
        state.session.level = 2;
        state.ship.power_up = Some(PowerUpKind::SpreadShot);
        state.ship.power_up_expires_at = T0 + 10_000.0;
        state.ship.pos = Vec2::new(100.0, 100.0);
        state.ship.vel = Vec2::new(1.0, 1.0);
        let a = rock(&mut state, 650.0, 500.0, SizeClass::Small);
        state.asteroids.push(a);
        let b = shot(&mut state, 650.0, 500.0, T0);
        state.bullets.push(b);
        let stray = shot(&mut state, 10.0, 590.0, T0);
        state.bullets.push(stray);
        let d = drop_at(&mut state, Vec2::new(700.0, 60.0), PowerUpKind::Shield);
        state.power_ups.push(d);

        tick(&mut state, &TickInput::default(), T0);

        assert_eq!(state.session.level, 3);
        assert_eq!(asteroid_census(&state), [6, 0, 0]);
        assert!(state.bullets.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.ship.pos, state.bounds.center());
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.power_up, Some(PowerUpKind::SpreadShot));
        assert!(state.ship.is_invulnerable(T0 + 2999.0));
        let center = state.bounds.center();
        assert!(state.asteroids.iter().all(|a| a.pos.distance(center) >= 200.0));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LevelCleared { level: 3 })
        );
    }

    #[test]
    fn test_particles_fade_and_never_collide() {
        let mut state = playing();
        anchor(&mut state);
        create_explosion(&mut state, Vec2::new(400.0, 300.0), ParticleTint::Ship, 10);
        // Longest life is 1 / 0.02 = 50 frames
        for frame in 0..51 {
            tick(&mut state, &TickInput::default(), T0 + frame as f64);
        }
        assert!(state.particles.is_empty());
        assert_eq!(state.session.lives, 3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut state = GameState::new(seed, Bounds::new(800.0, 600.0), Tuning::default());
            start_game(&mut state, T0);
            let input = TickInput {
                rotate_left: true,
                thrust: true,
                fire: true,
                ..Default::default()
            };
            for frame in 0..300 {
                tick(&mut state, &input, T0 + frame as f64 * 16.0);
            }
            (
                state.session.clone(),
                state.asteroids.iter().map(|a| a.pos).collect::<Vec<_>>(),
            )
        };
        assert_eq!(run(99), run(99));
    }
}
