//! Asteroid Drift entry point
//!
//! In the browser (`trunk serve`) this hands off to `platform::web`. Natively
//! it runs a headless session on a simulated 60 Hz clock with a scripted
//! pilot, then logs a summary and persists the high score.
//!
//! Usage: `asteroid-drift [tuning.json]`

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    asteroid_drift::platform::web::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Drift (native, headless) starting...");

    if let Err(e) = headless::run(std::env::args().nth(1)) {
        log::error!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use asteroid_drift::audio::{SoundEffect, SoundLog};
    use asteroid_drift::highscores::HighScores;
    use asteroid_drift::persistence::FileStore;
    use asteroid_drift::platform::FrameClock;
    use asteroid_drift::sim::{Bounds, GamePhase, asteroid_census};
    use asteroid_drift::{Error, Game, Settings, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 3;
    /// Scripted pilot repeats every four seconds
    const PATTERN_FRAMES: u32 = 240;

    /// Keys the pilot holds on a given frame
    fn pilot_keys(frame: u32) -> &'static [&'static str] {
        match frame % PATTERN_FRAMES {
            0..40 => &["ArrowLeft", " "],
            40..70 => &["ArrowUp", " "],
            70..160 => &[" "],
            160..190 => &["d", " "],
            _ => &["w"],
        }
    }

    pub fn run(tuning_path: Option<String>) -> Result<(), Error> {
        let tuning = match tuning_path {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::load_from(&path)?
            }
            None => Tuning::default(),
        };

        let store = FileStore::open(std::env::temp_dir().join("asteroid-drift"))?;
        let settings = Settings::load(&store);
        log::info!("Quality preset: {}", settings.quality.as_str());
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut game = Game::new(
            seed,
            Bounds::default(),
            tuning,
            HighScores::new(store),
            SoundLog::default(),
        );
        game.apply_settings(&settings);

        let mut clock = FrameClock::new();
        let mut now = 1000.0;
        game.key_down(" ", now);

        let mut held: &[&str] = &[];
        let mut frames = 0;
        let mut simulated_ms = 0.0;
        while frames < MAX_FRAMES && game.state().session.phase != GamePhase::GameOver {
            let keys = pilot_keys(frames);
            for key in held.iter().filter(|k| !keys.contains(*k)) {
                game.key_up(key);
            }
            for key in keys.iter().filter(|k| !held.contains(*k)) {
                game.key_down(key, now);
            }
            held = keys;

            // Steps are per frame; elapsed time is only tallied for the summary
            simulated_ms += clock.tick(now);
            game.frame(now);
            frames += 1;
            now += FRAME_MS;
        }

        let session = &game.state().session;
        let sounds = game.audio();
        log::info!(
            "Finished after {} frames ({:.1}s simulated, {} fps): {:?}",
            frames,
            simulated_ms / 1000.0,
            clock.fps(),
            session.phase
        );
        log::info!(
            "Score {} | level {} | lives {} | best {}",
            session.score,
            session.level,
            session.lives,
            session.high_score
        );
        log::info!(
            "Shots {} | explosions {} | power-ups {}",
            sounds.count(SoundEffect::Shoot),
            sounds.count(SoundEffect::Explode),
            sounds.count(SoundEffect::PowerUp)
        );
        let [large, medium, small] = asteroid_census(game.state());
        log::debug!("Field left: {} large, {} medium, {} small", large, medium, small);
        Ok(())
    }
}
