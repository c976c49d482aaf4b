//! Persisted best score
//!
//! A single integer under one storage key. Read once at startup, written only
//! when a run ends.

use crate::persistence::{KeyValueStore, MemoryStore};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "asteroids_highscore";

/// Read/write access to the persisted best score
pub trait HighScoreStore {
    /// Best score so far, 0 if nothing valid is stored
    fn high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64);
}

/// Parse a stored value; anything malformed counts as no score
pub fn parse_high_score(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// High score kept in a key-value backend
///
/// Storage failures are logged and swallowed so a broken backend never
/// interrupts play.
#[derive(Debug, Clone, Default)]
pub struct HighScores<K> {
    store: K,
}

impl<K: KeyValueStore> HighScores<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> K {
        self.store
    }
}

impl HighScores<MemoryStore> {
    /// Unpersisted scores for tests and headless runs
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<K: KeyValueStore> HighScoreStore for HighScores<K> {
    fn high_score(&self) -> u64 {
        match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => {
                let score = parse_high_score(&raw);
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to read high score: {}", e);
                0
            }
        }
    }

    fn set_high_score(&mut self, score: u64) {
        match self.store.set(STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("High score saved ({})", score),
            Err(e) => log::warn!("Failed to save high score: {}", e),
        }
    }
}
