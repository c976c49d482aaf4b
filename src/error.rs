//! Error type for adapter-level loading and saving
//!
//! The simulation itself never fails; only storage, settings and tuning
//! loaders and the browser's GPU setup return these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(&'static str),

    #[error("graphics setup failed: {0}")]
    Graphics(String),
}

pub type Result<T> = std::result::Result<T, Error>;
