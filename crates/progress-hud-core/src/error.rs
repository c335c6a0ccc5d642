//! Error types for the HUD core
//!
//! Only configuration loading can fail. Lookup misses are plain `Option`s and
//! stale timer callbacks are absorbed silently.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HudError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid HUD config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HudError>;
