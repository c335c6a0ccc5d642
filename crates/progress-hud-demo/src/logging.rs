//! Logging setup
//!
//! The UI owns the terminal, so log output goes to a file. Filter with
//! `RUST_LOG`; defaults to `info` plus HUD transitions at `debug`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,progress_hud_core=debug,progress_hud_demo=debug";

/// Install a global subscriber writing to `path` (truncated on start)
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {}", e))?;

    tracing::info!(log = %path.display(), "logging initialised");
    Ok(())
}
