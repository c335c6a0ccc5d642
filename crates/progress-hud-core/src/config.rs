//! HUD configuration
//!
//! Defaults applied to every HUD a [`HudRegistry`](crate::HudRegistry)
//! creates. Loadable from TOML:
//!
//! ```toml
//! grace_time_ms = 150
//! min_show_time_ms = 800
//! animation = "zoom"
//! mode = "determinate"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HudError, Result};
use crate::hud::{AnimationType, BackgroundStyle, Hud};
use crate::mode::HudMode;

/// Default duration of animated show/hide transitions
pub const DEFAULT_ANIMATION_MS: u64 = 300;

/// Default bezel margin
pub const DEFAULT_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Delay before a requested show becomes visible; 0 disables
    pub grace_time_ms: u64,
    /// Lower bound on visible duration; 0 disables
    pub min_show_time_ms: u64,
    /// Length of animated hide transitions
    pub animation_ms: u64,
    pub animation: AnimationType,
    pub background: BackgroundStyle,
    pub mode: HudMode,
    pub margin: f32,
    pub square: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            grace_time_ms: 0,
            min_show_time_ms: 0,
            animation_ms: DEFAULT_ANIMATION_MS,
            animation: AnimationType::default(),
            background: BackgroundStyle::default(),
            mode: HudMode::default(),
            margin: DEFAULT_MARGIN,
            square: false,
        }
    }
}

impl HudConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HudError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded HUD config");
        Ok(config)
    }

    pub fn grace_time(&self) -> Option<Duration> {
        non_zero_ms(self.grace_time_ms)
    }

    pub fn min_show_time(&self) -> Option<Duration> {
        non_zero_ms(self.min_show_time_ms)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// Copy these settings onto `hud`
    pub fn apply(&self, hud: &Hud) {
        hud.set_grace_time(self.grace_time());
        hud.set_min_show_time(self.min_show_time());
        hud.set_animation_duration(self.animation_duration());
        hud.set_animation(self.animation);
        hud.set_background(self.background);
        hud.set_mode(self.mode);
        hud.update_layout(|layout| {
            layout.margin = self.margin;
            layout.square = self.square;
        });
    }
}

fn non_zero_ms(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_disable_timing_windows() {
        let config = HudConfig::default();
        assert_eq!(config.grace_time(), None);
        assert_eq!(config.min_show_time(), None);
        assert_eq!(config.animation_duration(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HudConfig::from_toml_str(
            r#"
            grace_time_ms = 150
            mode = "annular_determinate"
            animation = "zoom_in"
            "#,
        )
        .unwrap();

        assert_eq!(config.grace_time(), Some(Duration::from_millis(150)));
        assert_eq!(config.mode, HudMode::AnnularDeterminate);
        assert_eq!(config.animation, AnimationType::ZoomIn);
        assert_eq!(config.margin, DEFAULT_MARGIN);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = HudConfig::from_toml_str("mode = \"sparkles\"").unwrap_err();
        assert!(matches!(err, HudError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_show_time_ms = 500\nsquare = true").unwrap();

        let config = HudConfig::load(file.path()).unwrap();
        assert_eq!(config.min_show_time(), Some(Duration::from_millis(500)));
        assert!(config.square);
    }

    #[test]
    fn test_load_missing_file() {
        let err = HudConfig::load("/nonexistent/hud.toml").unwrap_err();
        assert!(matches!(err, HudError::Io { .. }));
    }
}
