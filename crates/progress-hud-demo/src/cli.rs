//! Command-line arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use progress_hud_core::HudConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "hud-demo", version, about = "Terminal demo of the progress HUD")]
pub struct DemoArgs {
    /// HUD settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grace time before a HUD appears, in milliseconds
    #[arg(long)]
    pub grace_ms: Option<u64>,

    /// Minimum time a shown HUD stays up, in milliseconds
    #[arg(long)]
    pub min_show_ms: Option<u64>,

    /// Length of animated hides, in milliseconds
    #[arg(long)]
    pub animation_ms: Option<u64>,

    /// Frame interval, in milliseconds
    #[arg(long, default_value_t = 80)]
    pub tick_ms: u64,

    /// Where to write the log (the terminal is taken over by the UI)
    #[arg(long, default_value = "hud-demo.log")]
    pub log_file: PathBuf,
}

impl DemoArgs {
    /// Config file contents with command-line overrides applied
    pub fn hud_config(&self) -> Result<HudConfig> {
        let mut config = match &self.config {
            Some(path) => HudConfig::load(path)
                .with_context(|| format!("loading HUD config from {}", path.display()))?,
            None => HudConfig::default(),
        };

        if let Some(ms) = self.grace_ms {
            config.grace_time_ms = ms;
        }
        if let Some(ms) = self.min_show_ms {
            config.min_show_time_ms = ms;
        }
        if let Some(ms) = self.animation_ms {
            config.animation_ms = ms;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grace_time_ms = 100\nmin_show_time_ms = 900").unwrap();

        let args = DemoArgs::parse_from([
            "hud-demo",
            "--config",
            file.path().to_str().unwrap(),
            "--grace-ms",
            "250",
        ]);
        let config = args.hud_config().unwrap();

        assert_eq!(config.grace_time_ms, 250);
        assert_eq!(config.min_show_time_ms, 900);
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = DemoArgs::parse_from(["hud-demo"]);
        assert_eq!(args.hud_config().unwrap(), HudConfig::default());
        assert_eq!(args.tick_ms, 80);
    }

    #[test]
    fn test_missing_config_file() {
        let args = DemoArgs::parse_from(["hud-demo", "--config", "/nonexistent/hud.toml"]);
        let err = args.hud_config().unwrap_err();
        assert!(format!("{:#}", err).contains("loading HUD config"));
    }
}
