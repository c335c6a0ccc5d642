//! Progress HUD terminal demo
//!
//! Controls:
//! - s: Show a new HUD
//! - h: Hide the topmost HUD
//! - d: Hide the topmost HUD after 2 seconds
//! - m: Cycle the topmost HUD's mode
//! - p: Bump the topmost HUD's progress by 10%
//! - w: Start simulated background work
//! - v: Add a plain view to the container
//! - q / Esc: Quit
//!
//! Usage:
//!   hud-demo                          # Defaults
//!   hud-demo --grace-ms 300           # Delay before HUDs appear
//!   hud-demo --config hud.toml        # Load HUD settings from TOML

use clap::Parser;
use progress_hud_demo::cli::DemoArgs;

fn main() {
    let args = DemoArgs::parse();

    if let Err(e) = progress_hud_demo::run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
