//! progress-hud-demo: terminal front end for the progress HUD
//!
//! Draws a container, its children and every on-screen HUD bezel with
//! crossterm. All HUD work happens on one thread inside a tokio `LocalSet`;
//! simulated background work runs as a regular task and reports through a
//! progress channel.

pub mod cli;
pub mod handlers;
mod logging;
pub mod presenter;
pub mod state;
mod terminal;
pub mod ui;
pub mod worker;

use std::io;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use progress_hud_core::{HudConfig, TokioScheduler};
use tokio::task::LocalSet;
use tokio::time::{Instant, MissedTickBehavior};

use cli::DemoArgs;
use handlers::handle_key;
use state::DemoState;
use terminal::TerminalGuard;

const MIN_TICK: Duration = Duration::from_millis(10);

/// Run the demo until the user quits
pub fn run(args: DemoArgs) -> Result<()> {
    logging::init_logging(&args.log_file)?;

    let config = args.hud_config()?;
    let tick_rate = Duration::from_millis(args.tick_ms).max(MIN_TICK);
    tracing::info!(?config, ?tick_rate, "starting demo");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let local = LocalSet::new();
    local.block_on(&runtime, run_app(config, tick_rate))
}

async fn run_app(config: HudConfig, tick_rate: Duration) -> Result<()> {
    let mut state = DemoState::new(Rc::new(TokioScheduler::new()), config);

    let _terminal = TerminalGuard::enter().context("entering raw mode")?;
    let mut stdout = io::stdout();
    let mut events = EventStream::new();

    let mut ticker = tokio::time::interval(tick_rate);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                state.on_tick(now - last_tick);
                last_tick = now;
                ui::render(&mut stdout, &state).context("drawing frame")?;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if !handle_key(key, &mut state) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("reading terminal events"),
                None => break,
            },
        }
    }

    tracing::info!("demo exiting");
    Ok(())
}
