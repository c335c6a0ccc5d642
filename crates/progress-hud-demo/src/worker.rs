//! Simulated background work
//!
//! Runs as an ordinary `Send` task and only talks to the HUD through its
//! progress channel.

use std::time::Duration;

use progress_hud_core::{HudMode, ProgressSender};

/// Pause on the finished checkmark before hiding
pub const FINISH_PAUSE: Duration = Duration::from_millis(800);

pub async fn simulate(tx: ProgressSender, steps: u32, step: Duration) {
    tracing::info!(steps, ?step, "background work started");

    for done in 1..=steps {
        tokio::time::sleep(step).await;
        if !tx.progress(done as f32 / steps as f32) {
            tracing::warn!("progress receiver gone, abandoning work");
            return;
        }
        tx.details(format!("{} of {}", done, steps));
    }

    tx.label("Done");
    tx.details("");
    tx.mode(HudMode::CustomContent);
    tokio::time::sleep(FINISH_PAUSE).await;
    tx.hide(true);

    tracing::info!("background work finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_hud_core::{progress_channel, Container, Hud, ManualScheduler};
    use std::rc::Rc;

    #[tokio::test(start_paused = true)]
    async fn test_reports_every_step() {
        let (tx, mut rx) = progress_channel();
        tokio::spawn(simulate(tx, 4, Duration::from_millis(10)))
            .await
            .unwrap();

        let container = Container::new("root");
        let hud = Hud::new(&container, Rc::new(ManualScheduler::new()));
        // 4 x (progress + details) + label + details + mode + hide
        assert_eq!(rx.drain(&hud), 12);
        assert_eq!(hud.progress(), 1.0);
        assert_eq!(hud.label(), "Done");
        assert_eq!(hud.mode(), HudMode::CustomContent);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = progress_channel();
        drop(rx);
        simulate(tx, 100, Duration::from_millis(10)).await;
    }
}
