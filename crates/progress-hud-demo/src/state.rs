//! Application state for the HUD demo

use std::rc::Rc;
use std::time::Duration;

use progress_hud_core::{
    progress_channel, Container, CustomView, Hud, HudConfig, HudMode, HudRegistry, Scheduler,
};

use crate::presenter::TerminalPresenter;
use crate::worker;

/// Glyph displayed in custom-content mode
#[derive(Debug)]
pub struct CustomGlyph(pub &'static str);

pub fn checkmark() -> CustomView {
    Rc::new(CustomGlyph("✔"))
}

/// Demo application state
pub struct DemoState {
    /// Current tick
    pub tick: u64,
    /// The host surface HUDs are attached to
    pub container: Container,
    pub registry: HudRegistry,
    pub presenter: Rc<TerminalPresenter>,
    /// Status message
    pub status_message: Option<String>,
    views_added: usize,
}

impl DemoState {
    pub fn new(scheduler: Rc<dyn Scheduler>, config: HudConfig) -> Self {
        let presenter = Rc::new(TerminalPresenter::new());
        let registry =
            HudRegistry::with_config(scheduler, config).with_presenter(presenter.clone());
        let container = Container::new("main");
        container.add_view("background");

        Self {
            tick: 0,
            container,
            registry,
            presenter,
            status_message: Some("Press s to show a HUD".to_string()),
            views_added: 0,
        }
    }

    pub fn topmost(&self) -> Option<Hud> {
        HudRegistry::find_hud(&self.container)
    }

    /// Show a new HUD on top of the container
    pub fn show(&mut self) -> Hud {
        let hud = self.registry.show_hud(&self.container, true);
        hud.set_label("Loading");

        let presenter = Rc::clone(&self.presenter);
        hud.set_delegate(move |hud: &Hud| presenter.note(format!("{}: was hidden", hud.id())));

        self.status_message = Some(format!("{} requested", hud.id()));
        hud
    }

    pub fn hide(&mut self) {
        if self.registry.hide_hud(&self.container, true) {
            self.status_message = Some("Hide requested".to_string());
        } else {
            self.status_message = Some("No HUD to hide".to_string());
        }
    }

    pub fn hide_later(&mut self, delay: Duration) {
        match self.topmost() {
            Some(hud) => {
                hud.set_remove_from_host_on_hide(true);
                hud.hide_after_delay(true, delay);
                self.status_message = Some(format!("{} hides in {:?}", hud.id(), delay));
            }
            None => self.status_message = Some("No HUD to hide".to_string()),
        }
    }

    pub fn cycle_mode(&mut self) {
        let Some(hud) = self.topmost() else {
            self.status_message = Some("No HUD".to_string());
            return;
        };

        let next = hud.mode().next();
        if next == HudMode::CustomContent {
            hud.set_custom_view(Some(checkmark()));
        }
        hud.set_mode(next);
        self.status_message = Some(format!("{} mode", next.name()));
    }

    /// Add 10% to the topmost HUD's progress. Not clamped.
    pub fn bump_progress(&mut self) {
        if let Some(hud) = self.topmost() {
            let progress = hud.progress() + 0.1;
            hud.set_progress(progress);
            self.status_message = Some(format!("Progress {:.0}%", progress * 100.0));
        }
    }

    pub fn add_view(&mut self) {
        self.views_added += 1;
        self.container.add_view(format!("view-{}", self.views_added));
    }

    /// Show a determinate HUD driven by a background worker.
    ///
    /// Must run inside a `LocalSet`.
    pub fn start_work(&mut self, steps: u32, step: Duration) -> Hud {
        let hud = self.show();
        hud.set_mode(HudMode::Determinate);
        hud.set_label("Working");
        hud.set_custom_view(Some(checkmark()));

        let (tx, rx) = progress_channel();
        tokio::task::spawn_local(rx.forward(hud.clone()));
        tokio::spawn(worker::simulate(tx, steps, step));

        self.status_message = Some(format!("{} working", hud.id()));
        hud
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.tick = self.tick.wrapping_add(1);
        self.presenter.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_hud_core::{IndicatorKind, ManualScheduler, Phase, TokioScheduler};
    use tokio::task::LocalSet;

    fn state() -> (Rc<ManualScheduler>, DemoState) {
        let scheduler = Rc::new(ManualScheduler::new());
        let state = DemoState::new(scheduler.clone(), HudConfig::default());
        (scheduler, state)
    }

    #[test]
    fn test_show_and_hide() {
        let (scheduler, mut state) = state();
        let hud = state.show();
        assert_eq!(hud.phase(), Phase::Visible);
        assert_eq!(state.topmost(), Some(hud.clone()));

        state.hide();
        scheduler.advance(Duration::from_secs(1));
        assert_eq!(hud.phase(), Phase::Hidden);
        assert!(state.topmost().is_none());
        assert!(state.presenter.feed().iter().any(|line| line.ends_with("was hidden")));
    }

    #[test]
    fn test_hide_without_hud() {
        let (_, mut state) = state();
        state.hide();
        assert_eq!(state.status_message.as_deref(), Some("No HUD to hide"));
    }

    #[test]
    fn test_cycle_into_custom_content() {
        let (_, mut state) = state();
        let hud = state.show();
        for _ in 0..4 {
            state.cycle_mode();
        }

        assert_eq!(hud.mode(), HudMode::CustomContent);
        assert_eq!(hud.indicator().kind(), IndicatorKind::CustomContent);

        state.cycle_mode();
        assert_eq!(hud.indicator().kind(), IndicatorKind::None);
        assert!(hud.custom_view().is_none());
    }

    #[test]
    fn test_delayed_hide() {
        let (scheduler, mut state) = state();
        let hud = state.show();
        state.hide_later(Duration::from_secs(2));

        scheduler.advance(Duration::from_millis(1999));
        assert_eq!(hud.phase(), Phase::Visible);

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(hud.phase(), Phase::Hidden);
        assert!(state.container.huds().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_work_hides_hud() {
        let local = LocalSet::new();
        local
            .run_until(async {
                let mut state =
                    DemoState::new(Rc::new(TokioScheduler::new()), HudConfig::default());
                let hud = state.start_work(5, Duration::from_millis(50));
                assert_eq!(hud.mode(), HudMode::Determinate);

                tokio::time::sleep(Duration::from_millis(260)).await;
                assert_eq!(hud.progress(), 1.0);

                tokio::time::sleep(Duration::from_secs(3)).await;
                assert_eq!(hud.phase(), Phase::Hidden);
                assert_eq!(hud.label(), "Done");
                assert!(state.topmost().is_none());
            })
            .await;
    }
}
