//! Terminal presenter: turns HUD notifications into fade state and a feed

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use progress_hud_core::{Hud, HudId, Indicator, Phase, Presenter, Transition};

const FEED_LEN: usize = 8;

/// Where a bezel is in its appear/disappear animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Hidden,
    FadingIn,
    Visible,
    FadingOut,
}

/// Opacity of one HUD bezel, stepped once per frame
#[derive(Debug, Clone)]
pub struct FadeTransition {
    pub state: FadeState,
    pub opacity: f32,
    pub duration: Duration,
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self {
            state: FadeState::Hidden,
            opacity: 0.0,
            duration: Duration::from_millis(300),
        }
    }
}

impl FadeTransition {
    /// Begin the animation the core asked for. Unanimated transitions snap.
    pub fn start(&mut self, transition: Transition, animated: bool, duration: Duration) {
        self.duration = duration;
        match (transition, animated && !duration.is_zero()) {
            (Transition::In, true) => self.state = FadeState::FadingIn,
            (Transition::Out, true) => self.state = FadeState::FadingOut,
            (Transition::In, false) => {
                self.state = FadeState::Visible;
                self.opacity = 1.0;
            }
            (Transition::Out, false) => {
                self.state = FadeState::Hidden;
                self.opacity = 0.0;
            }
        }
    }

    /// Step towards the target opacity by `dt` worth of the animation
    pub fn update(&mut self, dt: Duration) {
        let delta = dt.as_secs_f32() / self.duration.as_secs_f32().max(f32::EPSILON);

        match self.state {
            FadeState::FadingIn => {
                self.opacity = (self.opacity + delta).min(1.0);
                if self.opacity >= 1.0 {
                    self.state = FadeState::Visible;
                }
            }
            FadeState::FadingOut => {
                self.opacity = (self.opacity - delta).max(0.0);
                if self.opacity <= 0.0 {
                    self.state = FadeState::Hidden;
                }
            }
            _ => {}
        }
    }

    pub fn alpha(&self) -> f32 {
        self.opacity
    }
}

/// Presenter shared by every HUD in the demo
#[derive(Default)]
pub struct TerminalPresenter {
    fades: RefCell<HashMap<HudId, FadeTransition>>,
    feed: RefCell<VecDeque<String>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the event feed
    pub fn note(&self, line: impl Into<String>) {
        let mut feed = self.feed.borrow_mut();
        feed.push_back(line.into());
        while feed.len() > FEED_LEN {
            feed.pop_front();
        }
    }

    pub fn feed(&self) -> Vec<String> {
        self.feed.borrow().iter().cloned().collect()
    }

    /// Current opacity of a HUD's bezel
    pub fn alpha(&self, id: HudId) -> f32 {
        self.fades.borrow().get(&id).map(FadeTransition::alpha).unwrap_or(0.0)
    }

    /// Advance every running fade
    pub fn update(&self, dt: Duration) {
        let mut fades = self.fades.borrow_mut();
        for fade in fades.values_mut() {
            fade.update(dt);
        }
        fades.retain(|_, fade| fade.state != FadeState::Hidden);
    }
}

impl Presenter for TerminalPresenter {
    fn phase_changed(&self, hud: &Hud, from: Phase, to: Phase) {
        self.note(format!("{}: {} -> {}", hud.id(), from.name(), to.name()));
    }

    fn transition(&self, hud: &Hud, transition: Transition, animated: bool, duration: Duration) {
        self.fades
            .borrow_mut()
            .entry(hud.id())
            .or_default()
            .start(transition, animated, duration);
    }

    fn indicator_changed(&self, hud: &Hud, indicator: &Indicator) {
        self.note(format!(
            "{}: indicator {:?} (gen {})",
            hud.id(),
            indicator.kind(),
            indicator.generation()
        ));
    }
}
