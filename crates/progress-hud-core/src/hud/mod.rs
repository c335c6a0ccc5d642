//! The HUD visibility state machine
//!
//! A [`Hud`] decides, for every show or hide request, whether to act now or
//! defer through one of its timing windows:
//!
//! - grace time: delay before a requested show becomes visible
//! - minimum show time: lower bound on how long a shown HUD stays up
//! - delayed hide: a single replaceable hide timer
//!
//! `Hud` is `!Send`. Every mutation happens on the thread that owns it; work
//! running elsewhere reports back through a [`ProgressSender`](crate::ProgressSender).

mod observer;
mod phase;
mod style;
mod timers;


pub use observer::{HudDelegate, Presenter};
pub use phase::{Phase, Transition};
pub use style::{AnimationType, BackgroundStyle, Layout};

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use phase::Stage;
use timers::{TimerKind, TimerSlots};

use crate::config::DEFAULT_ANIMATION_MS;
use crate::container::{Container, WeakContainer};
use crate::indicator::{select_indicator, CustomView, Indicator, IndicatorKind};
use crate::mode::HudMode;
use crate::scheduler::Scheduler;

static NEXT_HUD_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique HUD identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HudId(u64);

impl fmt::Display for HudId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hud-{}", self.0)
    }
}

struct HudInner {
    id: HudId,
    stage: Stage,
    mode: HudMode,
    indicator: Indicator,
    custom_view: Option<CustomView>,
    progress: f32,

    grace_time: Option<Duration>,
    min_show_time: Option<Duration>,
    animation_duration: Duration,

    /// Animation flag of the latest explicit show/hide, reused by timers
    use_animation: bool,
    /// Set by a hide request; gates late grace and fade callbacks
    finished: bool,
    show_started_at: Option<Instant>,
    remove_from_host_on_hide: bool,
    timers: TimerSlots,

    label: String,
    details: String,
    button_title: String,
    animation: AnimationType,
    background: BackgroundStyle,
    layout: Layout,

    container: WeakContainer,
    scheduler: Rc<dyn Scheduler>,
    delegate: Option<Rc<dyn HudDelegate>>,
    presenter: Option<Rc<dyn Presenter>>,
}

impl HudInner {
    fn cancel_timer(&mut self, kind: TimerKind) -> bool {
        self.timers.cancel(kind, self.scheduler.as_ref())
    }

    fn refresh_indicator(&mut self) -> bool {
        let change = select_indicator(&self.indicator, self.mode, self.custom_view.as_ref());
        self.indicator.apply(change, self.custom_view.as_ref())
    }
}

/// Handle to a HUD instance. Clones share the same HUD.
#[derive(Clone)]
pub struct Hud {
    inner: Rc<RefCell<HudInner>>,
}

#[derive(Clone)]
pub(crate) struct WeakHud(Weak<RefCell<HudInner>>);

impl WeakHud {
    pub(crate) fn upgrade(&self) -> Option<Hud> {
        self.0.upgrade().map(|inner| Hud { inner })
    }
}

/// Plain-data view of a HUD for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub id: HudId,
    pub phase: Phase,
    pub mode: HudMode,
    pub indicator: IndicatorKind,
    pub annular: bool,
    pub progress: f32,
    pub label: String,
    pub details: String,
    pub button_title: String,
    pub animation: AnimationType,
    pub background: BackgroundStyle,
    pub layout: Layout,
    pub has_custom_view: bool,
}

impl Hud {
    /// Create a hidden HUD for `container`. It is not attached yet.
    pub fn new(container: &Container, scheduler: Rc<dyn Scheduler>) -> Self {
        let id = HudId(NEXT_HUD_ID.fetch_add(1, Ordering::Relaxed));
        let mode = HudMode::default();

        tracing::trace!(hud = %id, container = %container.id(), "created HUD");

        Self {
            inner: Rc::new(RefCell::new(HudInner {
                id,
                stage: Stage::Hidden,
                mode,
                indicator: Indicator::new(mode),
                custom_view: None,
                progress: 0.0,
                grace_time: None,
                min_show_time: None,
                animation_duration: Duration::from_millis(DEFAULT_ANIMATION_MS),
                use_animation: false,
                finished: false,
                show_started_at: None,
                remove_from_host_on_hide: false,
                timers: TimerSlots::default(),
                label: String::new(),
                details: String::new(),
                button_title: String::new(),
                animation: AnimationType::default(),
                background: BackgroundStyle::default(),
                layout: Layout::default(),
                container: container.downgrade(),
                scheduler,
                delegate: None,
                presenter: None,
            })),
        }
    }

    pub fn id(&self) -> HudId {
        self.inner.borrow().id
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().stage.phase()
    }

    /// Whether both handles refer to the same HUD
    pub fn ptr_eq(&self, other: &Hud) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakHud {
        WeakHud(Rc::downgrade(&self.inner))
    }

    /// The container this HUD belongs to, if it still exists
    pub fn container(&self) -> Option<Container> {
        self.inner.borrow().container.upgrade()
    }

    pub(crate) fn set_container(&self, container: WeakContainer) {
        self.inner.borrow_mut().container = container;
    }

    // Show & hide

    /// Request the HUD to appear.
    ///
    /// With a grace time the HUD only becomes visible once the grace timer
    /// fires without an intervening hide.
    pub fn show(&self, animated: bool) {
        let (stage, grace) = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_timer(TimerKind::MinShow);
            inner.use_animation = animated;
            inner.finished = false;
            (inner.stage, inner.grace_time.filter(|g| !g.is_zero()))
        };

        match stage {
            Stage::Visible | Stage::Grace => {
                tracing::trace!(hud = %self.id(), "show while already showing");
            }
            Stage::MinShow => {
                // Hide was only being held back; the original show time stands.
                self.enter(Stage::Visible);
            }
            Stage::FadingOut => {
                self.inner.borrow_mut().cancel_timer(TimerKind::Fade);
                self.show_using_animation(animated);
            }
            Stage::Hidden => match grace {
                Some(grace) => {
                    self.arm(TimerKind::Grace, grace, Hud::handle_grace_timer);
                    self.enter(Stage::Grace);
                }
                None => self.show_using_animation(animated),
            },
        }
    }

    /// Request the HUD to disappear.
    ///
    /// Cancels any delayed hide. A minimum show time may keep the HUD up a
    /// little longer; the delegate is told once the hide completes.
    pub fn hide(&self, animated: bool) {
        self.inner.borrow_mut().cancel_timer(TimerKind::DelayedHide);
        self.request_hide(animated);
    }

    /// Hide after `delay`, replacing any previously scheduled delayed hide
    pub fn hide_after_delay(&self, animated: bool, delay: Duration) {
        tracing::debug!(hud = %self.id(), ?delay, animated, "scheduling delayed hide");
        self.arm(TimerKind::DelayedHide, delay, move |hud: &Hud| {
            hud.inner.borrow_mut().timers.clear(TimerKind::DelayedHide);
            hud.request_hide(animated);
        });
    }

    fn request_hide(&self, animated: bool) {
        let (stage, remaining) = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_timer(TimerKind::Grace);
            inner.use_animation = animated;
            inner.finished = true;

            let remaining = match (inner.min_show_time, inner.show_started_at) {
                (Some(min), Some(started)) => {
                    let elapsed = inner.scheduler.now().saturating_duration_since(started);
                    min.checked_sub(elapsed).filter(|left| !left.is_zero())
                }
                _ => None,
            };
            (inner.stage, remaining)
        };

        match stage {
            Stage::Hidden => self.detach_if_requested(),
            // Never made it on screen: nothing to animate.
            Stage::Grace => self.finish_hide(),
            Stage::MinShow | Stage::FadingOut => {
                tracing::trace!(hud = %self.id(), "hide already in progress");
            }
            Stage::Visible => match remaining {
                Some(remaining) => {
                    self.arm(TimerKind::MinShow, remaining, Hud::handle_min_show_timer);
                    self.enter(Stage::MinShow);
                }
                None => self.hide_using_animation(animated),
            },
        }
    }

    fn show_using_animation(&self, animated: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            let now = inner.scheduler.now();
            inner.show_started_at = Some(now);
        }
        self.enter(Stage::Visible);
        self.notify_transition(Transition::In, animated);
    }

    fn hide_using_animation(&self, animated: bool) {
        let duration = {
            let mut inner = self.inner.borrow_mut();
            inner.show_started_at = None;
            inner.animation_duration
        };

        if animated && !duration.is_zero() {
            self.arm(TimerKind::Fade, duration, Hud::handle_fade_timer);
            self.enter(Stage::FadingOut);
            self.notify_transition(Transition::Out, true);
        } else {
            self.notify_transition(Transition::Out, false);
            self.finish_hide();
        }
    }

    fn finish_hide(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.show_started_at = None;
            inner.cancel_timer(TimerKind::MinShow);
            inner.cancel_timer(TimerKind::Fade);
        }
        self.enter(Stage::Hidden);
        self.done();
    }

    fn done(&self) {
        let delegate = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_timer(TimerKind::DelayedHide);
            inner.delegate.clone()
        };

        self.detach_if_requested();
        tracing::debug!(hud = %self.id(), "hide completed");

        if let Some(delegate) = delegate {
            delegate.hud_was_hidden(self);
        }
    }

    fn detach_if_requested(&self) {
        let container = {
            let inner = self.inner.borrow();
            if !inner.remove_from_host_on_hide {
                return;
            }
            inner.container.upgrade()
        };

        if let Some(container) = container {
            if container.detach(self) {
                tracing::debug!(
                    hud = %self.id(),
                    container = %container.id(),
                    "detached from container"
                );
            }
        }
    }

    // Timer callbacks

    fn handle_grace_timer(&self) {
        let (ready, animated) = {
            let mut inner = self.inner.borrow_mut();
            inner.timers.clear(TimerKind::Grace);
            (inner.stage == Stage::Grace && !inner.finished, inner.use_animation)
        };

        if ready {
            self.show_using_animation(animated);
        } else {
            tracing::trace!(hud = %self.id(), "stale grace timer ignored");
        }
    }

    fn handle_min_show_timer(&self) {
        let (ready, animated) = {
            let mut inner = self.inner.borrow_mut();
            inner.timers.clear(TimerKind::MinShow);
            (inner.stage == Stage::MinShow, inner.use_animation)
        };

        if ready {
            self.hide_using_animation(animated);
        } else {
            tracing::trace!(hud = %self.id(), "stale minimum show timer ignored");
        }
    }

    fn handle_fade_timer(&self) {
        let ready = {
            let mut inner = self.inner.borrow_mut();
            inner.timers.clear(TimerKind::Fade);
            inner.stage == Stage::FadingOut && inner.finished
        };

        if ready {
            self.finish_hide();
        } else {
            tracing::trace!(hud = %self.id(), "stale fade timer ignored");
        }
    }

    fn arm<F>(&self, kind: TimerKind, delay: Duration, fire: F)
    where
        F: FnOnce(&Hud) + 'static,
    {
        let weak = self.downgrade();
        let mut inner = self.inner.borrow_mut();
        let scheduler = Rc::clone(&inner.scheduler);
        let token = scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(hud) = weak.upgrade() {
                    fire(&hud);
                }
            }),
        );
        inner.timers.arm(kind, token, scheduler.as_ref());
        tracing::trace!(hud = %inner.id, ?kind, ?delay, timer = token.id(), "armed timer");
    }

    #[cfg(test)]
    fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.inner.borrow().timers.is_armed(kind)
    }

    // Notifications

    fn presenter(&self) -> Option<Rc<dyn Presenter>> {
        self.inner.borrow().presenter.clone()
    }

    fn enter(&self, stage: Stage) {
        let (from, id) = {
            let mut inner = self.inner.borrow_mut();
            let from = inner.stage.phase();
            inner.stage = stage;
            (from, inner.id)
        };

        let to = stage.phase();
        if from == to {
            return;
        }

        tracing::debug!(hud = %id, from = from.name(), to = to.name(), "phase changed");
        if let Some(presenter) = self.presenter() {
            presenter.phase_changed(self, from, to);
        }
    }

    fn notify_transition(&self, transition: Transition, animated: bool) {
        let duration = self.inner.borrow().animation_duration;
        if let Some(presenter) = self.presenter() {
            presenter.transition(self, transition, animated, duration);
        }
    }

    fn notify_indicator(&self) {
        let indicator = self.indicator();
        tracing::debug!(
            hud = %self.id(),
            kind = ?indicator.kind(),
            annular = indicator.is_annular(),
            generation = indicator.generation(),
            "indicator updated"
        );
        if let Some(presenter) = self.presenter() {
            presenter.indicator_changed(self, &indicator);
        }
    }

    fn notify_content(&self) {
        if let Some(presenter) = self.presenter() {
            presenter.content_changed(self);
        }
    }

    // Mode & indicator

    pub fn mode(&self) -> HudMode {
        self.inner.borrow().mode
    }

    /// Switch display mode. Only swaps the indicator when its kind changes.
    pub fn set_mode(&self, mode: HudMode) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            if inner.mode == mode {
                return;
            }
            if inner.mode == HudMode::CustomContent {
                inner.custom_view = None;
            }
            inner.mode = mode;
            inner.refresh_indicator()
        };

        if changed {
            self.notify_indicator();
        }
    }

    pub fn indicator(&self) -> Indicator {
        self.inner.borrow().indicator.clone()
    }

    pub fn custom_view(&self) -> Option<CustomView> {
        self.inner.borrow().custom_view.clone()
    }

    /// View shown in [`HudMode::CustomContent`]
    pub fn set_custom_view(&self, view: Option<CustomView>) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            inner.custom_view = view;
            inner.mode == HudMode::CustomContent && inner.refresh_indicator()
        };

        if changed {
            self.notify_indicator();
        }
    }

    // Progress

    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress
    }

    /// Store a progress value. Out-of-range values are kept as written.
    pub fn set_progress(&self, progress: f32) {
        let determinate = {
            let mut inner = self.inner.borrow_mut();
            inner.progress = progress;
            inner.mode.is_determinate()
        };

        if determinate {
            if let Some(presenter) = self.presenter() {
                presenter.progress_changed(self, progress);
            }
        }
    }

    // Timing policy

    pub fn grace_time(&self) -> Option<Duration> {
        self.inner.borrow().grace_time
    }

    pub fn set_grace_time(&self, grace_time: Option<Duration>) {
        self.inner.borrow_mut().grace_time = grace_time;
    }

    pub fn min_show_time(&self) -> Option<Duration> {
        self.inner.borrow().min_show_time
    }

    pub fn set_min_show_time(&self, min_show_time: Option<Duration>) {
        self.inner.borrow_mut().min_show_time = min_show_time;
    }

    pub fn animation_duration(&self) -> Duration {
        self.inner.borrow().animation_duration
    }

    pub fn set_animation_duration(&self, duration: Duration) {
        self.inner.borrow_mut().animation_duration = duration;
    }

    /// Animation flag captured at the latest show/hide call
    pub fn use_animation(&self) -> bool {
        self.inner.borrow().use_animation
    }

    /// When the HUD last became visible; cleared once hiding begins
    pub fn show_started_at(&self) -> Option<Instant> {
        self.inner.borrow().show_started_at
    }

    pub fn remove_from_host_on_hide(&self) -> bool {
        self.inner.borrow().remove_from_host_on_hide
    }

    pub fn set_remove_from_host_on_hide(&self, remove: bool) {
        self.inner.borrow_mut().remove_from_host_on_hide = remove;
    }

    // Content & appearance

    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    pub fn set_label(&self, text: impl Into<String>) {
        self.inner.borrow_mut().label = text.into();
        self.notify_content();
    }

    pub fn details(&self) -> String {
        self.inner.borrow().details.clone()
    }

    pub fn set_details(&self, text: impl Into<String>) {
        self.inner.borrow_mut().details = text.into();
        self.notify_content();
    }

    pub fn button_title(&self) -> String {
        self.inner.borrow().button_title.clone()
    }

    pub fn set_button_title(&self, text: impl Into<String>) {
        self.inner.borrow_mut().button_title = text.into();
        self.notify_content();
    }

    pub fn animation(&self) -> AnimationType {
        self.inner.borrow().animation
    }

    pub fn set_animation(&self, animation: AnimationType) {
        self.inner.borrow_mut().animation = animation;
    }

    pub fn background(&self) -> BackgroundStyle {
        self.inner.borrow().background
    }

    pub fn set_background(&self, background: BackgroundStyle) {
        self.inner.borrow_mut().background = background;
    }

    pub fn layout(&self) -> Layout {
        self.inner.borrow().layout
    }

    pub fn update_layout(&self, update: impl FnOnce(&mut Layout)) {
        update(&mut self.inner.borrow_mut().layout);
    }

    // Observers

    /// Observer told once per completed hide
    pub fn set_delegate<D>(&self, delegate: D)
    where
        D: HudDelegate + 'static,
    {
        self.inner.borrow_mut().delegate = Some(Rc::new(delegate));
    }

    pub fn clear_delegate(&self) {
        self.inner.borrow_mut().delegate = None;
    }

    pub fn set_presenter(&self, presenter: Rc<dyn Presenter>) {
        self.inner.borrow_mut().presenter = Some(presenter);
    }

    pub fn snapshot(&self) -> HudSnapshot {
        let inner = self.inner.borrow();
        HudSnapshot {
            id: inner.id,
            phase: inner.stage.phase(),
            mode: inner.mode,
            indicator: inner.indicator.kind(),
            annular: inner.indicator.is_annular(),
            progress: inner.progress,
            label: inner.label.clone(),
            details: inner.details.clone(),
            button_title: inner.button_title.clone(),
            animation: inner.animation,
            background: inner.background,
            layout: inner.layout,
            has_custom_view: inner.indicator.custom_view().is_some(),
        }
    }
}

impl PartialEq for Hud {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Hud")
            .field("id", &inner.id)
            .field("phase", &inner.stage.phase())
            .field("mode", &inner.mode)
            .field("progress", &inner.progress)
            .finish()
    }
}
