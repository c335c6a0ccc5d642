//! Outstanding timer bookkeeping

use crate::scheduler::{Scheduler, TimerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Grace,
    MinShow,
    DelayedHide,
    Fade,
}

/// At most one live token per kind
#[derive(Debug, Default)]
pub(crate) struct TimerSlots {
    grace: Option<TimerToken>,
    min_show: Option<TimerToken>,
    delayed_hide: Option<TimerToken>,
    fade: Option<TimerToken>,
}

impl TimerSlots {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<TimerToken> {
        match kind {
            TimerKind::Grace => &mut self.grace,
            TimerKind::MinShow => &mut self.min_show,
            TimerKind::DelayedHide => &mut self.delayed_hide,
            TimerKind::Fade => &mut self.fade,
        }
    }

    /// Store `token`, cancelling any timer of the same kind it replaces
    pub(crate) fn arm(&mut self, kind: TimerKind, token: TimerToken, scheduler: &dyn Scheduler) {
        if let Some(old) = self.slot(kind).replace(token) {
            scheduler.cancel(old);
        }
    }

    /// Forget the token of a timer that just fired
    pub(crate) fn clear(&mut self, kind: TimerKind) {
        self.slot(kind).take();
    }

    /// Cancel the pending timer of `kind`, if any
    pub(crate) fn cancel(&mut self, kind: TimerKind, scheduler: &dyn Scheduler) -> bool {
        match self.slot(kind).take() {
            Some(token) => {
                scheduler.cancel(token);
                tracing::trace!(?kind, timer = token.id(), "cancelled timer");
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Grace => self.grace.is_some(),
            TimerKind::MinShow => self.min_show.is_some(),
            TimerKind::DelayedHide => self.delayed_hide.is_some(),
            TimerKind::Fade => self.fade.is_some(),
        }
    }
}
