//! Timer scheduling for HUD timing windows
//!
//! The HUD never blocks. Every pending phase is a cancelable callback handed
//! to a [`Scheduler`] that re-enters the control thread once it falls due.

mod local;
mod manual;

pub use local::TokioScheduler;
pub use manual::ManualScheduler;

use std::time::{Duration, Instant};

/// Handle identifying one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub(crate) u64);

impl TimerToken {
    /// Raw identifier, unique per scheduler
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A deferred callback. Never `Send`: it always runs on the control thread.
pub type Task = Box<dyn FnOnce()>;

/// Cancelable one-shot timer facility
pub trait Scheduler {
    /// Current time as seen by this scheduler
    fn now(&self) -> Instant;

    /// Run `task` once after `delay`
    fn schedule(&self, delay: Duration, task: Task) -> TimerToken;

    /// Cancel a pending timer. Unknown or already fired tokens are ignored.
    fn cancel(&self, token: TimerToken);
}
