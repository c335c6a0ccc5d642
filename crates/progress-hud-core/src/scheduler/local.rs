//! Tokio-backed scheduler for a current-thread runtime

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use super::{Scheduler, Task, TimerToken};

/// Scheduler running each timer as a local task on the current `LocalSet`
///
/// Must be used from inside `LocalSet::run_until` / `LocalSet::block_on`;
/// the thread driving that set is the HUD control thread.
pub struct TokioScheduler {
    next_id: Cell<u64>,
    live: Rc<RefCell<HashMap<u64, JoinHandle<()>>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            live: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Number of timers still outstanding
    pub fn pending(&self) -> usize {
        self.live.borrow().len()
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerToken {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let live = Rc::clone(&self.live);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            live.borrow_mut().remove(&id);
            task();
        });

        self.live.borrow_mut().insert(id, handle);
        TimerToken(id)
    }

    fn cancel(&self, token: TimerToken) {
        if let Some(handle) = self.live.borrow_mut().remove(&token.0) {
            handle.abort();
            tracing::trace!(timer = token.0, "aborted timer task");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.live.borrow_mut().drain() {
            handle.abort();
        }
    }
}
