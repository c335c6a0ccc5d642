//! Virtual-clock scheduler

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::{Scheduler, Task, TimerToken};

/// Stand-in for deadlines too far out to represent as an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline_after(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

struct ManualState {
    now: Instant,
    next_id: u64,
    /// Keyed by (deadline, schedule order) so equal deadlines fire FIFO
    queue: BTreeMap<(Instant, u64), Task>,
}

/// Scheduler whose clock only moves when [`ManualScheduler::advance`] is called
///
/// Suited to tests and to hosts that drive the HUD from their own frame loop.
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    /// Create a scheduler whose clock starts at the current instant
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a scheduler whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            state: RefCell::new(ManualState {
                now,
                next_id: 0,
                queue: BTreeMap::new(),
            }),
        }
    }

    /// Move the clock forward by `by`, firing every timer that falls due.
    ///
    /// Timers scheduled by a firing callback are honoured if their deadline
    /// lands inside the window. Returns the number of callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = deadline_after(self.state.borrow().now, by);
        let mut fired = 0;

        loop {
            // Release the borrow before running: tasks schedule and cancel.
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .queue
                    .keys()
                    .next()
                    .copied()
                    .filter(|(deadline, _)| *deadline <= target);
                due.and_then(|key| {
                    state.now = key.0;
                    state.queue.remove(&key)
                })
            };

            match next {
                Some(task) => {
                    task();
                    fired += 1;
                }
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }

    /// Number of timers still outstanding
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Time until the earliest outstanding timer
    pub fn next_due(&self) -> Option<Duration> {
        let state = self.state.borrow();
        state
            .queue
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_duration_since(state.now))
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.state.borrow().now
    }

    fn schedule(&self, delay: Duration, task: Task) -> TimerToken {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let deadline = deadline_after(state.now, delay);
        state.queue.insert((deadline, id), task);
        TimerToken(id)
    }

    fn cancel(&self, token: TimerToken) {
        self.state
            .borrow_mut()
            .queue
            .retain(|(_, id), _| *id != token.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fires_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b"), (10, "a2")] {
            let log = Rc::clone(&log);
            scheduler.schedule(
                Duration::from_millis(delay),
                Box::new(move || log.borrow_mut().push(tag)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 3);
        assert_eq!(*log.borrow(), vec!["a", "a2", "b"]);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.next_due(), Some(Duration::from_millis(5)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);

        let token = scheduler.schedule(Duration::from_secs(1), Box::new(move || flag.set(true)));
        scheduler.cancel(token);
        scheduler.cancel(token);

        assert_eq!(scheduler.advance(Duration::from_secs(2)), 0);
        assert!(!fired.get());
    }

    #[test]
    fn test_clock_tracks_firing_time() {
        let start = Instant::now();
        let scheduler = Rc::new(ManualScheduler::starting_at(start));
        let seen = Rc::new(Cell::new(None));

        let inner = Rc::clone(&scheduler);
        let slot = Rc::clone(&seen);
        scheduler.schedule(
            Duration::from_millis(40),
            Box::new(move || slot.set(Some(inner.now()))),
        );

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(seen.get(), Some(start + Duration::from_millis(40)));
        assert_eq!(scheduler.now(), start + Duration::from_millis(100));
    }

    #[test]
    fn test_nested_schedule_within_window() {
        let scheduler = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));

        let outer = Rc::clone(&scheduler);
        let c = Rc::clone(&count);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                c.set(c.get() + 1);
                let c2 = Rc::clone(&c);
                outer.schedule(Duration::from_millis(10), Box::new(move || c2.set(c2.get() + 1)));
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(20)), 2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_huge_delay_does_not_overflow() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);

        scheduler.schedule(Duration::MAX, Box::new(move || flag.set(true)));
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.advance(Duration::from_secs(86400)), 0);
        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_huge_advance_does_not_overflow() {
        let scheduler = ManualScheduler::new();
        let start = scheduler.now();
        scheduler.schedule(Duration::from_secs(1), Box::new(|| {}));

        assert_eq!(scheduler.advance(Duration::MAX), 1);
        assert!(scheduler.now() > start);
    }
}
