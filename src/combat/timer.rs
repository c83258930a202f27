//! Gameplay timers. Both are driven by explicit `Instant`s passed in from the
//! frame loop, so tests can simulate arbitrary stretches of wall-clock time.

use std::time::{Duration, Instant};

/// Fixed-interval poll timer, the `setInterval` of the battle loop.
///
/// Late polls do not burst: a poll that is several intervals overdue fires
/// once and the next due time skips ahead to the first one after `now`.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    /// Arm the timer; the first fire is one interval after `now`.
    /// Restarting an armed timer is a no-op.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// True if the timer was due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_due else { return false };
        if now < due {
            return false;
        }
        while due <= now {
            due += self.interval;
        }
        self.next_due = Some(due);
        true
    }
}

/// One-shot deadline (`setTimeout`).
#[derive(Clone, Debug, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn arm(&mut self, at: Instant) {
        self.at = Some(at);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// True exactly once, on the first call at or after the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.at {
            Some(at) if now >= at => {
                self.at = None;
                true
            }
            _ => false,
        }
    }
}
