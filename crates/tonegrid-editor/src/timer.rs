//! Cancellable timers driven by host-supplied instants.
//!
//! Nothing here sleeps or spawns. The host passes `now` into every call and
//! polls with [`Timer::fire`] from its event loop, so all timer state stays
//! owned by the component that scheduled it.

use std::time::{Duration, Instant};

/// A one-shot deadline that can be reset or cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to fire `after` from `now`, replacing any pending deadline.
    pub fn start(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Disarms the timer. Returns true if it was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true once when the deadline has passed, disarming the timer.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A timer with a fixed window that restarts on every call to [`Debouncer::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    timer: Timer,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            timer: Timer::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// (Re)starts the window at `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.timer.start(now, self.window);
    }

    pub fn cancel(&mut self) -> bool {
        self.timer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Returns true once when the window has elapsed without a reschedule.
    pub fn fire(&mut self, now: Instant) -> bool {
        self.timer.fire(now)
    }
}
