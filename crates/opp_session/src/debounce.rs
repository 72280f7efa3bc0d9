//! crates/opp_session/src/debounce.rs
//! Cancellable one-shot timer driven by an injected clock.
//!
//! There is no background thread: the host calls `fire_if_due` (through the
//! session's `poll`) and the pending handle fires at most once. Scheduling
//! again replaces the pending handle, so nothing can leak.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock; clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<Duration>>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// A scheduled firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: u64,
    pub due: Duration,
}

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerHandle>,
    next_id: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None, next_id: 0 }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm for `now + delay`, cancelling whatever was pending.
    pub fn schedule(&mut self, now: Duration) -> TimerHandle {
        if let Some(old) = self.pending.take() {
            tracing::trace!(id = old.id, "debounce restarted");
        }
        self.next_id += 1;
        let handle = TimerHandle { id: self.next_id, due: now + self.delay };
        tracing::trace!(id = handle.id, due_ms = handle.due.as_millis() as u64, "debounce armed");
        self.pending = Some(handle);
        handle
    }

    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }

    #[inline]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Consume the pending handle if it is due.
    pub fn fire_if_due(&mut self, now: Duration) -> Option<TimerHandle> {
        match self.pending {
            Some(h) if now >= h.due => self.pending.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let clock = ManualClock::new();
        let mut d = Debouncer::new(Duration::from_millis(500));
        let h = d.schedule(clock.now());
        clock.advance_ms(499);
        assert_eq!(d.fire_if_due(clock.now()), None);
        clock.advance_ms(1);
        assert_eq!(d.fire_if_due(clock.now()), Some(h));
        assert_eq!(d.fire_if_due(clock.now()), None);
    }

    #[test]
    fn reschedule_replaces_pending() {
        let clock = ManualClock::new();
        let mut d = Debouncer::new(Duration::from_millis(500));
        let first = d.schedule(clock.now());
        clock.advance_ms(300);
        let second = d.schedule(clock.now());
        assert_ne!(first.id, second.id);
        clock.advance_ms(300);
        assert_eq!(d.fire_if_due(clock.now()), None);
        clock.advance_ms(200);
        assert_eq!(d.fire_if_due(clock.now()), Some(second));
        assert!(d.cancel().is_none());
    }
}
