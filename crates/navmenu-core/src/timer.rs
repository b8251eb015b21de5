#![forbid(unsafe_code)]

//! Single-shot timer slots.
//!
//! Every deferred action in the system (hover debounce, close delay,
//! resize debounce, structural close, focus move) runs through a
//! [`TimerSlot`]: one armed deadline per category, where scheduling a new
//! deadline replaces the outstanding one (clear-then-set). The controller
//! pumps slots with an explicit `now`, so nothing here ever sleeps.
//!
//! # Invariants
//!
//! - At most one live deadline per slot.
//! - `fire` returns the payload at most once per scheduling, and only
//!   once `now` has reached the deadline. A timer never fires early.

use std::time::{Duration, Instant};

/// A single-shot timer holding at most one pending deadline and payload.
#[derive(Debug, Clone)]
pub struct TimerSlot<T> {
    pending: Option<(Instant, T)>,
}

impl<T> TimerSlot<T> {
    /// Create an empty (disarmed) slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the slot for `deadline`, replacing any outstanding deadline.
    pub fn schedule(&mut self, deadline: Instant, payload: T) {
        self.pending = Some((deadline, payload));
    }

    /// Arm the slot for `now + delay`, replacing any outstanding deadline.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, payload: T) {
        self.schedule(now + delay, payload);
    }

    /// Disarm the slot, dropping any pending payload.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a deadline is outstanding.
    #[must_use]
    pub const fn armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Fire the slot if its deadline has been reached, disarming it and
    /// yielding the payload. Returns `None` while disarmed or still
    /// pending.
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => {
                self.pending.take().map(|(_, payload)| payload)
            }
            _ => None,
        }
    }
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disarmed() {
        let mut slot: TimerSlot<u32> = TimerSlot::new();
        assert!(!slot.armed());
        assert_eq!(slot.fire(Instant::now()), None);
    }

    #[test]
    fn fires_at_deadline_not_before() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule_after(t0, Duration::from_millis(50), "x");

        assert_eq!(slot.fire(t0), None);
        assert_eq!(slot.fire(t0 + Duration::from_millis(49)), None);
        assert!(slot.armed());
        assert_eq!(slot.fire(t0 + Duration::from_millis(50)), Some("x"));
        assert!(!slot.armed());
    }

    #[test]
    fn fires_at_most_once() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule_after(t0, Duration::from_millis(10), ());

        let late = t0 + Duration::from_secs(1);
        assert_eq!(slot.fire(late), Some(()));
        assert_eq!(slot.fire(late), None);
    }

    #[test]
    fn reschedule_replaces_prior_deadline() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule_after(t0, Duration::from_millis(10), 1);
        slot.schedule_after(t0, Duration::from_millis(100), 2);

        // Old deadline no longer fires; only the replacement does.
        assert_eq!(slot.fire(t0 + Duration::from_millis(10)), None);
        assert_eq!(slot.fire(t0 + Duration::from_millis(100)), Some(2));
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule_after(t0, Duration::from_millis(10), ());
        slot.cancel();

        assert!(!slot.armed());
        assert_eq!(slot.fire(t0 + Duration::from_secs(1)), None);
    }

    #[test]
    fn zero_delay_fires_on_next_pump() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        slot.schedule_after(t0, Duration::ZERO, ());
        assert_eq!(slot.fire(t0), Some(()));
    }

    #[test]
    fn deadline_accessor() {
        let t0 = Instant::now();
        let mut slot = TimerSlot::new();
        assert_eq!(slot.deadline(), None);
        slot.schedule_after(t0, Duration::from_millis(5), ());
        assert_eq!(slot.deadline(), Some(t0 + Duration::from_millis(5)));
    }
}
