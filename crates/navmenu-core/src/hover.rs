#![forbid(unsafe_code)]

//! Hover intent debouncing.
//!
//! Raw pointer enter/leave events over the menu region are not acted on
//! immediately: each schedules an intent in a single latest-wins slot, so
//! rapid traversal across adjacent triggers never flickers panels
//! open/closed. The controller polls the debouncer and, on a settled
//! Leave, arms the separate close-delay timer; a settled Enter cancels
//! any pending close.

use std::time::{Duration, Instant};

use crate::timer::TimerSlot;

/// A settled hover intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverIntent {
    /// Pointer settled inside the menu region.
    Enter,
    /// Pointer settled outside the menu region.
    Leave,
}

/// Debounces pointer enter/leave into settled [`HoverIntent`]s.
///
/// One slot, latest-wins: an enter arriving while a leave is pending
/// replaces it (and vice versa), so only the final movement in a rapid
/// burst settles.
#[derive(Debug, Clone, Default)]
pub struct HoverDebouncer {
    slot: TimerSlot<HoverIntent>,
}

impl HoverDebouncer {
    /// Create an idle debouncer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: TimerSlot::new(),
        }
    }

    /// Record a raw pointer-enter, settling after `window`.
    pub fn pointer_enter(&mut self, now: Instant, window: Duration) {
        self.slot.schedule_after(now, window, HoverIntent::Enter);
    }

    /// Record a raw pointer-leave, settling after `window`.
    pub fn pointer_leave(&mut self, now: Instant, window: Duration) {
        self.slot.schedule_after(now, window, HoverIntent::Leave);
    }

    /// Yield the settled intent once its debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<HoverIntent> {
        self.slot.fire(now)
    }

    /// Drop any pending intent.
    pub fn cancel(&mut self) {
        self.slot.cancel();
    }

    /// Whether an intent is still debouncing.
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.slot.armed()
    }
}
