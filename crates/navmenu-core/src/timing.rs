#![forbid(unsafe_code)]

//! Timing configuration.
//!
//! All the delays the controller schedules come from one [`MenuTiming`]
//! value. The transition duration is normally read once at startup from
//! the styling layer (a CSS-style duration string such as `0.6s` or
//! `600ms`) so the structural close stays in sync with the visual
//! transition; a malformed or absent value falls back to the default
//! constant rather than failing.

use std::time::Duration;

/// Default visual transition duration (structural close window).
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(600);

/// Default delay between a settled pointer-leave and the hide request.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::ZERO;

/// Default hover intent debounce window.
pub const DEFAULT_HOVER_DEBOUNCE: Duration = Duration::from_millis(50);

/// Default resize debounce window.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Default delay before moving focus into a freshly opened panel.
pub const DEFAULT_OPEN_FOCUS_DELAY: Duration = Duration::from_millis(100);

/// Delays used by the menu controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTiming {
    /// Visual transition duration. A hidden dropdown stays tab-reachable
    /// for this long after the hide request (animated collapse window).
    pub transition: Duration,

    /// Delay between a settled pointer-leave and the hide request.
    pub close_delay: Duration,

    /// Debounce window for pointer enter/leave over the menu region.
    pub hover_debounce: Duration,

    /// Debounce window for viewport resize events.
    pub resize_debounce: Duration,

    /// Delay before moving focus into a freshly opened panel.
    pub open_focus_delay: Duration,
}

impl Default for MenuTiming {
    fn default() -> Self {
        Self {
            transition: DEFAULT_TRANSITION,
            close_delay: DEFAULT_CLOSE_DELAY,
            hover_debounce: DEFAULT_HOVER_DEBOUNCE,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            open_focus_delay: DEFAULT_OPEN_FOCUS_DELAY,
        }
    }
}

impl MenuTiming {
    /// Set the transition duration.
    #[must_use]
    pub const fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Set the post-leave close delay.
    #[must_use]
    pub const fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    /// Set the hover debounce window.
    #[must_use]
    pub const fn with_hover_debounce(mut self, hover_debounce: Duration) -> Self {
        self.hover_debounce = hover_debounce;
        self
    }

    /// Set the resize debounce window.
    #[must_use]
    pub const fn with_resize_debounce(mut self, resize_debounce: Duration) -> Self {
        self.resize_debounce = resize_debounce;
        self
    }

    /// Override the transition duration from a styling-layer string,
    /// keeping the default when the string is absent or unparsable.
    #[must_use]
    pub fn with_transition_str(mut self, raw: Option<&str>) -> Self {
        if let Some(d) = raw.and_then(parse_transition_duration) {
            self.transition = d;
        }
        self
    }
}

/// Parse a CSS-style duration: a non-negative number suffixed with `ms`
/// or `s` (checked in that order, since `ms` also ends in `s`).
///
/// Returns `None` for anything else; callers fall back to
/// [`DEFAULT_TRANSITION`].
#[must_use]
pub fn parse_transition_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (number, unit_ms) = if let Some(n) = raw.strip_suffix("ms") {
        (n, true)
    } else if let Some(n) = raw.strip_suffix('s') {
        (n, false)
    } else {
        return None;
    };

    let value: f64 = number.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let secs = if unit_ms { value / 1000.0 } else { value };
    // A transition longer than an hour is a typo, not a duration.
    if secs > 3_600.0 {
        return None;
    }
    Some(Duration::from_secs_f64(secs))
}
