#![forbid(unsafe_code)]

//! Viewport mode detection.
//!
//! A single breakpoint splits the world into desktop (dropdown menus) and
//! mobile (hamburger + accordion). Detection is a pure function of the
//! current viewport width; callers must re-query per decision point since
//! the width can change between calls.

/// Default mobile breakpoint in pixels. Widths at or below this are mobile.
pub const DEFAULT_BREAKPOINT: u16 = 768;

/// The responsive mode the menu operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportMode {
    /// Wide viewport: dropdown menus, hover intent, Tab wrapping.
    Desktop,
    /// Narrow viewport: hamburger panel and accordion sections.
    Mobile,
}

impl ViewportMode {
    /// Derive the mode from a viewport width against a breakpoint.
    #[must_use]
    pub const fn from_width(width: u16, breakpoint: u16) -> Self {
        if width <= breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Whether this is mobile mode.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    /// Whether this is desktop mode.
    #[must_use]
    pub const fn is_desktop(self) -> bool {
        matches!(self, Self::Desktop)
    }
}
