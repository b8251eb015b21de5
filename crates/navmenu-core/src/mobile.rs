#![forbid(unsafe_code)]

//! Mobile hamburger panel state.
//!
//! A single open/closed flag. Opening scroll-locks the page body,
//! activates the shared backdrop, marks the hamburger expanded, and
//! schedules a focus move to the panel's close control; closing reverses
//! all of that and returns focus to the hamburger. The runtime applies
//! those effects from [`MobileTransition`].
//!
//! Accordion sections inside the panel carry no state here: the trigger's
//! expanded attribute in the view is the source of truth, and the
//! controller flips it directly, mirroring the flip onto the content
//! region's visibility class. Sections are fully independent; any subset
//! may be expanded at once.

#[cfg(feature = "tracing")]
use tracing::debug;

/// Result of a hamburger toggle or forced close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobileTransition {
    /// The panel just opened.
    Opened,
    /// The panel just closed.
    Closed,
}

/// The hamburger panel open/closed flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Create the menu in the closed state.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Whether the panel is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle the panel.
    pub fn toggle(&mut self) -> MobileTransition {
        self.open = !self.open;
        #[cfg(feature = "tracing")]
        debug!(open = self.open, "mobile panel toggled");
        if self.open {
            MobileTransition::Opened
        } else {
            MobileTransition::Closed
        }
    }

    /// Close the panel if open. Returns the transition, or `None` if it
    /// was already closed.
    pub fn close(&mut self) -> Option<MobileTransition> {
        if self.open {
            self.open = false;
            #[cfg(feature = "tracing")]
            debug!("mobile panel closed");
            Some(MobileTransition::Closed)
        } else {
            None
        }
    }
}
