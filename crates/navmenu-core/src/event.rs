#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The embedder translates whatever raw input surface it sits on (browser
//! events, a test script) into [`MenuEvent`]s and feeds them to the
//! controller. All events derive `Clone` and `PartialEq` for use in tests
//! and pattern matching.
//!
//! # Design Notes
//!
//! - `Modifiers` use bitflags for easy combination.
//! - `Shift+Tab` may arrive either as `KeyCode::BackTab` or as
//!   `KeyCode::Tab` with the `SHIFT` modifier; [`KeyEvent::is_back_tab`]
//!   accepts both.

use bitflags::bitflags;

/// Canonical input event consumed by the menu controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// A keyboard event (document scope).
    Key(KeyEvent),

    /// Pointer entered the menu region.
    PointerEnter,

    /// Pointer left the menu region.
    PointerLeave,

    /// A dropdown trigger was clicked, carrying its dropdown identifier.
    TriggerClick(String),

    /// The hamburger trigger was clicked.
    HamburgerClick,

    /// The shared backdrop was clicked.
    BackdropClick,

    /// The mobile panel's close control was clicked.
    MobileCloseClick,

    /// An accordion section trigger was clicked, carrying its section id.
    AccordionClick(String),

    /// The viewport was resized.
    Resize,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Enter or Space: the activation keys for triggers and accordion
    /// headers.
    #[must_use]
    pub fn is_activate(&self) -> bool {
        matches!(self.code, KeyCode::Enter | KeyCode::Char(' '))
    }

    /// Plain forward Tab (no Shift).
    #[must_use]
    pub fn is_forward_tab(&self) -> bool {
        self.code == KeyCode::Tab && !self.shift()
    }

    /// Shift+Tab, in either encoding.
    #[must_use]
    pub fn is_back_tab(&self) -> bool {
        self.code == KeyCode::BackTab || (self.code == KeyCode::Tab && self.shift())
    }
}

/// Key codes the menu controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_keys() {
        assert!(KeyEvent::new(KeyCode::Enter).is_activate());
        assert!(KeyEvent::new(KeyCode::Char(' ')).is_activate());
        assert!(!KeyEvent::new(KeyCode::Char('a')).is_activate());
        assert!(!KeyEvent::new(KeyCode::Escape).is_activate());
    }

    #[test]
    fn back_tab_both_encodings() {
        assert!(KeyEvent::new(KeyCode::BackTab).is_back_tab());
        assert!(
            KeyEvent::new(KeyCode::Tab)
                .with_modifiers(Modifiers::SHIFT)
                .is_back_tab()
        );
        assert!(!KeyEvent::new(KeyCode::Tab).is_back_tab());
    }

    #[test]
    fn forward_tab_excludes_shift() {
        assert!(KeyEvent::new(KeyCode::Tab).is_forward_tab());
        assert!(
            !KeyEvent::new(KeyCode::Tab)
                .with_modifiers(Modifiers::SHIFT)
                .is_forward_tab()
        );
        assert!(!KeyEvent::new(KeyCode::BackTab).is_forward_tab());
    }

    #[test]
    fn default_modifiers_are_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
