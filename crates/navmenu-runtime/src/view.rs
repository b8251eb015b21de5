#![forbid(unsafe_code)]

//! View capability trait.
//!
//! The controller never touches a document directly; every lookup and
//! mutation goes through this trait. Lookups return `Option` and the
//! controller silently skips the corresponding action when an element is
//! absent — a missing optional element must never panic or halt the rest
//! of the system. The worst-case failure mode is a visually inert
//! control.
//!
//! # Structural contract
//!
//! An implementation resolves, by role:
//!
//! - the dropdown area and the shared backdrop;
//! - one trigger and one panel per dropdown id (panels follow the
//!   `dropdown-<id>` naming convention in a real document);
//! - the hamburger trigger, the mobile panel, and its close control;
//! - accordion trigger/content pairs per section id.

/// Opaque handle to a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Capabilities the controller needs from the document layer.
pub trait View {
    // --- Environment ---

    /// Current viewport width in pixels.
    fn viewport_width(&self) -> u16;

    /// Raw transition-duration value from the styling layer (`0.6s`,
    /// `600ms`, ...), read once at controller construction.
    fn transition_duration(&self) -> Option<String>;

    // --- Structural lookups ---

    /// The dropdown area enclosing all panels.
    fn dropdown_area(&self) -> Option<ElementId>;

    /// The shared backdrop behind dropdowns and the mobile panel.
    fn backdrop(&self) -> Option<ElementId>;

    /// All dropdown identifiers present in the document.
    fn dropdown_ids(&self) -> Vec<String>;

    /// The trigger button for dropdown `id`.
    fn trigger(&self, id: &str) -> Option<ElementId>;

    /// The panel for dropdown `id`.
    fn panel(&self, id: &str) -> Option<ElementId>;

    /// The hamburger trigger.
    fn hamburger(&self) -> Option<ElementId>;

    /// The mobile panel.
    fn mobile_panel(&self) -> Option<ElementId>;

    /// The mobile panel's close control.
    fn mobile_close(&self) -> Option<ElementId>;

    /// All accordion section identifiers.
    fn accordion_sections(&self) -> Vec<String>;

    /// The accordion trigger for `section`.
    fn accordion_trigger(&self, section: &str) -> Option<ElementId>;

    /// The accordion content region for `section`.
    fn accordion_content(&self, section: &str) -> Option<ElementId>;

    // --- Focus and attributes ---

    /// The currently focused element.
    fn focused(&self) -> Option<ElementId>;

    /// First interactive descendant of a panel (sequential tab order).
    fn first_interactive(&self, panel: ElementId) -> Option<ElementId>;

    /// Last interactive descendant of a panel (sequential tab order).
    fn last_interactive(&self, panel: ElementId) -> Option<ElementId>;

    /// Read an element's expanded attribute. Accordion toggling treats
    /// this as the source of truth.
    fn is_expanded(&self, el: ElementId) -> bool;

    // --- Mutations ---

    /// Toggle the activation class driving all visual transitions.
    fn set_active(&mut self, el: ElementId, active: bool);

    /// Set an element's expanded attribute.
    fn set_expanded(&mut self, el: ElementId, expanded: bool);

    /// Make a panel's interactive descendants reachable (or not) by
    /// sequential keyboard navigation.
    fn set_tab_reachable(&mut self, panel: ElementId, reachable: bool);

    /// Move focus to an element.
    fn focus(&mut self, el: ElementId);

    /// Set or clear the page body's no-scroll condition.
    fn set_scroll_lock(&mut self, locked: bool);
}
