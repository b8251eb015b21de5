#![forbid(unsafe_code)]

//! Fake document for menu controller tests.
//!
//! [`FakeDocument`] implements the runtime's `View` trait over plain
//! maps: it records activation classes, expanded attributes,
//! tab-reachability, focus, and the scroll lock, and exposes assertion
//! helpers so tests read back exactly what a styling layer would see.
//! Elements can be removed to exercise the silent-degradation contract.
//!
//! The standard markup mirrors the structural contract: three dropdowns
//! (`products`, `solutions`, `resources`) each with a trigger, a panel,
//! and three interactive links; a hamburger, a mobile panel with a close
//! control, and two accordion sections (`products`, `company`).

use std::collections::{BTreeMap, HashMap};

use navmenu_runtime::{ElementId, View};

#[derive(Debug, Clone, Copy, Default)]
struct ElementState {
    active: bool,
    expanded: bool,
    tab_reachable: bool,
}

#[derive(Debug, Clone)]
struct DropdownParts {
    trigger: ElementId,
    panel: ElementId,
    links: Vec<ElementId>,
}

#[derive(Debug, Clone)]
struct AccordionParts {
    trigger: ElementId,
    content: ElementId,
}

/// In-memory stand-in for the document layer.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    width: u16,
    transition: Option<String>,
    scroll_locked: bool,
    focused: Option<ElementId>,
    elements: HashMap<ElementId, ElementState>,
    next: u64,

    area: Option<ElementId>,
    backdrop: Option<ElementId>,
    dropdowns: BTreeMap<String, DropdownParts>,
    hamburger: Option<ElementId>,
    mobile_panel: Option<ElementId>,
    mobile_close: Option<ElementId>,
    accordions: BTreeMap<String, AccordionParts>,
}

impl FakeDocument {
    /// The standard markup at desktop width (1200 px) with a `0.6s`
    /// transition.
    #[must_use]
    pub fn standard() -> Self {
        let mut doc = Self {
            width: 1200,
            transition: Some("0.6s".to_owned()),
            scroll_locked: false,
            focused: None,
            elements: HashMap::new(),
            next: 1,
            area: None,
            backdrop: None,
            dropdowns: BTreeMap::new(),
            hamburger: None,
            mobile_panel: None,
            mobile_close: None,
            accordions: BTreeMap::new(),
        };

        doc.area = Some(doc.alloc());
        doc.backdrop = Some(doc.alloc());
        for id in ["products", "solutions", "resources"] {
            let trigger = doc.alloc();
            let panel = doc.alloc();
            let links = (0..3).map(|_| doc.alloc()).collect();
            doc.dropdowns.insert(
                id.to_owned(),
                DropdownParts {
                    trigger,
                    panel,
                    links,
                },
            );
        }
        doc.hamburger = Some(doc.alloc());
        doc.mobile_panel = Some(doc.alloc());
        doc.mobile_close = Some(doc.alloc());
        for section in ["products", "company"] {
            let trigger = doc.alloc();
            let content = doc.alloc();
            doc.accordions
                .insert(section.to_owned(), AccordionParts { trigger, content });
        }
        doc
    }

    fn alloc(&mut self) -> ElementId {
        let el = ElementId(self.next);
        self.next += 1;
        self.elements.insert(el, ElementState::default());
        el
    }

    fn state(&self, el: ElementId) -> ElementState {
        self.elements.get(&el).copied().unwrap_or_default()
    }

    // --- Mutation helpers for tests ---

    /// Change the viewport width.
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Builder form of [`set_width`](Self::set_width).
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Replace the styling layer's transition-duration string.
    #[must_use]
    pub fn with_transition(mut self, raw: Option<&str>) -> Self {
        self.transition = raw.map(str::to_owned);
        self
    }

    /// Remove the backdrop element (degradation tests).
    #[must_use]
    pub fn without_backdrop(mut self) -> Self {
        self.backdrop = None;
        self
    }

    /// Remove a whole dropdown (trigger and panel) by id.
    #[must_use]
    pub fn without_dropdown(mut self, id: &str) -> Self {
        self.dropdowns.remove(id);
        self
    }

    /// Remove the mobile close control.
    #[must_use]
    pub fn without_mobile_close(mut self) -> Self {
        self.mobile_close = None;
        self
    }

    /// Simulate the user focusing an element.
    pub fn focus_element(&mut self, el: ElementId) {
        self.focused = Some(el);
    }

    // --- Read-back helpers ---

    /// The trigger element for dropdown `id`.
    #[must_use]
    pub fn trigger_el(&self, id: &str) -> Option<ElementId> {
        self.dropdowns.get(id).map(|d| d.trigger)
    }

    /// The `index`-th interactive link inside dropdown `id`'s panel.
    #[must_use]
    pub fn link(&self, id: &str, index: usize) -> Option<ElementId> {
        self.dropdowns.get(id).and_then(|d| d.links.get(index)).copied()
    }

    /// The accordion trigger element for `section`.
    #[must_use]
    pub fn accordion_trigger_el(&self, section: &str) -> Option<ElementId> {
        self.accordions.get(section).map(|a| a.trigger)
    }

    /// The hamburger trigger element.
    #[must_use]
    pub fn hamburger_el(&self) -> Option<ElementId> {
        self.hamburger
    }

    /// The mobile close control element.
    #[must_use]
    pub fn mobile_close_el(&self) -> Option<ElementId> {
        self.mobile_close
    }

    /// Whether dropdown `id`'s panel carries the active class.
    #[must_use]
    pub fn panel_active(&self, id: &str) -> bool {
        self.dropdowns
            .get(id)
            .is_some_and(|d| self.state(d.panel).active)
    }

    /// Whether dropdown `id`'s trigger reports expanded.
    #[must_use]
    pub fn trigger_expanded(&self, id: &str) -> bool {
        self.dropdowns
            .get(id)
            .is_some_and(|d| self.state(d.trigger).expanded)
    }

    /// Whether every link of dropdown `id` is keyboard-reachable.
    #[must_use]
    pub fn links_reachable(&self, id: &str) -> bool {
        self.dropdowns
            .get(id)
            .is_some_and(|d| d.links.iter().all(|l| self.state(*l).tab_reachable))
    }

    /// Number of panels currently carrying the active class.
    #[must_use]
    pub fn active_panel_count(&self) -> usize {
        self.dropdowns
            .values()
            .filter(|d| self.state(d.panel).active)
            .count()
    }

    /// Whether the backdrop is active (false when removed).
    #[must_use]
    pub fn backdrop_active(&self) -> bool {
        self.backdrop.is_some_and(|b| self.state(b).active)
    }

    /// Whether the dropdown area is active.
    #[must_use]
    pub fn area_active(&self) -> bool {
        self.area.is_some_and(|a| self.state(a).active)
    }

    /// Whether the mobile panel is active.
    #[must_use]
    pub fn mobile_panel_active(&self) -> bool {
        self.mobile_panel.is_some_and(|p| self.state(p).active)
    }

    /// Whether the hamburger reports expanded.
    #[must_use]
    pub fn hamburger_expanded(&self) -> bool {
        self.hamburger.is_some_and(|h| self.state(h).expanded)
    }

    /// Whether the page body is scroll-locked.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// The currently focused element.
    #[must_use]
    pub fn focused_el(&self) -> Option<ElementId> {
        self.focused
    }

    /// Whether accordion `section`'s trigger reports expanded.
    #[must_use]
    pub fn accordion_expanded(&self, section: &str) -> bool {
        self.accordions
            .get(section)
            .is_some_and(|a| self.state(a.trigger).expanded)
    }

    /// Whether accordion `section`'s content region is visible.
    #[must_use]
    pub fn accordion_content_active(&self, section: &str) -> bool {
        self.accordions
            .get(section)
            .is_some_and(|a| self.state(a.content).active)
    }
}

impl View for FakeDocument {
    fn viewport_width(&self) -> u16 {
        self.width
    }

    fn transition_duration(&self) -> Option<String> {
        self.transition.clone()
    }

    fn dropdown_area(&self) -> Option<ElementId> {
        self.area
    }

    fn backdrop(&self) -> Option<ElementId> {
        self.backdrop
    }

    fn dropdown_ids(&self) -> Vec<String> {
        self.dropdowns.keys().cloned().collect()
    }

    fn trigger(&self, id: &str) -> Option<ElementId> {
        self.dropdowns.get(id).map(|d| d.trigger)
    }

    fn panel(&self, id: &str) -> Option<ElementId> {
        self.dropdowns.get(id).map(|d| d.panel)
    }

    fn hamburger(&self) -> Option<ElementId> {
        self.hamburger
    }

    fn mobile_panel(&self) -> Option<ElementId> {
        self.mobile_panel
    }

    fn mobile_close(&self) -> Option<ElementId> {
        self.mobile_close
    }

    fn accordion_sections(&self) -> Vec<String> {
        self.accordions.keys().cloned().collect()
    }

    fn accordion_trigger(&self, section: &str) -> Option<ElementId> {
        self.accordions.get(section).map(|a| a.trigger)
    }

    fn accordion_content(&self, section: &str) -> Option<ElementId> {
        self.accordions.get(section).map(|a| a.content)
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn first_interactive(&self, panel: ElementId) -> Option<ElementId> {
        self.dropdowns
            .values()
            .find(|d| d.panel == panel)
            .and_then(|d| d.links.first().copied())
    }

    fn last_interactive(&self, panel: ElementId) -> Option<ElementId> {
        self.dropdowns
            .values()
            .find(|d| d.panel == panel)
            .and_then(|d| d.links.last().copied())
    }

    fn is_expanded(&self, el: ElementId) -> bool {
        self.state(el).expanded
    }

    fn set_active(&mut self, el: ElementId, active: bool) {
        if let Some(state) = self.elements.get_mut(&el) {
            state.active = active;
        }
    }

    fn set_expanded(&mut self, el: ElementId, expanded: bool) {
        if let Some(state) = self.elements.get_mut(&el) {
            state.expanded = expanded;
        }
    }

    fn set_tab_reachable(&mut self, panel: ElementId, reachable: bool) {
        let links: Vec<ElementId> = self
            .dropdowns
            .values()
            .find(|d| d.panel == panel)
            .map(|d| d.links.clone())
            .unwrap_or_default();
        for link in links {
            if let Some(state) = self.elements.get_mut(&link) {
                state.tab_reachable = reachable;
            }
        }
        if let Some(state) = self.elements.get_mut(&panel) {
            state.tab_reachable = reachable;
        }
    }

    fn focus(&mut self, el: ElementId) {
        self.focused = Some(el);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}
