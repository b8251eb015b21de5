#![forbid(unsafe_code)]

//! The menu controller.
//!
//! One instance owns the whole interaction state: the desktop dropdown
//! machine, the mobile panel flag, the hover debouncer, and one timer
//! slot per deferred action. Input arrives as [`MenuEvent`]s plus a
//! periodic [`tick`](MenuController::tick) that pumps expired timers;
//! both take an explicit `now` so the controller runs against any clock.
//!
//! Mode gating happens here: the viewport width is re-read from the view
//! at every decision point, desktop transitions are suppressed in mobile
//! mode, and the resize coordinator guarantees the two mode-specific
//! states are never both active after a mode switch.

use std::time::Instant;

use navmenu_core::dropdown::{DropdownEffect, DropdownMachine};
use navmenu_core::event::{KeyCode, KeyEvent, MenuEvent};
use navmenu_core::hover::{HoverDebouncer, HoverIntent};
use navmenu_core::mobile::{MobileMenu, MobileTransition};
use navmenu_core::mode::{DEFAULT_BREAKPOINT, ViewportMode};
use navmenu_core::timer::TimerSlot;
use navmenu_core::timing::MenuTiming;
use tracing::{debug, trace};

use crate::view::View;

/// How an event was handled.
///
/// `Consumed` means a custom action substituted for the default handling;
/// the embedder maps it to event-default-prevention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The controller acted on the event.
    Consumed,
    /// The event was not for us; default handling proceeds.
    Passed,
}

impl Outcome {
    /// Whether the controller acted on the event.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Pending focus moves (one slot; latest wins).
#[derive(Debug, Clone)]
enum FocusTarget {
    /// First interactive descendant of dropdown panel `id`.
    PanelFirst(String),
    /// The mobile panel's close control.
    MobileClose,
}

/// The menu controller. See the module docs.
#[derive(Debug)]
pub struct MenuController {
    dropdown: DropdownMachine,
    mobile: MobileMenu,
    hover: HoverDebouncer,
    timing: MenuTiming,
    breakpoint: u16,

    // One live timer per category (clear-then-set).
    close_delay: TimerSlot<()>,
    structural_close: TimerSlot<()>,
    resize_debounce: TimerSlot<()>,
    focus_move: TimerSlot<FocusTarget>,
}

impl MenuController {
    /// Build a controller over a view, reading the styling layer's
    /// transition duration once. A malformed or absent duration falls
    /// back to the default.
    pub fn new<V: View>(view: &V) -> Self {
        let timing = MenuTiming::default().with_transition_str(view.transition_duration().as_deref());
        debug!(transition_ms = timing.transition.as_millis() as u64, "menu controller initialized");
        Self {
            dropdown: DropdownMachine::new(),
            mobile: MobileMenu::new(),
            hover: HoverDebouncer::new(),
            timing,
            breakpoint: DEFAULT_BREAKPOINT,
            close_delay: TimerSlot::new(),
            structural_close: TimerSlot::new(),
            resize_debounce: TimerSlot::new(),
            focus_move: TimerSlot::new(),
        }
    }

    /// Replace the timing configuration (the transition duration read at
    /// construction survives unless overridden here too).
    #[must_use]
    pub fn with_timing(mut self, timing: MenuTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Override the mobile breakpoint.
    #[must_use]
    pub fn with_breakpoint(mut self, breakpoint: u16) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Current timing configuration.
    #[must_use]
    pub fn timing(&self) -> &MenuTiming {
        &self.timing
    }

    /// The open dropdown's id, if any panel is fully open.
    #[must_use]
    pub fn open_dropdown(&self) -> Option<&str> {
        self.dropdown.open_id()
    }

    /// Whether the mobile panel is open.
    #[must_use]
    pub const fn mobile_open(&self) -> bool {
        self.mobile.is_open()
    }

    /// Route one input event.
    pub fn handle<V: View>(&mut self, view: &mut V, event: &MenuEvent, now: Instant) -> Outcome {
        trace!(?event, "menu event");
        match event {
            MenuEvent::PointerEnter => {
                // Entering the menu region cancels a pending close at
                // once, before the debounce settles.
                self.close_delay.cancel();
                self.hover.pointer_enter(now, self.timing.hover_debounce);
                Outcome::Passed
            }
            MenuEvent::PointerLeave => {
                self.hover.pointer_leave(now, self.timing.hover_debounce);
                Outcome::Passed
            }
            MenuEvent::TriggerClick(id) => {
                if self.mode(view).is_desktop() {
                    self.show(view, id, now);
                    Outcome::Consumed
                } else {
                    Outcome::Passed
                }
            }
            MenuEvent::HamburgerClick => {
                if self.mode(view).is_mobile() {
                    match self.mobile.toggle() {
                        MobileTransition::Opened => self.apply_mobile_open(view, now),
                        MobileTransition::Closed => self.apply_mobile_close(view),
                    }
                    Outcome::Consumed
                } else {
                    Outcome::Passed
                }
            }
            MenuEvent::BackdropClick => {
                if self.mobile.close().is_some() {
                    self.apply_mobile_close(view);
                    Outcome::Consumed
                } else if self.dropdown.engaged() {
                    self.hide(view, now);
                    Outcome::Consumed
                } else {
                    Outcome::Passed
                }
            }
            MenuEvent::MobileCloseClick => {
                if self.mobile.close().is_some() {
                    self.apply_mobile_close(view);
                    Outcome::Consumed
                } else {
                    Outcome::Passed
                }
            }
            MenuEvent::AccordionClick(section) => {
                if self.mode(view).is_mobile() && self.toggle_accordion(view, section) {
                    Outcome::Consumed
                } else {
                    Outcome::Passed
                }
            }
            MenuEvent::Key(key) => self.handle_key(view, *key, now),
            MenuEvent::Resize => {
                self.resize_debounce
                    .schedule_after(now, self.timing.resize_debounce, ());
                Outcome::Passed
            }
        }
    }

    /// Pump expired timers. Call on every event-loop turn (or, in tests,
    /// with a synthetic `now` past the deadline of interest).
    pub fn tick<V: View>(&mut self, view: &mut V, now: Instant) {
        if let Some(intent) = self.hover.poll(now) {
            match intent {
                HoverIntent::Enter => self.close_delay.cancel(),
                HoverIntent::Leave => {
                    if self.dropdown.engaged() {
                        self.close_delay
                            .schedule_after(now, self.timing.close_delay, ());
                    }
                }
            }
        }

        if self.close_delay.fire(now).is_some() {
            self.hide(view, now);
        }

        if self.structural_close.fire(now).is_some() {
            let effects = self.dropdown.finish_close();
            self.apply_dropdown(view, effects, now);
        }

        if self.resize_debounce.fire(now).is_some() {
            self.settle_resize(view, now);
        }

        if let Some(target) = self.focus_move.fire(now) {
            self.apply_focus_move(view, &target);
        }
    }

    // -----------------------------------------------------------------------
    // Desktop dropdowns
    // -----------------------------------------------------------------------

    fn mode<V: View>(&self, view: &V) -> ViewportMode {
        ViewportMode::from_width(view.viewport_width(), self.breakpoint)
    }

    /// Show (or toggle, or swap to) dropdown `id`. Inert in mobile mode.
    fn show<V: View>(&mut self, view: &mut V, id: &str, now: Instant) {
        if self.mode(view).is_mobile() {
            return;
        }
        let effects = self.dropdown.request_show(id);
        self.apply_dropdown(view, effects, now);
    }

    /// Begin the animated close of the open dropdown. Inert in mobile mode.
    fn hide<V: View>(&mut self, view: &mut V, now: Instant) {
        if self.mode(view).is_mobile() {
            return;
        }
        let effects = self.dropdown.request_hide();
        self.apply_dropdown(view, effects, now);
    }

    fn apply_dropdown<V: View>(
        &mut self,
        view: &mut V,
        effects: Vec<DropdownEffect>,
        now: Instant,
    ) {
        for effect in effects {
            match effect {
                DropdownEffect::DeactivateAll => {
                    for id in view.dropdown_ids() {
                        if let Some(trigger) = view.trigger(&id) {
                            view.set_active(trigger, false);
                            view.set_expanded(trigger, false);
                        }
                        if let Some(panel) = view.panel(&id) {
                            view.set_active(panel, false);
                        }
                    }
                }
                DropdownEffect::OpenPanel(id) => {
                    self.structural_close.cancel();
                    if let Some(area) = view.dropdown_area() {
                        view.set_active(area, true);
                    }
                    if let Some(backdrop) = view.backdrop() {
                        view.set_active(backdrop, true);
                    }
                    if let Some(trigger) = view.trigger(&id) {
                        view.set_active(trigger, true);
                        view.set_expanded(trigger, true);
                    }
                    if let Some(panel) = view.panel(&id) {
                        view.set_active(panel, true);
                        view.set_tab_reachable(panel, true);
                    }
                }
                DropdownEffect::BeginClose(id) => {
                    // Visual collapse starts now; the panel stays active
                    // and tab-reachable until the transition elapses.
                    if let Some(area) = view.dropdown_area() {
                        view.set_active(area, false);
                    }
                    if let Some(backdrop) = view.backdrop() {
                        view.set_active(backdrop, false);
                    }
                    if let Some(trigger) = view.trigger(&id) {
                        view.set_active(trigger, false);
                        view.set_expanded(trigger, false);
                    }
                    self.structural_close
                        .schedule_after(now, self.timing.transition, ());
                }
                DropdownEffect::FinishClose(id) => {
                    if let Some(panel) = view.panel(&id) {
                        view.set_active(panel, false);
                        view.set_tab_reachable(panel, false);
                    }
                }
                DropdownEffect::SnapClose(id) => {
                    self.structural_close.cancel();
                    if let Some(panel) = view.panel(&id) {
                        view.set_active(panel, false);
                        view.set_tab_reachable(panel, false);
                    }
                    if let Some(trigger) = view.trigger(&id) {
                        view.set_active(trigger, false);
                        view.set_expanded(trigger, false);
                    }
                    if let Some(area) = view.dropdown_area() {
                        view.set_active(area, false);
                    }
                    if let Some(backdrop) = view.backdrop() {
                        view.set_active(backdrop, false);
                    }
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mobile panel and accordion
    // -----------------------------------------------------------------------

    fn apply_mobile_open<V: View>(&mut self, view: &mut V, now: Instant) {
        debug!("mobile panel opening");
        if let Some(panel) = view.mobile_panel() {
            view.set_active(panel, true);
        }
        if let Some(backdrop) = view.backdrop() {
            view.set_active(backdrop, true);
        }
        if let Some(hamburger) = view.hamburger() {
            view.set_active(hamburger, true);
            view.set_expanded(hamburger, true);
        }
        view.set_scroll_lock(true);
        // The close control only becomes focusable once the panel is
        // visible; move focus after a short delay.
        self.focus_move
            .schedule_after(now, self.timing.open_focus_delay, FocusTarget::MobileClose);
    }

    fn apply_mobile_close<V: View>(&mut self, view: &mut V) {
        debug!("mobile panel closing");
        if let Some(panel) = view.mobile_panel() {
            view.set_active(panel, false);
        }
        if let Some(backdrop) = view.backdrop() {
            view.set_active(backdrop, false);
        }
        if let Some(hamburger) = view.hamburger() {
            view.set_active(hamburger, false);
            view.set_expanded(hamburger, false);
            view.focus(hamburger);
        }
        view.set_scroll_lock(false);
        self.focus_move.cancel();
    }

    /// Flip a section: the trigger's expanded attribute is the source of
    /// truth, mirrored onto the content region's visibility class.
    /// Returns whether the section resolved.
    fn toggle_accordion<V: View>(&mut self, view: &mut V, section: &str) -> bool {
        let Some(trigger) = view.accordion_trigger(section) else {
            return false;
        };
        let expanded = view.is_expanded(trigger);
        view.set_expanded(trigger, !expanded);
        if let Some(content) = view.accordion_content(section) {
            view.set_active(content, !expanded);
        }
        true
    }

    // -----------------------------------------------------------------------
    // Keyboard/focus coordinator
    // -----------------------------------------------------------------------

    fn handle_key<V: View>(&mut self, view: &mut V, key: KeyEvent, now: Instant) -> Outcome {
        if key.code == KeyCode::Escape {
            return self.handle_escape(view, now);
        }

        if key.is_activate() {
            return match self.mode(view) {
                ViewportMode::Desktop => self.activate_trigger(view, now),
                ViewportMode::Mobile => self.activate_accordion(view),
            };
        }

        if self.mode(view).is_desktop() && (key.is_forward_tab() || key.is_back_tab()) {
            return self.handle_tab(view, key, now);
        }

        Outcome::Passed
    }

    fn handle_escape<V: View>(&mut self, view: &mut V, now: Instant) -> Outcome {
        if self.mobile.close().is_some() {
            self.apply_mobile_close(view);
            return Outcome::Consumed;
        }
        if let Some(id) = self.dropdown.open_id().map(ToOwned::to_owned) {
            if self.mode(view).is_mobile() {
                // Viewport already flipped but the resize debounce has
                // not settled; snap the leftover dropdown closed.
                let effects = self.dropdown.force_close();
                self.apply_dropdown(view, effects, now);
            } else {
                self.hide(view, now);
            }
            if let Some(trigger) = view.trigger(&id) {
                view.focus(trigger);
            }
            return Outcome::Consumed;
        }
        Outcome::Passed
    }

    /// Desktop Enter/Space on a focused trigger toggles its dropdown; the
    /// open path schedules a focus move into the panel.
    fn activate_trigger<V: View>(&mut self, view: &mut V, now: Instant) -> Outcome {
        let Some(focused) = view.focused() else {
            return Outcome::Passed;
        };
        let Some(id) = view
            .dropdown_ids()
            .into_iter()
            .find(|id| view.trigger(id) == Some(focused))
        else {
            return Outcome::Passed;
        };

        self.show(view, &id, now);
        if self.dropdown.open_id() == Some(id.as_str()) {
            self.focus_move.schedule_after(
                now,
                self.timing.open_focus_delay,
                FocusTarget::PanelFirst(id),
            );
        }
        Outcome::Consumed
    }

    /// Mobile Enter/Space on a focused accordion trigger toggles its section.
    fn activate_accordion<V: View>(&mut self, view: &mut V) -> Outcome {
        let Some(focused) = view.focused() else {
            return Outcome::Passed;
        };
        let Some(section) = view
            .accordion_sections()
            .into_iter()
            .find(|s| view.accordion_trigger(s) == Some(focused))
        else {
            return Outcome::Passed;
        };

        self.toggle_accordion(view, &section);
        Outcome::Consumed
    }

    /// Tab boundary wrapping inside an open dropdown: Shift+Tab on the
    /// first interactive descendant returns to the trigger; plain Tab on
    /// the last one hides the dropdown but lets default tab order proceed.
    fn handle_tab<V: View>(&mut self, view: &mut V, key: KeyEvent, now: Instant) -> Outcome {
        let Some(id) = self.dropdown.open_id().map(ToOwned::to_owned) else {
            return Outcome::Passed;
        };
        let Some(panel) = view.panel(&id) else {
            return Outcome::Passed;
        };
        let Some(focused) = view.focused() else {
            return Outcome::Passed;
        };

        if key.is_back_tab() {
            if view.first_interactive(panel) == Some(focused) {
                if let Some(trigger) = view.trigger(&id) {
                    view.focus(trigger);
                }
                return Outcome::Consumed;
            }
        } else if view.last_interactive(panel) == Some(focused) {
            self.hide(view, now);
            // Deliberately not consumed: focus proceeds into the page
            // content after the menu.
            return Outcome::Passed;
        }
        Outcome::Passed
    }

    // -----------------------------------------------------------------------
    // Resize coordinator
    // -----------------------------------------------------------------------

    /// Runs when a resize burst settles: whichever mode-specific state no
    /// longer matches the viewport is cleaned up.
    fn settle_resize<V: View>(&mut self, view: &mut V, now: Instant) {
        match self.mode(view) {
            ViewportMode::Mobile => {
                if self.dropdown.engaged() {
                    debug!("resize to mobile: closing dropdown");
                    let effects = self.dropdown.force_close();
                    self.apply_dropdown(view, effects, now);
                }
                self.hover.cancel();
                self.close_delay.cancel();
            }
            ViewportMode::Desktop => {
                if self.mobile.close().is_some() {
                    debug!("resize to desktop: closing mobile panel");
                    self.apply_mobile_close(view);
                }
            }
        }
    }

    fn apply_focus_move<V: View>(&mut self, view: &mut V, target: &FocusTarget) {
        match target {
            FocusTarget::PanelFirst(id) => {
                // The dropdown may have closed while the move was pending.
                if self.dropdown.open_id() != Some(id.as_str()) {
                    return;
                }
                if let Some(panel) = view.panel(id)
                    && let Some(first) = view.first_interactive(panel)
                {
                    view.focus(first);
                }
            }
            FocusTarget::MobileClose => {
                if !self.mobile.is_open() {
                    return;
                }
                if let Some(close) = view.mobile_close() {
                    view.focus(close);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ElementId;
    use std::time::Duration;

    /// A document with nothing in it. Every action must silently no-op.
    struct EmptyView {
        width: u16,
    }

    impl View for EmptyView {
        fn viewport_width(&self) -> u16 {
            self.width
        }
        fn transition_duration(&self) -> Option<String> {
            None
        }
        fn dropdown_area(&self) -> Option<ElementId> {
            None
        }
        fn backdrop(&self) -> Option<ElementId> {
            None
        }
        fn dropdown_ids(&self) -> Vec<String> {
            Vec::new()
        }
        fn trigger(&self, _id: &str) -> Option<ElementId> {
            None
        }
        fn panel(&self, _id: &str) -> Option<ElementId> {
            None
        }
        fn hamburger(&self) -> Option<ElementId> {
            None
        }
        fn mobile_panel(&self) -> Option<ElementId> {
            None
        }
        fn mobile_close(&self) -> Option<ElementId> {
            None
        }
        fn accordion_sections(&self) -> Vec<String> {
            Vec::new()
        }
        fn accordion_trigger(&self, _section: &str) -> Option<ElementId> {
            None
        }
        fn accordion_content(&self, _section: &str) -> Option<ElementId> {
            None
        }
        fn focused(&self) -> Option<ElementId> {
            None
        }
        fn first_interactive(&self, _panel: ElementId) -> Option<ElementId> {
            None
        }
        fn last_interactive(&self, _panel: ElementId) -> Option<ElementId> {
            None
        }
        fn is_expanded(&self, _el: ElementId) -> bool {
            false
        }
        fn set_active(&mut self, _el: ElementId, _active: bool) {}
        fn set_expanded(&mut self, _el: ElementId, _expanded: bool) {}
        fn set_tab_reachable(&mut self, _panel: ElementId, _reachable: bool) {}
        fn focus(&mut self, _el: ElementId) {}
        fn set_scroll_lock(&mut self, _locked: bool) {}
    }

    fn all_events() -> Vec<MenuEvent> {
        vec![
            MenuEvent::PointerEnter,
            MenuEvent::PointerLeave,
            MenuEvent::TriggerClick("products".into()),
            MenuEvent::HamburgerClick,
            MenuEvent::BackdropClick,
            MenuEvent::MobileCloseClick,
            MenuEvent::AccordionClick("products".into()),
            MenuEvent::Key(KeyEvent::new(KeyCode::Escape)),
            MenuEvent::Key(KeyEvent::new(KeyCode::Enter)),
            MenuEvent::Key(KeyEvent::new(KeyCode::Tab)),
            MenuEvent::Key(KeyEvent::new(KeyCode::BackTab)),
            MenuEvent::Resize,
        ]
    }

    #[test]
    fn empty_document_never_panics() {
        for width in [320u16, 1200] {
            let mut view = EmptyView { width };
            let mut controller = MenuController::new(&view);
            let t0 = Instant::now();
            for event in all_events() {
                let _ = controller.handle(&mut view, &event, t0);
            }
            controller.tick(&mut view, t0 + Duration::from_secs(2));
        }
    }

    #[test]
    fn trigger_click_consumed_on_desktop_only() {
        let mut view = EmptyView { width: 1200 };
        let mut controller = MenuController::new(&view);
        let t0 = Instant::now();
        let click = MenuEvent::TriggerClick("products".into());

        assert_eq!(
            controller.handle(&mut view, &click, t0),
            Outcome::Consumed
        );

        view.width = 320;
        assert_eq!(controller.handle(&mut view, &click, t0), Outcome::Passed);
    }

    #[test]
    fn breakpoint_override_applies() {
        let mut view = EmptyView { width: 900 };
        let mut controller = MenuController::new(&view).with_breakpoint(1024);
        let t0 = Instant::now();
        // 900 <= 1024: mobile, so the desktop click passes through.
        let click = MenuEvent::TriggerClick("products".into());
        assert_eq!(controller.handle(&mut view, &click, t0), Outcome::Passed);
    }

    #[test]
    fn timing_from_view_overrides_default() {
        struct TimedView;
        impl View for TimedView {
            fn viewport_width(&self) -> u16 {
                1200
            }
            fn transition_duration(&self) -> Option<String> {
                Some("0.25s".into())
            }
            fn dropdown_area(&self) -> Option<ElementId> {
                None
            }
            fn backdrop(&self) -> Option<ElementId> {
                None
            }
            fn dropdown_ids(&self) -> Vec<String> {
                Vec::new()
            }
            fn trigger(&self, _: &str) -> Option<ElementId> {
                None
            }
            fn panel(&self, _: &str) -> Option<ElementId> {
                None
            }
            fn hamburger(&self) -> Option<ElementId> {
                None
            }
            fn mobile_panel(&self) -> Option<ElementId> {
                None
            }
            fn mobile_close(&self) -> Option<ElementId> {
                None
            }
            fn accordion_sections(&self) -> Vec<String> {
                Vec::new()
            }
            fn accordion_trigger(&self, _: &str) -> Option<ElementId> {
                None
            }
            fn accordion_content(&self, _: &str) -> Option<ElementId> {
                None
            }
            fn focused(&self) -> Option<ElementId> {
                None
            }
            fn first_interactive(&self, _: ElementId) -> Option<ElementId> {
                None
            }
            fn last_interactive(&self, _: ElementId) -> Option<ElementId> {
                None
            }
            fn is_expanded(&self, _: ElementId) -> bool {
                false
            }
            fn set_active(&mut self, _: ElementId, _: bool) {}
            fn set_expanded(&mut self, _: ElementId, _: bool) {}
            fn set_tab_reachable(&mut self, _: ElementId, _: bool) {}
            fn focus(&mut self, _: ElementId) {}
            fn set_scroll_lock(&mut self, _: bool) {}
        }

        let controller = MenuController::new(&TimedView);
        assert_eq!(controller.timing().transition, Duration::from_millis(250));
    }
}
