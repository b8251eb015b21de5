#![forbid(unsafe_code)]

//! Desktop dropdown state machine.
//!
//! At most one dropdown panel is open at a time. Transitions return
//! [`DropdownEffect`] lists that the runtime applies to the view; the
//! machine itself never touches a document and never reads a clock —
//! the runtime owns the close timer and calls [`DropdownMachine::finish_close`]
//! when the transition window elapses.
//!
//! # States
//!
//! - `Closed` — no panel open.
//! - `Open(id)` — panel `id` fully open; its trigger is recorded (by the
//!   same id) for focus restoration.
//! - `Closing(id)` — visual collapse has begun (area, backdrop, and
//!   trigger already deactivated) but the panel stays active and
//!   tab-reachable until the transition window elapses. Decoupling the
//!   visual close (immediate) from the structural close (delayed) keeps
//!   the panel out of the half-visible, keyboard-focusable limbo an
//!   animated collapse would otherwise create.
//!
//! # Close-path asymmetry
//!
//! Re-triggering the open panel closes it through the animated path;
//! requesting a *different* panel swaps immediately with no animation
//! window. The asymmetry is deliberate: a snap swap avoids a flicker-prone
//! double animation when moving between adjacent menus.

#[cfg(feature = "tracing")]
use tracing::debug;

/// Side effects the runtime applies to the view, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEffect {
    /// Defensively deactivate every panel and trigger before opening.
    DeactivateAll,

    /// Open panel `id`: activate panel + backdrop + dropdown area, mark
    /// the trigger expanded and active, make the panel's interactive
    /// descendants tab-reachable. Cancels any pending structural close.
    OpenPanel(String),

    /// Begin the animated close of panel `id`: deactivate area, backdrop,
    /// and trigger immediately; leave the panel active and tab-reachable.
    /// The runtime arms the close timer for the transition duration.
    BeginClose(String),

    /// Finish the close of panel `id`: deactivate the panel and remove
    /// tab-reachability.
    FinishClose(String),

    /// Structurally close panel `id` at once (swap and cleanup paths):
    /// deactivate panel, area, backdrop, and trigger, remove
    /// tab-reachability. Cancels any pending structural close.
    SnapClose(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Closed,
    Open(String),
    Closing(String),
}

/// The dropdown state machine.
#[derive(Debug, Clone)]
pub struct DropdownMachine {
    phase: Phase,
}

impl DropdownMachine {
    /// Create the machine in the `Closed` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Closed,
        }
    }

    /// The open panel's id, if a panel is fully open.
    ///
    /// `None` while `Closed` or `Closing`: a collapsing panel is no
    /// longer a valid target for Escape or Tab wrapping.
    #[must_use]
    pub fn open_id(&self) -> Option<&str> {
        match &self.phase {
            Phase::Open(id) => Some(id),
            _ => None,
        }
    }

    /// Whether a panel is open or still collapsing.
    #[must_use]
    pub fn engaged(&self) -> bool {
        !matches!(self.phase, Phase::Closed)
    }

    /// Request that panel `id` be shown.
    ///
    /// - `Closed` → open `id`.
    /// - `Open(id)` (same id) → toggle off via the animated close.
    /// - `Open(other)` / `Closing(other)` → snap-close `other`, open `id`.
    /// - `Closing(id)` (same id) → cancel the close, reopen.
    pub fn request_show(&mut self, id: &str) -> Vec<DropdownEffect> {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Closed => self.open(id),
            Phase::Open(cur) if cur == id => {
                // Re-trigger on the open panel: toggle off, animated.
                self.phase = Phase::Open(cur);
                self.request_hide()
            }
            Phase::Open(cur) | Phase::Closing(cur) if cur != id => {
                #[cfg(feature = "tracing")]
                debug!(from = %cur, to = %id, "dropdown swap");
                let mut effects = vec![DropdownEffect::SnapClose(cur)];
                effects.extend(self.open(id));
                effects
            }
            // Closing(id): the panel is still collapsing; reopen it.
            Phase::Open(_) | Phase::Closing(_) => self.open(id),
        }
    }

    /// Request that the open panel be hidden (animated close).
    ///
    /// While `Closing`, re-emits `BeginClose` so the runtime re-arms the
    /// (single) close timer. No-op while `Closed`.
    pub fn request_hide(&mut self) -> Vec<DropdownEffect> {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Open(id) | Phase::Closing(id) => {
                #[cfg(feature = "tracing")]
                debug!(panel = %id, "dropdown hide requested");
                self.phase = Phase::Closing(id.clone());
                vec![DropdownEffect::BeginClose(id)]
            }
            Phase::Closed => Vec::new(),
        }
    }

    /// Complete a pending animated close (close-timer expiry).
    pub fn finish_close(&mut self) -> Vec<DropdownEffect> {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Closing(id) => {
                #[cfg(feature = "tracing")]
                debug!(panel = %id, "dropdown closed");
                vec![DropdownEffect::FinishClose(id)]
            }
            other => {
                self.phase = other;
                Vec::new()
            }
        }
    }

    /// Structurally close whatever is open or collapsing, at once.
    /// Used when leaving desktop mode.
    pub fn force_close(&mut self) -> Vec<DropdownEffect> {
        match std::mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Open(id) | Phase::Closing(id) => vec![DropdownEffect::SnapClose(id)],
            Phase::Closed => Vec::new(),
        }
    }

    fn open(&mut self, id: &str) -> Vec<DropdownEffect> {
        #[cfg(feature = "tracing")]
        debug!(panel = %id, "dropdown open");
        self.phase = Phase::Open(id.to_owned());
        vec![
            DropdownEffect::DeactivateAll,
            DropdownEffect::OpenPanel(id.to_owned()),
        ]
    }
}

impl Default for DropdownMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn show(machine: &mut DropdownMachine, id: &str) -> Vec<DropdownEffect> {
        machine.request_show(id)
    }

    // --- Transition tests ---

    #[test]
    fn show_from_closed_opens() {
        let mut m = DropdownMachine::new();
        let effects = show(&mut m, "products");
        assert_eq!(
            effects,
            vec![
                DropdownEffect::DeactivateAll,
                DropdownEffect::OpenPanel("products".into()),
            ]
        );
        assert_eq!(m.open_id(), Some("products"));
    }

    #[test]
    fn same_id_toggles_off_animated() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        let effects = show(&mut m, "products");
        assert_eq!(effects, vec![DropdownEffect::BeginClose("products".into())]);
        assert_eq!(m.open_id(), None);
        assert!(m.engaged());
    }

    #[test]
    fn different_id_swaps_without_animation() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        let effects = show(&mut m, "solutions");
        assert_eq!(
            effects,
            vec![
                DropdownEffect::SnapClose("products".into()),
                DropdownEffect::DeactivateAll,
                DropdownEffect::OpenPanel("solutions".into()),
            ]
        );
        assert_eq!(m.open_id(), Some("solutions"));
    }

    #[test]
    fn hide_then_finish_reaches_closed() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        assert_eq!(
            m.request_hide(),
            vec![DropdownEffect::BeginClose("products".into())]
        );
        assert!(m.engaged());
        assert_eq!(
            m.finish_close(),
            vec![DropdownEffect::FinishClose("products".into())]
        );
        assert!(!m.engaged());
    }

    #[test]
    fn show_while_closing_same_id_reopens() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        m.request_hide();
        let effects = show(&mut m, "products");
        assert_eq!(
            effects,
            vec![
                DropdownEffect::DeactivateAll,
                DropdownEffect::OpenPanel("products".into()),
            ]
        );
        assert_eq!(m.open_id(), Some("products"));
        // The stale close must no longer complete.
        assert_eq!(m.finish_close(), Vec::new());
    }

    #[test]
    fn show_while_closing_other_id_snaps_old() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        m.request_hide();
        let effects = show(&mut m, "solutions");
        assert_eq!(effects[0], DropdownEffect::SnapClose("products".into()));
        assert_eq!(m.open_id(), Some("solutions"));
    }

    #[test]
    fn hide_while_closing_reemits_begin_close() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        m.request_hide();
        // A second hide re-arms the (single) close timer.
        assert_eq!(
            m.request_hide(),
            vec![DropdownEffect::BeginClose("products".into())]
        );
    }

    #[test]
    fn noops_when_closed() {
        let mut m = DropdownMachine::new();
        assert_eq!(m.request_hide(), Vec::new());
        assert_eq!(m.finish_close(), Vec::new());
        assert_eq!(m.force_close(), Vec::new());
    }

    #[test]
    fn force_close_from_open_and_closing() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        assert_eq!(
            m.force_close(),
            vec![DropdownEffect::SnapClose("products".into())]
        );

        show(&mut m, "products");
        m.request_hide();
        assert_eq!(
            m.force_close(),
            vec![DropdownEffect::SnapClose("products".into())]
        );
        assert!(!m.engaged());
    }

    #[test]
    fn finish_close_does_not_disturb_open() {
        let mut m = DropdownMachine::new();
        show(&mut m, "products");
        assert_eq!(m.finish_close(), Vec::new());
        assert_eq!(m.open_id(), Some("products"));
    }

    // --- Property: at most one active panel after settling ---

    /// Replays effects into the set of panels carrying the active state,
    /// the way a view would.
    fn replay(active: &mut BTreeSet<String>, effects: &[DropdownEffect]) {
        for effect in effects {
            match effect {
                DropdownEffect::DeactivateAll => active.clear(),
                DropdownEffect::OpenPanel(id) => {
                    active.insert(id.clone());
                }
                DropdownEffect::FinishClose(id) | DropdownEffect::SnapClose(id) => {
                    active.remove(id);
                }
                // BeginClose leaves the panel visually active until the
                // transition window elapses.
                DropdownEffect::BeginClose(_) => {}
            }
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Show(u8),
        Hide,
        FinishClose,
    }

    proptest! {
        #[test]
        fn at_most_one_active_after_settling(ops in proptest::collection::vec(
            prop_oneof![
                (0u8..4).prop_map(Op::Show),
                Just(Op::Hide),
                Just(Op::FinishClose),
            ],
            0..40,
        )) {
            let ids = ["products", "solutions", "resources", "company"];
            let mut m = DropdownMachine::new();
            let mut active = BTreeSet::new();

            for op in &ops {
                let effects = match op {
                    Op::Show(i) => m.request_show(ids[*i as usize]),
                    Op::Hide => m.request_hide(),
                    Op::FinishClose => m.finish_close(),
                };
                replay(&mut active, &effects);
                // Mid-sequence: never more than one active panel.
                prop_assert!(active.len() <= 1);
            }

            // Settle any pending animated close.
            replay(&mut active, &m.finish_close());
            prop_assert!(active.len() <= 1);
            match m.open_id() {
                Some(id) => prop_assert!(active.contains(id)),
                None => prop_assert!(active.is_empty()),
            }
        }
    }
}
