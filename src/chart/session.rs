//! Multi-select session tracking.
//!
//! A session spans the time a modifier key is held across tooth clicks. It
//! accumulates the "pending" teeth: teeth newly selected during the session
//! that had no summary when they were added. Those are the candidates for a
//! bulk annotation once the modifier is released.

use super::selection::{SelectionModel, Toggled};
use super::tooth::{resolve_range, ToothId};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No modifier session in progress
    #[default]
    Idle,
    /// Modifier held, clicks accumulate pending teeth
    Active,
    /// Modifier released with several pending teeth; waiting on the bulk dialog
    AwaitingDecision,
}

impl SessionState {
    /// Short label for the status line
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionState::Idle => "IDLE",
            SessionState::Active => "MULTI",
            SessionState::AwaitingDecision => "BULK",
        }
    }
}

/// Tracks the current session and its pending set.
///
/// Pending teeth are always a subset of the selection; every path that
/// deselects a pending tooth also drops it from the pending set.
#[derive(Debug, Default, Clone)]
pub struct SessionTracker {
    state: SessionState,
    /// In the order the teeth were added
    pending: Vec<ToothId>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn pending(&self) -> &[ToothId] {
        &self.pending
    }

    pub fn is_pending(&self, tooth: ToothId) -> bool {
        self.pending.contains(&tooth)
    }

    /// Start a session on a modified click if none is running.
    ///
    /// Starting always clears the pending set, so leftovers from a session
    /// whose modifier release never arrived cannot leak into this one.
    /// Returns true when a new session started.
    pub fn begin_if_needed(&mut self, modifier_active: bool) -> bool {
        if !modifier_active || self.state != SessionState::Idle {
            return false;
        }
        if !self.pending.is_empty() {
            log::debug!(
                "discarding {} stale pending teeth from an unfinished session",
                self.pending.len()
            );
        }
        self.pending.clear();
        self.state = SessionState::Active;
        log::debug!("multi-select session started");
        true
    }

    /// Toggle a tooth as part of the session.
    ///
    /// An added tooth becomes pending only if it had no summary beforehand. A
    /// removed tooth always leaves the pending set.
    pub fn record_ctrl_click(&mut self, selection: &mut SelectionModel, tooth: ToothId) -> Toggled {
        let had_summary = selection.has_summary(tooth);
        let toggled = selection.toggle(tooth);
        match toggled {
            Toggled::Added if !had_summary => self.add_pending(tooth),
            Toggled::Added => {}
            Toggled::Removed => self.forget(tooth),
        }
        toggled
    }

    /// Select every tooth between `anchor` and `tooth` as part of the session.
    ///
    /// Teeth that were already selected or already carry a summary are left
    /// out of the pending set. Returns the teeth newly added to the selection.
    pub fn record_shift_click(
        &mut self,
        selection: &mut SelectionModel,
        tooth: ToothId,
        anchor: ToothId,
    ) -> Vec<ToothId> {
        let range = resolve_range(anchor, tooth);
        if range.is_empty() {
            log::warn!("no range between {anchor} and {tooth}; ignoring shift click");
            return Vec::new();
        }

        let mut added = Vec::new();
        for t in range {
            let had_summary = selection.has_summary(t);
            if selection.insert(t) {
                if !had_summary {
                    self.add_pending(t);
                }
                added.push(t);
            }
        }
        // The clicked tooth keeps focus even when the range ran towards the anchor
        selection.set_focus(tooth);
        added
    }

    /// Close the active session on modifier release.
    ///
    /// Returns the pending set and moves to `AwaitingDecision`; the session
    /// only returns to idle once [`SessionTracker::resolve`] is called. Calling
    /// this when no session is active returns an empty list and changes nothing.
    pub fn end_session(&mut self) -> Vec<ToothId> {
        if self.state != SessionState::Active {
            return Vec::new();
        }
        self.state = SessionState::AwaitingDecision;
        log::debug!("session ended with {} pending teeth", self.pending.len());
        self.pending.clone()
    }

    /// Return to idle and clear the pending set.
    pub fn resolve(&mut self) {
        self.pending.clear();
        self.state = SessionState::Idle;
    }

    /// Drop a tooth from the pending set without otherwise touching the session.
    pub fn forget(&mut self, tooth: ToothId) {
        self.pending.retain(|&t| t != tooth);
    }

    fn add_pending(&mut self, tooth: ToothId) {
        if !self.pending.contains(&tooth) {
            self.pending.push(tooth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::tooth::traversal_order;
    use proptest::prelude::*;

    fn t(fdi: u8) -> ToothId {
        ToothId::new(fdi).unwrap()
    }

    #[test]
    fn begin_only_starts_from_idle_with_modifier() {
        let mut tracker = SessionTracker::new();
        assert!(!tracker.begin_if_needed(false));
        assert_eq!(tracker.state(), SessionState::Idle);

        assert!(tracker.begin_if_needed(true));
        assert!(tracker.is_active());
        assert!(!tracker.begin_if_needed(true));
    }

    #[test]
    fn ctrl_click_adds_unannotated_tooth_to_pending() {
        let mut selection = SelectionModel::new();
        let mut tracker = SessionTracker::new();
        tracker.begin_if_needed(true);

        tracker.record_ctrl_click(&mut selection, t(11));
        tracker.record_ctrl_click(&mut selection, t(12));
        assert_eq!(tracker.pending(), &[t(11), t(12)]);
    }

    #[test]
    fn ctrl_click_removal_drops_tooth_from_pending() {
        let mut selection = SelectionModel::new();
        let mut tracker = SessionTracker::new();
        tracker.begin_if_needed(true);

        tracker.record_ctrl_click(&mut selection, t(11));
        tracker.record_ctrl_click(&mut selection, t(11));
        assert!(tracker.pending().is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn ctrl_click_removal_of_preselected_tooth_is_harmless() {
        let mut selection =
            SelectionModel::from_snapshot([t(21)], [(t(21), "filled".to_string())]);
        let mut tracker = SessionTracker::new();
        tracker.begin_if_needed(true);

        tracker.record_ctrl_click(&mut selection, t(21));
        assert!(!selection.contains(t(21)));
        assert!(!selection.has_summary(t(21)));
        assert!(tracker.pending().is_empty());
    }

    #[test]
    fn shift_click_skips_selected_and_annotated_teeth() {
        let mut selection = SelectionModel::from_snapshot(
            [t(12), t(13)],
            [(t(13), "bridge".to_string())],
        );
        let mut tracker = SessionTracker::new();
        tracker.begin_if_needed(true);

        let added = tracker.record_shift_click(&mut selection, t(11), t(14));
        assert_eq!(added, vec![t(14), t(11)]);
        assert_eq!(tracker.pending(), &[t(14), t(11)]);
        for fdi in [11, 12, 13, 14] {
            assert!(selection.contains(t(fdi)));
        }
        assert_eq!(selection.focus(), Some(t(11)));
    }

    #[test]
    fn end_session_waits_for_resolve_before_going_idle() {
        let mut selection = SelectionModel::new();
        let mut tracker = SessionTracker::new();
        tracker.begin_if_needed(true);
        tracker.record_ctrl_click(&mut selection, t(11));
        tracker.record_ctrl_click(&mut selection, t(12));

        let pending = tracker.end_session();
        assert_eq!(pending, vec![t(11), t(12)]);
        assert_eq!(tracker.state(), SessionState::AwaitingDecision);
        assert_eq!(tracker.pending(), &[t(11), t(12)]);

        tracker.resolve();
        assert_eq!(tracker.state(), SessionState::Idle);
        assert!(tracker.pending().is_empty());
    }

    #[test]
    fn end_session_is_idempotent() {
        let mut tracker = SessionTracker::new();
        assert!(tracker.end_session().is_empty());
        assert_eq!(tracker.state(), SessionState::Idle);

        tracker.begin_if_needed(true);
        tracker.end_session();
        assert!(tracker.end_session().is_empty());
        assert_eq!(tracker.state(), SessionState::AwaitingDecision);
    }

    #[test]
    fn begin_discards_stale_pending_teeth() {
        let mut selection = SelectionModel::new();
        let mut tracker = SessionTracker::new();
        tracker.begin_if_needed(true);
        tracker.record_ctrl_click(&mut selection, t(11));
        // Release never arrived; the host forces the session back to idle
        // without clearing, then a new session starts.
        tracker.state = SessionState::Idle;

        tracker.begin_if_needed(true);
        assert!(tracker.pending().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Click {
        Ctrl(ToothId),
        Shift(ToothId, ToothId),
    }

    fn tooth_strategy() -> impl Strategy<Value = ToothId> {
        prop::sample::select(traversal_order().collect::<Vec<_>>())
    }

    fn click_strategy() -> impl Strategy<Value = Click> {
        prop_oneof![
            tooth_strategy().prop_map(Click::Ctrl),
            (tooth_strategy(), tooth_strategy()).prop_map(|(a, b)| Click::Shift(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn pending_is_always_subset_of_selection(
            initial in prop::collection::vec(tooth_strategy(), 0..8),
            clicks in prop::collection::vec(click_strategy(), 1..40),
        ) {
            let mut selection = SelectionModel::from_snapshot(initial, std::iter::empty());
            let mut tracker = SessionTracker::new();
            tracker.begin_if_needed(true);

            for click in clicks {
                match click {
                    Click::Ctrl(tooth) => {
                        tracker.record_ctrl_click(&mut selection, tooth);
                    }
                    Click::Shift(tooth, anchor) => {
                        tracker.record_shift_click(&mut selection, tooth, anchor);
                    }
                }
                for pending in tracker.pending() {
                    prop_assert!(selection.contains(*pending));
                    prop_assert!(!selection.has_summary(*pending));
                }
            }
        }

        #[test]
        fn shift_click_selects_same_teeth_in_either_direction(
            a in tooth_strategy(),
            b in tooth_strategy(),
        ) {
            let mut forward = SelectionModel::new();
            let mut backward = SelectionModel::new();
            let mut tracker = SessionTracker::new();

            tracker.begin_if_needed(true);
            tracker.record_shift_click(&mut forward, b, a);
            let mut forward_pending = tracker.pending().to_vec();
            tracker.resolve();

            tracker.begin_if_needed(true);
            tracker.record_shift_click(&mut backward, a, b);
            let mut backward_pending = tracker.pending().to_vec();

            let mut forward_selected = forward.snapshot_selection();
            let mut backward_selected = backward.snapshot_selection();
            forward_selected.sort();
            backward_selected.sort();
            forward_pending.sort();
            backward_pending.sort();
            prop_assert_eq!(forward_selected, backward_selected);
            prop_assert_eq!(forward_pending, backward_pending);
        }
    }
}
