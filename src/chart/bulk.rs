//! Bulk annotation of the teeth picked up during a session.

use super::selection::SelectionModel;
use super::session::SessionTracker;
use super::tooth::ToothId;

/// Commit/cancel dialog for writing one summary to every pending tooth.
#[derive(Debug, Default, Clone)]
pub struct BulkAnnotation {
    /// Teeth the dialog was opened for, `None` while closed
    open_for: Option<Vec<ToothId>>,
}

impl BulkAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open_for.is_some()
    }

    /// Teeth shown in the dialog title
    pub fn teeth(&self) -> &[ToothId] {
        self.open_for.as_deref().unwrap_or_default()
    }

    /// Open the dialog when more than one tooth is pending.
    pub fn open_if_eligible(&mut self, pending: &[ToothId]) -> bool {
        if pending.len() <= 1 {
            return false;
        }
        self.open_for = Some(pending.to_vec());
        true
    }

    /// Write `text` to every pending tooth and close the dialog.
    ///
    /// Blank text is rejected and leaves everything as it was. Returns the
    /// number of teeth annotated.
    pub fn commit(
        &mut self,
        text: &str,
        session: &mut SessionTracker,
        selection: &mut SelectionModel,
    ) -> Option<usize> {
        if !self.is_open() {
            log::warn!("bulk commit with no open dialog; ignoring");
            return None;
        }
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let teeth = session.pending().to_vec();
        for &tooth in &teeth {
            selection.set_summary(tooth, text);
        }
        log::info!("bulk annotation applied to {} teeth", teeth.len());

        self.close(session);
        Some(teeth.len())
    }

    /// Undo the session's provisional selections and close the dialog.
    ///
    /// Pending teeth that picked up a summary some other way stay selected.
    /// Returns the number of teeth deselected.
    pub fn cancel(
        &mut self,
        session: &mut SessionTracker,
        selection: &mut SelectionModel,
    ) -> Option<usize> {
        if !self.is_open() {
            return None;
        }

        let mut removed = 0;
        for tooth in session.pending().to_vec() {
            if !selection.has_summary(tooth) && selection.remove(tooth) {
                removed += 1;
            }
        }
        log::info!("bulk annotation cancelled, {removed} teeth deselected");

        self.close(session);
        Some(removed)
    }

    fn close(&mut self, session: &mut SessionTracker) {
        self.open_for = None;
        session.resolve();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(fdi: u8) -> ToothId {
        ToothId::new(fdi).unwrap()
    }

    /// Selection with 11 pre-annotated, then a session that picked up 12 and 13.
    fn awaiting_decision() -> (BulkAnnotation, SessionTracker, SelectionModel) {
        let mut selection =
            SelectionModel::from_snapshot([t(11)], [(t(11), "crown".to_string())]);
        let mut session = SessionTracker::new();
        session.begin_if_needed(true);
        session.record_ctrl_click(&mut selection, t(12));
        session.record_ctrl_click(&mut selection, t(13));
        let pending = session.end_session();

        let mut bulk = BulkAnnotation::new();
        assert!(bulk.open_if_eligible(&pending));
        (bulk, session, selection)
    }

    #[test]
    fn open_requires_more_than_one_pending_tooth() {
        let mut bulk = BulkAnnotation::new();
        assert!(!bulk.open_if_eligible(&[]));
        assert!(!bulk.open_if_eligible(&[t(11)]));
        assert!(!bulk.is_open());
        assert!(bulk.open_if_eligible(&[t(11), t(12)]));
        assert_eq!(bulk.teeth(), &[t(11), t(12)]);
    }

    #[test]
    fn commit_writes_only_pending_teeth() {
        let (mut bulk, mut session, mut selection) = awaiting_decision();

        assert_eq!(bulk.commit("cavity", &mut session, &mut selection), Some(2));
        assert_eq!(selection.summary(t(11)), Some("crown"));
        assert_eq!(selection.summary(t(12)), Some("cavity"));
        assert_eq!(selection.summary(t(13)), Some("cavity"));
        assert!(!bulk.is_open());
        assert!(session.pending().is_empty());
    }

    #[test]
    fn commit_with_blank_text_changes_nothing() {
        let (mut bulk, mut session, mut selection) = awaiting_decision();

        assert_eq!(bulk.commit("   ", &mut session, &mut selection), None);
        assert!(bulk.is_open());
        assert_eq!(session.pending(), &[t(12), t(13)]);
        assert!(!selection.has_summary(t(12)));
    }

    #[test]
    fn cancel_deselects_unannotated_pending_teeth() {
        let (mut bulk, mut session, mut selection) = awaiting_decision();

        assert_eq!(bulk.cancel(&mut session, &mut selection), Some(2));
        assert_eq!(selection.selected(), &[t(11)]);
        assert_eq!(selection.summary(t(11)), Some("crown"));
        assert!(!bulk.is_open());
    }

    #[test]
    fn cancel_keeps_pending_teeth_that_gained_a_summary() {
        let (mut bulk, mut session, mut selection) = awaiting_decision();
        selection.set_summary(t(13), "noted elsewhere");

        assert_eq!(bulk.cancel(&mut session, &mut selection), Some(1));
        assert!(!selection.contains(t(12)));
        assert_eq!(selection.summary(t(13)), Some("noted elsewhere"));
    }

    #[test]
    fn commit_and_cancel_require_open_dialog() {
        let mut bulk = BulkAnnotation::new();
        let mut session = SessionTracker::new();
        let mut selection = SelectionModel::new();
        assert_eq!(bulk.commit("x", &mut session, &mut selection), None);
        assert_eq!(bulk.cancel(&mut session, &mut selection), None);
    }
}
