//! Selected teeth and their summaries.

use std::collections::BTreeMap;

use super::tooth::ToothId;

/// Result of toggling a tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Ordered selection set plus per-tooth summaries and the focus tooth.
///
/// Every summary key is a member of the selection; removing a tooth drops its
/// summary in the same call. The focus tooth is always `None` or selected.
#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    /// Insertion-ordered, no duplicates
    selected: Vec<ToothId>,
    summaries: BTreeMap<ToothId, String>,
    focus: Option<ToothId>,
    /// Bumped whenever the selection set changes
    selection_generation: u64,
    /// Bumped whenever the selection set or any summary changes
    revision: u64,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from a caller-supplied snapshot.
    ///
    /// Duplicate selections are collapsed and summaries for unselected teeth
    /// are dropped. Focus starts on the most recently selected tooth.
    pub fn from_snapshot(
        selection: impl IntoIterator<Item = ToothId>,
        summaries: impl IntoIterator<Item = (ToothId, String)>,
    ) -> Self {
        let mut model = Self::new();
        for tooth in selection {
            if model.selected.contains(&tooth) {
                log::warn!("snapshot selects tooth {tooth} twice; ignoring duplicate");
                continue;
            }
            model.selected.push(tooth);
        }
        for (tooth, text) in summaries {
            if model.selected.contains(&tooth) {
                model.summaries.insert(tooth, text);
            } else {
                log::warn!("snapshot has a summary for unselected tooth {tooth}; dropping it");
            }
        }
        model.focus = model.selected.last().copied();
        model
    }

    pub fn contains(&self, tooth: ToothId) -> bool {
        self.selected.contains(&tooth)
    }

    /// Selected teeth in the order they were selected
    pub fn selected(&self) -> &[ToothId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn summary(&self, tooth: ToothId) -> Option<&str> {
        self.summaries.get(&tooth).map(String::as_str)
    }

    pub fn has_summary(&self, tooth: ToothId) -> bool {
        self.summaries.contains_key(&tooth)
    }

    pub fn summaries(&self) -> &BTreeMap<ToothId, String> {
        &self.summaries
    }

    pub fn focus(&self) -> Option<ToothId> {
        self.focus
    }

    pub fn selection_generation(&self) -> u64 {
        self.selection_generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The ordered selection set, as handed to the persistence layer.
    pub fn snapshot_selection(&self) -> Vec<ToothId> {
        self.selected.clone()
    }

    /// Remove the tooth if selected, otherwise select and focus it.
    pub fn toggle(&mut self, tooth: ToothId) -> Toggled {
        if self.remove(tooth) {
            Toggled::Removed
        } else {
            self.insert(tooth);
            Toggled::Added
        }
    }

    /// Select and focus a tooth. Returns false when it was already selected.
    pub fn insert(&mut self, tooth: ToothId) -> bool {
        if self.contains(tooth) {
            return false;
        }
        self.selected.push(tooth);
        self.focus = Some(tooth);
        self.mark_selection_changed();
        true
    }

    /// Deselect a tooth along with its summary. Returns false when it was not selected.
    ///
    /// If the tooth had focus, focus moves to the most recently selected
    /// remaining tooth.
    pub fn remove(&mut self, tooth: ToothId) -> bool {
        let Some(index) = self.selected.iter().position(|&t| t == tooth) else {
            return false;
        };
        self.selected.remove(index);
        self.summaries.remove(&tooth);
        if self.focus == Some(tooth) {
            self.focus = self.selected.last().copied();
        }
        self.mark_selection_changed();
        true
    }

    /// Write a summary for a selected tooth.
    ///
    /// Returns false (and leaves the model untouched) when the tooth is not selected.
    pub fn set_summary(&mut self, tooth: ToothId, text: impl Into<String>) -> bool {
        if !self.contains(tooth) {
            log::warn!("set_summary on unselected tooth {tooth}; ignoring");
            return false;
        }
        let text = text.into();
        if self.summaries.get(&tooth) != Some(&text) {
            self.summaries.insert(tooth, text);
            self.revision += 1;
        }
        true
    }

    /// Delete a tooth's summary if present.
    pub fn remove_summary(&mut self, tooth: ToothId) -> bool {
        let removed = self.summaries.remove(&tooth).is_some();
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Move focus to a selected tooth. Returns false when the tooth is not selected.
    pub fn set_focus(&mut self, tooth: ToothId) -> bool {
        if !self.contains(tooth) {
            return false;
        }
        self.focus = Some(tooth);
        true
    }

    /// Step focus through the selection in selection order, wrapping around.
    pub fn cycle_focus(&mut self, forward: bool) {
        if self.selected.is_empty() {
            self.focus = None;
            return;
        }
        let len = self.selected.len();
        let next = match self
            .focus
            .and_then(|f| self.selected.iter().position(|&t| t == f))
        {
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
            None => 0,
        };
        self.focus = Some(self.selected[next]);
    }

    fn mark_selection_changed(&mut self) {
        self.selection_generation += 1;
        self.revision += 1;
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
    fn toggle_adds_then_removes() {
        let mut model = SelectionModel::new();
        assert_eq!(model.toggle(t(11)), Toggled::Added);
        assert_eq!(model.selected(), &[t(11)]);
        assert_eq!(model.focus(), Some(t(11)));

        assert_eq!(model.toggle(t(11)), Toggled::Removed);
        assert!(model.is_empty());
        assert_eq!(model.focus(), None);
    }

    #[test]
    fn removing_a_tooth_drops_its_summary() {
        let mut model = SelectionModel::new();
        model.toggle(t(21));
        assert!(model.set_summary(t(21), "filled"));
        model.toggle(t(21));
        assert!(!model.has_summary(t(21)));
        assert!(model.summaries().is_empty());
    }

    #[test]
    fn set_summary_on_unselected_tooth_is_rejected() {
        let mut model = SelectionModel::new();
        assert!(!model.set_summary(t(36), "crown"));
        assert!(model.summaries().is_empty());
        assert_eq!(model.revision(), 0);
    }

    #[test]
    fn remove_summary_never_fails() {
        let mut model = SelectionModel::new();
        assert!(!model.remove_summary(t(36)));
        model.toggle(t(36));
        model.set_summary(t(36), "crown");
        assert!(model.remove_summary(t(36)));
        assert!(model.contains(t(36)));
    }

    #[test]
    fn focus_follows_most_recent_selection_on_removal() {
        let mut model = SelectionModel::new();
        model.toggle(t(11));
        model.toggle(t(12));
        model.toggle(t(13));
        model.set_focus(t(12));

        model.remove(t(12));
        assert_eq!(model.focus(), Some(t(13)));

        model.remove(t(11));
        assert_eq!(model.focus(), Some(t(13)));

        model.remove(t(13));
        assert_eq!(model.focus(), None);
    }

    #[test]
    fn from_snapshot_drops_orphan_summaries_and_duplicates() {
        let model = SelectionModel::from_snapshot(
            [t(11), t(12), t(11)],
            [(t(11), "caries".to_string()), (t(46), "orphan".to_string())],
        );
        assert_eq!(model.selected(), &[t(11), t(12)]);
        assert_eq!(model.summary(t(11)), Some("caries"));
        assert!(!model.has_summary(t(46)));
        assert_eq!(model.focus(), Some(t(12)));
    }

    #[test]
    fn cycle_focus_wraps_in_both_directions() {
        let mut model = SelectionModel::new();
        model.toggle(t(11));
        model.toggle(t(12));
        model.toggle(t(13));

        model.cycle_focus(true);
        assert_eq!(model.focus(), Some(t(11)));
        model.cycle_focus(false);
        assert_eq!(model.focus(), Some(t(13)));
    }

    #[test]
    fn unchanged_summary_does_not_bump_revision() {
        let mut model = SelectionModel::new();
        model.toggle(t(11));
        model.set_summary(t(11), "sealant");
        let revision = model.revision();
        model.set_summary(t(11), "sealant");
        assert_eq!(model.revision(), revision);
    }

    fn tooth_strategy() -> impl Strategy<Value = ToothId> {
        prop::sample::select(traversal_order().collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn toggle_twice_restores_selection_and_clears_summary(
            initial in prop::collection::vec(tooth_strategy(), 0..10),
            tooth in tooth_strategy(),
        ) {
            let mut model = SelectionModel::from_snapshot(initial, std::iter::empty());
            let before = model.snapshot_selection();
            let had_tooth = model.contains(tooth);

            model.toggle(tooth);
            if model.contains(tooth) {
                model.set_summary(tooth, "temporary");
            }
            model.toggle(tooth);

            let mut after = model.snapshot_selection();
            let mut expected = before;
            // Re-adding a tooth moves it to the end of the selection order
            after.sort();
            expected.sort();
            prop_assert_eq!(after, expected);
            if !had_tooth {
                prop_assert!(!model.has_summary(tooth));
            }
        }
    }
}
