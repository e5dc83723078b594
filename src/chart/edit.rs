//! Inline editing of a single tooth's summary.

use super::selection::SelectionModel;
use super::tooth::ToothId;

/// An edit in progress for one selected tooth.
///
/// Holds no text of its own beyond the value it was opened with; the input
/// widget owns the draft and hands it back on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDraft {
    tooth: ToothId,
    original: Option<String>,
}

impl SummaryDraft {
    /// Open an edit for a selected tooth, pre-filled with its current summary.
    pub fn begin(selection: &SelectionModel, tooth: ToothId) -> Option<Self> {
        if !selection.contains(tooth) {
            log::warn!("edit requested for unselected tooth {tooth}; ignoring");
            return None;
        }
        Some(Self {
            tooth,
            original: selection.summary(tooth).map(str::to_string),
        })
    }

    pub fn tooth(&self) -> ToothId {
        self.tooth
    }

    /// Text to pre-fill the input with
    pub fn initial_text(&self) -> &str {
        self.original.as_deref().unwrap_or("")
    }

    /// Write the edited text. Blank text clears the summary.
    ///
    /// Returns false when the tooth was deselected while the draft was open.
    pub fn save(self, selection: &mut SelectionModel, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            selection.remove_summary(self.tooth);
            return selection.contains(self.tooth);
        }
        selection.set_summary(self.tooth, text)
    }
}
