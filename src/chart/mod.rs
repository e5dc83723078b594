//! Dental chart selection and bulk-annotation engine.
//!
//! [`Chart`] is the component the host mounts. It routes pointer and key
//! gestures through three cooperating pieces:
//! - [`SelectionModel`]: selected teeth, their summaries and the focus tooth
//! - [`SessionTracker`]: modifier-held sessions and their pending teeth
//! - [`BulkAnnotation`]: the commit/cancel dialog opened on modifier release
//!
//! Every gesture runs to completion inside one call, so no caller can observe
//! a half-applied transition.

pub mod bulk;
pub mod edit;
pub mod selection;
pub mod session;
pub mod tooth;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use bulk::BulkAnnotation;
pub use edit::SummaryDraft;
pub use selection::{SelectionModel, Toggled};
pub use session::{SessionState, SessionTracker};
pub use tooth::{resolve_range, segments, ArchSegment, Dentition, ToothId};

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Ctrl or Cmd: toggle one tooth into the session
    pub toggle: bool,
    /// Shift: select a range from the last-selected anchor
    pub range: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        toggle: false,
        range: false,
    };
    pub const TOGGLE: Self = Self {
        toggle: true,
        range: false,
    };
    pub const RANGE: Self = Self {
        toggle: false,
        range: true,
    };

    pub fn any(self) -> bool {
        self.toggle || self.range
    }
}

/// Chart state handed to and from the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub selection: Vec<ToothId>,
    #[serde(default)]
    pub summaries: BTreeMap<ToothId, String>,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Read-only chart, or the bulk dialog is waiting on a decision
    Ignored,
    /// A single tooth was toggled
    Toggled(Toggled),
    /// A range click added these teeth
    Range(Vec<ToothId>),
}

/// What releasing the modifier keys did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No session was active
    NoSession,
    /// Session closed without a dialog (zero or one pending teeth)
    Closed,
    /// Bulk dialog opened for this many teeth
    DialogOpened(usize),
}

/// What an Escape press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    Nothing,
    /// Bulk dialog cancelled, with the number of teeth deselected
    BulkCancelled(usize),
    EditCancelled,
}

/// Callback receiving the ordered selection set after every change.
pub type SelectionListener = Box<dyn FnMut(&[ToothId])>;

/// The interactive odontogram state for one mounted chart.
pub struct Chart {
    selection: SelectionModel,
    session: SessionTracker,
    bulk: BulkAnnotation,
    draft: Option<SummaryDraft>,
    /// Most recent tooth acted on by any click; start of the next range
    anchor: Option<ToothId>,
    read_only: bool,
    listener: Option<SelectionListener>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    /// Create an empty, editable chart
    pub fn new() -> Self {
        Self::from_snapshot(ChartSnapshot::default(), false)
    }

    /// Mount a chart from a caller-supplied snapshot.
    pub fn from_snapshot(snapshot: ChartSnapshot, read_only: bool) -> Self {
        Self {
            selection: SelectionModel::from_snapshot(snapshot.selection, snapshot.summaries),
            session: SessionTracker::new(),
            bulk: BulkAnnotation::new(),
            draft: None,
            anchor: None,
            read_only,
            listener: None,
        }
    }

    /// Register the outbound selection-change callback.
    pub fn on_selection_change(&mut self, listener: SelectionListener) {
        self.listener = Some(listener);
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn pending(&self) -> &[ToothId] {
        self.session.pending()
    }

    pub fn is_pending(&self, tooth: ToothId) -> bool {
        self.session.is_pending(tooth)
    }

    /// Teeth the bulk dialog is open for, empty when closed
    pub fn bulk_teeth(&self) -> &[ToothId] {
        self.bulk.teeth()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.bulk.is_open()
    }

    pub fn anchor(&self) -> Option<ToothId> {
        self.anchor
    }

    pub fn focus(&self) -> Option<ToothId> {
        self.selection.focus()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Tooth whose summary is being edited inline, if any
    pub fn editing(&self) -> Option<&SummaryDraft> {
        self.draft.as_ref()
    }

    /// Counter that advances on every selection or summary change
    pub fn revision(&self) -> u64 {
        self.selection.revision()
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            selection: self.selection.snapshot_selection(),
            summaries: self.selection.summaries().clone(),
        }
    }

    /// Handle a click on a tooth.
    ///
    /// Modified clicks run inside a session; an unmodified click ends any
    /// active session without opening the dialog and toggles the tooth.
    pub fn click(&mut self, tooth: ToothId, modifiers: Modifiers) -> ClickOutcome {
        if self.read_only {
            log::debug!("click on {tooth} ignored: chart is read-only");
            return ClickOutcome::Ignored;
        }
        if self.bulk.is_open() {
            log::debug!("click on {tooth} ignored: bulk dialog is open");
            return ClickOutcome::Ignored;
        }

        let generation = self.selection.selection_generation();
        let outcome = if modifiers.any() {
            self.session.begin_if_needed(true);
            match self.anchor {
                Some(anchor) if modifiers.range => ClickOutcome::Range(
                    self.session
                        .record_shift_click(&mut self.selection, tooth, anchor),
                ),
                _ => ClickOutcome::Toggled(
                    self.session.record_ctrl_click(&mut self.selection, tooth),
                ),
            }
        } else {
            if self.session.is_active() {
                log::debug!("unmodified click ends the session without a dialog");
                self.session.resolve();
            }
            ClickOutcome::Toggled(self.selection.toggle(tooth))
        };

        self.anchor = Some(tooth);
        self.drop_stale_draft();
        self.emit_if_changed(generation);
        outcome
    }

    /// Handle release of the modifier keys.
    ///
    /// Safe to call any number of times; only the first call after a
    /// session's last click has an effect.
    pub fn release_modifiers(&mut self) -> ReleaseOutcome {
        if !self.session.is_active() {
            return ReleaseOutcome::NoSession;
        }
        let pending = self.session.end_session();
        if self.bulk.open_if_eligible(&pending) {
            log::debug!("bulk dialog opened for {} teeth", pending.len());
            ReleaseOutcome::DialogOpened(pending.len())
        } else {
            self.session.resolve();
            ReleaseOutcome::Closed
        }
    }

    /// Commit the bulk dialog. Returns the number of teeth annotated, or
    /// `None` when the dialog is closed or the text is blank.
    pub fn commit_bulk(&mut self, text: &str) -> Option<usize> {
        if self.read_only {
            return None;
        }
        self.bulk
            .commit(text, &mut self.session, &mut self.selection)
    }

    /// Cancel the bulk dialog. Returns the number of teeth deselected.
    pub fn cancel_bulk(&mut self) -> Option<usize> {
        let generation = self.selection.selection_generation();
        let removed = self.bulk.cancel(&mut self.session, &mut self.selection);
        self.drop_stale_draft();
        self.emit_if_changed(generation);
        removed
    }

    /// Escape closes the bulk dialog first, then an inline edit.
    pub fn escape(&mut self) -> EscapeOutcome {
        if let Some(removed) = self.cancel_bulk() {
            EscapeOutcome::BulkCancelled(removed)
        } else if self.cancel_edit() {
            EscapeOutcome::EditCancelled
        } else {
            EscapeOutcome::Nothing
        }
    }

    /// Remove a tooth and its summary.
    ///
    /// During an active session the tooth also leaves the pending set; the
    /// session itself keeps running and no dialog is opened.
    pub fn delete(&mut self, tooth: ToothId) -> bool {
        if self.read_only || self.bulk.is_open() {
            return false;
        }
        let generation = self.selection.selection_generation();
        let removed = self.selection.remove(tooth);
        if removed {
            self.session.forget(tooth);
            self.drop_stale_draft();
        } else {
            log::warn!("delete requested for unselected tooth {tooth}; ignoring");
        }
        self.emit_if_changed(generation);
        removed
    }

    /// Start editing a selected tooth's summary. Returns the text to pre-fill.
    ///
    /// A session still waiting on its modifier release is closed first; if
    /// that opens the bulk dialog, the edit is refused.
    pub fn begin_edit(&mut self, tooth: ToothId) -> Option<String> {
        if self.read_only || self.bulk.is_open() {
            return None;
        }
        if let ReleaseOutcome::DialogOpened(count) = self.release_modifiers() {
            log::debug!("edit of {tooth} deferred: bulk dialog opened for {count} teeth");
            return None;
        }
        let draft = SummaryDraft::begin(&self.selection, tooth)?;
        let initial = draft.initial_text().to_string();
        self.selection.set_focus(tooth);
        self.draft = Some(draft);
        Some(initial)
    }

    /// Save the inline edit.
    pub fn save_edit(&mut self, text: &str) -> bool {
        match self.draft.take() {
            Some(draft) => draft.save(&mut self.selection, text),
            None => false,
        }
    }

    /// Discard the inline edit without touching the chart.
    pub fn cancel_edit(&mut self) -> bool {
        self.draft.take().is_some()
    }

    /// Move focus to a selected tooth.
    pub fn set_focus(&mut self, tooth: ToothId) -> bool {
        self.selection.set_focus(tooth)
    }

    /// Step focus through the selection.
    pub fn cycle_focus(&mut self, forward: bool) {
        self.selection.cycle_focus(forward);
    }

    fn drop_stale_draft(&mut self) {
        if let Some(draft) = &self.draft {
            if !self.selection.contains(draft.tooth()) {
                self.draft = None;
            }
        }
    }

    fn emit_if_changed(&mut self, generation: u64) {
        if self.selection.selection_generation() == generation {
            return;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(self.selection.selected());
        }
    }
}
