//! User-facing actions on App (clicks, session release, modals, toasts).

use super::*;
use crate::chart::{ClickOutcome, EscapeOutcome, Modifiers, ReleaseOutcome};
use crate::ui::modal::AnnotationTarget;
use crate::ui::{tooth_at, ToastType};

impl App {
    /// Tooth under a screen position, using the last rendered layout
    pub fn tooth_at(&self, column: u16, row: u16) -> Option<ToothId> {
        tooth_at(&self.tooth_cells, column, row)
    }

    /// Apply a click on a tooth
    pub fn click_tooth(&mut self, tooth: ToothId, modifiers: Modifiers) {
        if self.chart.is_read_only() {
            self.toast_warning("Chart is read-only");
            return;
        }
        if let ClickOutcome::Range(added) = self.chart.click(tooth, modifiers) {
            log::debug!("range click on {tooth} added {} teeth", added.len());
        }
    }

    /// The modifier key was released; open the bulk modal when eligible.
    /// Safe to call repeatedly.
    pub fn release_modifiers(&mut self) {
        if let ReleaseOutcome::DialogOpened(_) = self.chart.release_modifiers() {
            if self.chart.cancel_edit() {
                log::debug!("inline edit discarded for bulk dialog");
            }
            self.open_bulk_modal();
        }
    }

    fn open_bulk_modal(&mut self) {
        let teeth = self.chart.bulk_teeth().to_vec();
        self.modal_state = ModalState::Annotation(Box::new(AnnotationModalState::bulk(teeth)));
    }

    /// Open the inline editor for the focus tooth
    pub fn edit_focus(&mut self) {
        let Some(tooth) = self.chart.focus() else {
            self.toast_info("Select a tooth to edit");
            return;
        };
        match self.chart.begin_edit(tooth) {
            Some(initial) => {
                self.modal_state =
                    ModalState::Annotation(Box::new(AnnotationModalState::single(tooth, initial)));
            }
            // The edit closed a pending session with several new teeth
            None if self.chart.is_dialog_open() => self.open_bulk_modal(),
            None if self.chart.is_read_only() => self.toast_warning("Chart is read-only"),
            None => {}
        }
    }

    /// Delete the focus tooth and its summary
    pub fn delete_focus(&mut self) {
        let Some(tooth) = self.chart.focus() else {
            return;
        };
        if self.chart.delete(tooth) {
            self.toast_info(format!("Removed tooth {tooth}"));
        } else if self.chart.is_read_only() {
            self.toast_warning("Chart is read-only");
        }
    }

    /// Apply the text entered in the modal
    pub fn submit_modal(&mut self, text: &str) {
        let target = match &self.modal_state {
            ModalState::Annotation(state) => state.target.clone(),
            ModalState::None => return,
        };

        match target {
            AnnotationTarget::Bulk(_) => match self.chart.commit_bulk(text) {
                Some(count) => {
                    self.close_modal();
                    self.toast_success(format!("Annotated {count} teeth"));
                }
                None if self.chart.is_dialog_open() => {
                    if let ModalState::Annotation(state) = &mut self.modal_state {
                        state.error_message = Some("Summary cannot be empty".to_string());
                    }
                }
                None => self.close_modal(),
            },
            AnnotationTarget::Single(tooth) => {
                if self.chart.save_edit(text) {
                    self.toast_success(format!("Saved tooth {tooth}"));
                }
                self.close_modal();
            }
        }
    }

    /// Escape or explicit cancel from the modal
    pub fn cancel_modal(&mut self) {
        match self.chart.escape() {
            EscapeOutcome::BulkCancelled(removed) => {
                self.toast_info(format!("Bulk edit cancelled, {removed} teeth deselected"));
            }
            EscapeOutcome::EditCancelled | EscapeOutcome::Nothing => {}
        }
        self.close_modal();
    }

    pub fn close_modal(&mut self) {
        self.modal_state = ModalState::None;
    }

    pub fn is_modal_open(&self) -> bool {
        !matches!(self.modal_state, ModalState::None)
    }

    pub fn toggle_help_menu(&mut self) {
        self.help_menu_open = !self.help_menu_open;
    }

    /// Show an info toast
    pub fn toast_info(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Info);
    }

    /// Show a success toast
    pub fn toast_success(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Success);
    }

    /// Show a warning toast
    pub fn toast_warning(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Warning);
    }

    /// Show an error toast
    pub fn toast_error(&mut self, message: impl Into<String>) {
        self.toast_manager.push(message, ToastType::Error);
    }
}
