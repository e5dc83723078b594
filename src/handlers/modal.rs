use crossterm::event::KeyEvent;

use crate::app::{App, ModalState};
use crate::ui::modal::AnnotationKeyResult;

/// Forward a key event to the currently open modal
pub(crate) fn forward_key_to_modal(app: &mut App, key: KeyEvent) {
    let result = match &mut app.modal_state {
        ModalState::Annotation(state) => state.handle_key(key),
        ModalState::None => return,
    };

    match result {
        AnnotationKeyResult::Continue => {}
        AnnotationKeyResult::Submit(text) => app.submit_modal(&text),
        AnnotationKeyResult::Cancel => app.cancel_modal(),
    }
}
