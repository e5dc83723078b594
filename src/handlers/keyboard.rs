use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::event::is_modifier_release;
use crate::event_loop::KeyAction;

use super::modal::forward_key_to_modal;

pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // 0. Modifier release closes the multi-select session, whatever has focus
    if is_modifier_release(&key) {
        app.release_modifiers();
        return KeyAction::Continue;
    }

    // Only enhanced terminals send these; every other release is noise
    if key.kind == KeyEventKind::Release || matches!(key.code, KeyCode::Modifier(_)) {
        return KeyAction::Continue;
    }

    // 1. True global keybindings
    if let (KeyCode::Char('q'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return KeyAction::Quit;
    }

    // 2. Open modal owns the keyboard, including Escape
    if app.is_modal_open() {
        forward_key_to_modal(app, key);
        return KeyAction::Continue;
    }

    // 3. Normal-mode keybindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return KeyAction::Quit,
        (KeyCode::Char('?'), _) | (KeyCode::Char('/'), KeyModifiers::SHIFT) => {
            app.toggle_help_menu();
        }
        (KeyCode::Esc, _) => {
            if app.help_menu_open {
                app.help_menu_open = false;
            } else {
                app.chart.escape();
            }
        }
        (KeyCode::Char('e') | KeyCode::Enter, KeyModifiers::NONE) => app.edit_focus(),
        (KeyCode::Char('d') | KeyCode::Delete, KeyModifiers::NONE) => app.delete_focus(),
        (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => app.chart.cycle_focus(false),
        (KeyCode::Tab, _) => app.chart.cycle_focus(true),
        _ => {}
    }

    KeyAction::Continue
}
