pub use crossterm::event::{Event as CrosstermEvent, KeyEvent, MouseEvent};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::chart::Modifiers;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Poll timeout, used to expire toasts
    Tick,
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse input
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        }
    }
}

/// Map terminal modifier flags onto chart click modifiers.
///
/// Ctrl, Super (Cmd) and Meta all toggle; Shift selects a range.
pub fn chart_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        toggle: modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META),
        range: modifiers.contains(KeyModifiers::SHIFT),
    }
}

/// True for the release of a key that can hold a multi-select session open.
///
/// Terminals only report these with keyboard enhancement enabled.
pub fn is_modifier_release(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Release
        && matches!(
            key.code,
            KeyCode::Modifier(
                ModifierKeyCode::LeftControl
                    | ModifierKeyCode::RightControl
                    | ModifierKeyCode::LeftShift
                    | ModifierKeyCode::RightShift
                    | ModifierKeyCode::LeftSuper
                    | ModifierKeyCode::RightSuper
                    | ModifierKeyCode::LeftMeta
                    | ModifierKeyCode::RightMeta
            )
        )
}
