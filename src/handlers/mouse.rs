use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::event::chart_modifiers;

pub(crate) fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let modifiers = chart_modifiers(mouse.modifiers);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.is_modal_open() {
                return;
            }
            if let Some(tooth) = app.tooth_at(mouse.column, mouse.row) {
                app.click_tooth(tooth, modifiers);
            }
        }
        // Motion reports carry the live modifier state, which covers terminals
        // without key-release reporting
        MouseEventKind::Moved if !modifiers.any() => {
            app.release_modifiers();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{SessionState, ToothId};
    use crate::config::Config;
    use crate::ui::layout_chart;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn t(fdi: u8) -> ToothId {
        ToothId::new(fdi).unwrap()
    }

    fn app_with_layout(dir: &tempfile::TempDir) -> App {
        let mut app = App::new(Config::default(), dir.path().join("chart.json")).unwrap();
        app.tooth_cells = layout_chart(Rect::new(0, 0, 80, 20), true);
        app
    }

    fn mouse_on(app: &App, fdi: u8, kind: MouseEventKind, modifiers: KeyModifiers) -> MouseEvent {
        let cell = app
            .tooth_cells
            .iter()
            .find(|c| c.tooth == t(fdi))
            .unwrap()
            .area;
        MouseEvent {
            kind,
            column: cell.x,
            row: cell.y,
            modifiers,
        }
    }

    #[test]
    fn ctrl_clicks_then_motion_without_modifiers_opens_bulk_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_layout(&dir);

        let down = MouseEventKind::Down(MouseButton::Left);
        let first = mouse_on(&app, 11, down, KeyModifiers::CONTROL);
        let second = mouse_on(&app, 12, down, KeyModifiers::CONTROL);
        handle_mouse_event(&mut app, first);
        handle_mouse_event(&mut app, second);
        assert_eq!(app.chart.session_state(), SessionState::Active);

        let moved = mouse_on(&app, 13, MouseEventKind::Moved, KeyModifiers::NONE);
        handle_mouse_event(&mut app, moved);
        assert!(app.is_modal_open());
        assert_eq!(app.chart.session_state(), SessionState::AwaitingDecision);
    }

    #[test]
    fn unmodified_click_ends_session_without_modal() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_layout(&dir);

        let down = MouseEventKind::Down(MouseButton::Left);
        for fdi in [31, 32] {
            let event = mouse_on(&app, fdi, down, KeyModifiers::CONTROL);
            handle_mouse_event(&mut app, event);
        }
        let plain = mouse_on(&app, 33, down, KeyModifiers::NONE);
        handle_mouse_event(&mut app, plain);

        assert!(!app.is_modal_open());
        assert_eq!(app.chart.session_state(), SessionState::Idle);
        assert!(app.chart.selection().contains(t(33)));
    }

    #[test]
    fn click_outside_teeth_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_layout(&dir);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, event);
        assert!(app.chart.selection().is_empty());
    }
}
