use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{App, ModalState};
use crate::chart::SessionState;
use crate::event::Event;
use crate::handlers::keyboard::handle_key_event;
use crate::handlers::mouse::handle_mouse_event;
use crate::ui::layout::create_layout_with_help;
use crate::ui::modal::AnnotationModal;
use crate::ui::toast::render_toasts;
use crate::ui::{layout_chart, DetailPanel, HelpMenuWidget, OdontogramWidget};

/// Action returned from key handling
pub(crate) enum KeyAction {
    Continue,
    Quit,
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Update toast manager (remove expired)
        app.toast_manager.update();

        // Draw UI
        terminal.draw(|f| draw_ui(f, app))?;

        // Each event is handled to completion before the next is read
        if poll(Duration::from_millis(100))? {
            match Event::from(read()?) {
                Event::Key(key) => {
                    if let KeyAction::Quit = handle_key_event(app, key) {
                        app.should_quit = true;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                Event::Resize(_, _) | Event::Tick => {}
            }
        }

        if let Err(e) = app.persist_if_changed() {
            log::error!("failed to save chart record: {e:#}");
            app.toast_error(format!("Save failed: {e}"));
        }

        if app.should_quit {
            log::info!("quitting");
            return Ok(());
        }
    }
}

fn draw_ui(f: &mut Frame, app: &mut App) {
    let (chart_area, detail_area, help_area) = create_layout_with_help(f.area(), &app.config.layout);

    // Cache hit regions for mouse mapping before rendering
    let show_primary = app.config.layout.show_primary;
    app.tooth_cells = layout_chart(OdontogramWidget::inner(chart_area), show_primary);

    f.render_widget(
        OdontogramWidget::new(&app.chart, &app.tooth_cells, show_primary),
        chart_area,
    );
    f.render_widget(DetailPanel::new(&app.chart), detail_area);

    draw_help_bar(f, app, help_area);

    if app.help_menu_open {
        f.render_widget(HelpMenuWidget::new(), HelpMenuWidget::calculate_area(f.area()));
    }

    if let ModalState::Annotation(ref state) = app.modal_state {
        let modal_area = AnnotationModal::calculate_area(f.area());
        f.render_widget(AnnotationModal::new(state), modal_area);
    }

    render_toasts(f, f.area(), &app.toast_manager);
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = app.chart.session_state();
    let mode_style = match state {
        SessionState::Idle => Style::default().fg(Color::Black).bg(Color::Blue),
        SessionState::Active => Style::default().fg(Color::Black).bg(Color::Yellow),
        SessionState::AwaitingDecision => Style::default().fg(Color::Black).bg(Color::Magenta),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.display_name()),
            mode_style.add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if state != SessionState::Idle {
        spans.push(Span::styled(
            format!("{} pending ", app.chart.pending().len()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.chart.is_read_only() {
        spans.push(Span::styled("read-only ", Style::default().fg(Color::Red)));
    }

    spans.push(Span::styled(
        app.record_path().display().to_string(),
        Style::default().fg(Color::DarkGray),
    ));
    if app.is_dirty() {
        spans.push(Span::styled(" [+]", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled("  ? help", Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
