//! Help menu overlay showing the chart keybindings.
//!
//! Toggled by `?`. Displays a popup above the help bar with every mouse
//! gesture and key organized into rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const COMMANDS_PER_ROW: usize = 4;

/// A single keybinding entry for display
struct HelpEntry {
    key: &'static str,
    label: &'static str,
}

/// Widget that renders the help menu overlay
#[derive(Default)]
pub struct HelpMenuWidget;

impl HelpMenuWidget {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the area for the help menu popup.
    /// Positioned at the bottom of the screen, above the help bar.
    pub fn calculate_area(screen: Rect) -> Rect {
        let row_count = Self::entries().len().div_ceil(COMMANDS_PER_ROW);
        let height = row_count as u16 + 2; // +2 for top border + padding
        let y = screen.height.saturating_sub(height + 1); // +1 for help bar

        Rect {
            x: 0,
            y,
            width: screen.width,
            height,
        }
    }

    fn entries() -> Vec<HelpEntry> {
        vec![
            HelpEntry { key: "click", label: "toggle" },
            HelpEntry { key: "C-click", label: "multi-select" },
            HelpEntry { key: "S-click", label: "range" },
            HelpEntry { key: "release", label: "bulk annotate" },
            HelpEntry { key: "e/Enter", label: "edit" },
            HelpEntry { key: "d/Del", label: "delete" },
            HelpEntry { key: "Tab", label: "next" },
            HelpEntry { key: "S-Tab", label: "prev" },
            HelpEntry { key: "Esc", label: "cancel" },
            HelpEntry { key: "?", label: "help" },
            HelpEntry { key: "q", label: "quit" },
            HelpEntry { key: "C-q", label: "quit" },
        ]
    }

    fn build_command_lines() -> Vec<Line<'static>> {
        Self::entries()
            .chunks(COMMANDS_PER_ROW)
            .map(|chunk| {
                let spans: Vec<Span> = chunk
                    .iter()
                    .flat_map(|entry| {
                        [
                            Span::styled(
                                format!(" {} ", entry.key),
                                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(format!("{} ", entry.label), Style::default().fg(Color::White)),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Widget for HelpMenuWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (overlay effect)
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                " ? | Keybindings ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(Color::Black));

        Paragraph::new(Self::build_command_lines())
            .block(block)
            .style(Style::default().bg(Color::Black))
            .render(area, buf);
    }
}
