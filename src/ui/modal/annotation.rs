//! Summary input modal, used for bulk annotation and single-tooth edits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::chart::ToothId;

/// What the modal is collecting a summary for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationTarget {
    /// Bulk annotation of the pending teeth
    Bulk(Vec<ToothId>),
    /// Inline edit of one tooth
    Single(ToothId),
}

/// Result of a key press inside the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationKeyResult {
    /// Keep the modal open
    Continue,
    /// Enter pressed with acceptable text
    Submit(String),
    /// Escape pressed
    Cancel,
}

/// State for the summary input modal.
pub struct AnnotationModalState {
    pub target: AnnotationTarget,
    /// Summary text input
    pub input: String,
    /// Cursor position in input, counted in characters
    pub cursor_pos: usize,
    /// Error message to display
    pub error_message: Option<String>,
}

impl AnnotationModalState {
    pub fn bulk(teeth: Vec<ToothId>) -> Self {
        Self {
            target: AnnotationTarget::Bulk(teeth),
            input: String::new(),
            cursor_pos: 0,
            error_message: None,
        }
    }

    pub fn single(tooth: ToothId, initial: String) -> Self {
        let cursor_pos = initial.chars().count();
        Self {
            target: AnnotationTarget::Single(tooth),
            input: initial,
            cursor_pos,
            error_message: None,
        }
    }

    pub fn is_bulk(&self) -> bool {
        matches!(self.target, AnnotationTarget::Bulk(_))
    }

    /// Whether Enter would currently be accepted
    pub fn can_submit(&self) -> bool {
        !self.is_bulk() || !self.input.trim().is_empty()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map_or(self.input.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Handle key input.
    pub fn handle_key(&mut self, key: KeyEvent) -> AnnotationKeyResult {
        match key.code {
            KeyCode::Esc => AnnotationKeyResult::Cancel,
            KeyCode::Enter => {
                if !self.can_submit() {
                    self.error_message = Some("Summary cannot be empty".to_string());
                    return AnnotationKeyResult::Continue;
                }
                AnnotationKeyResult::Submit(self.input.trim().to_string())
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                self.cursor_pos = 0;
                AnnotationKeyResult::Continue
            }
            KeyCode::Char(c) => {
                let index = self.byte_index(self.cursor_pos);
                self.input.insert(index, c);
                self.cursor_pos += 1;
                self.error_message = None;
                AnnotationKeyResult::Continue
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let index = self.byte_index(self.cursor_pos);
                    self.input.remove(index);
                    self.error_message = None;
                }
                AnnotationKeyResult::Continue
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.char_len() {
                    let index = self.byte_index(self.cursor_pos);
                    self.input.remove(index);
                    self.error_message = None;
                }
                AnnotationKeyResult::Continue
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                AnnotationKeyResult::Continue
            }
            KeyCode::Right => {
                if self.cursor_pos < self.char_len() {
                    self.cursor_pos += 1;
                }
                AnnotationKeyResult::Continue
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                AnnotationKeyResult::Continue
            }
            KeyCode::End => {
                self.cursor_pos = self.char_len();
                AnnotationKeyResult::Continue
            }
            _ => AnnotationKeyResult::Continue,
        }
    }
}

/// Widget for rendering the summary modal.
pub struct AnnotationModal<'a> {
    state: &'a AnnotationModalState,
}

impl<'a> AnnotationModal<'a> {
    pub fn new(state: &'a AnnotationModalState) -> Self {
        Self { state }
    }

    /// Calculate the modal area (centered, ~50% width, ~11 lines).
    pub fn calculate_area(total: Rect) -> Rect {
        let width = (total.width * 50 / 100)
            .max(40)
            .min(total.width.saturating_sub(4));
        let height = 11u16.min(total.height.saturating_sub(4));

        let x = (total.width.saturating_sub(width)) / 2;
        let y = (total.height.saturating_sub(height)) / 2;

        Rect::new(x, y, width, height)
    }

    fn title(&self) -> String {
        match &self.state.target {
            AnnotationTarget::Bulk(teeth) => format!(" Annotate {} teeth ", teeth.len()),
            AnnotationTarget::Single(tooth) => format!(" Tooth {tooth} "),
        }
    }

    fn subtitle(&self) -> String {
        match &self.state.target {
            AnnotationTarget::Bulk(teeth) => {
                let list: Vec<String> = teeth.iter().map(ToString::to_string).collect();
                format!("Teeth: {}", list.join(", "))
            }
            AnnotationTarget::Single(tooth) => capitalize(&tooth.name()),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Widget for AnnotationModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 7 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if self.state.is_bulk() {
                Color::Yellow
            } else {
                Color::Cyan
            }));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Teeth / tooth name
            Constraint::Length(3), // Input field
            Constraint::Length(1), // Error message
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        Paragraph::new(self.subtitle())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let input_block = Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let input_inner = input_block.inner(chunks[1]);
        input_block.render(chunks[1], buf);

        // Scroll the input horizontally so the cursor stays visible
        let chars: Vec<char> = self.state.input.chars().collect();
        let cursor_pos = self.state.cursor_pos.min(chars.len());
        let available_width = (input_inner.width as usize).max(1);
        let start = (cursor_pos + 1).saturating_sub(available_width);
        let end = (start + available_width).min(chars.len());

        let mut spans = Vec::new();
        for (offset, c) in chars[start..end].iter().enumerate() {
            if start + offset == cursor_pos {
                spans.push(Span::styled(
                    c.to_string(),
                    Style::default().bg(Color::White).fg(Color::Black),
                ));
            } else {
                spans.push(Span::raw(c.to_string()));
            }
        }
        if cursor_pos >= end {
            spans.push(Span::styled(" ", Style::default().bg(Color::White)));
        }
        Paragraph::new(Line::from(spans)).render(input_inner, buf);

        if let Some(ref error) = self.state.error_message {
            let error_line = Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)));
            Paragraph::new(error_line).render(chunks[2], buf);
        }

        let submit_label = if self.state.is_bulk() { "commit " } else { "save " };
        let submit_style = if self.state.can_submit() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", submit_style),
            Span::raw(submit_label),
            Span::styled(" Esc ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("cancel"),
        ]))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        help.render(chunks[4], buf);
    }
}
