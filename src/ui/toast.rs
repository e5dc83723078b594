use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,    // Blue
    Success, // Green
    Warning, // Yellow
    Error,   // Red
}

impl ToastType {
    fn color(self) -> Color {
        match self {
            ToastType::Info => Color::Blue,
            ToastType::Success => Color::Green,
            ToastType::Warning => Color::Yellow,
            ToastType::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastType::Info => "i",
            ToastType::Success => "✓",
            ToastType::Warning => "!",
            ToastType::Error => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

pub struct ToastManager {
    queue: VecDeque<Toast>,
    max_visible: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            max_visible: 4,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, toast_type: ToastType) {
        self.queue.push_back(Toast::new(message, toast_type));
        // Keep only max_visible toasts
        while self.queue.len() > self.max_visible {
            self.queue.pop_front();
        }
    }

    /// Remove expired toasts
    pub fn update(&mut self) {
        self.queue.retain(|t| !t.is_expired());
    }

    pub fn visible_toasts(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

const TOAST_WIDTH: u16 = 36;
const TOAST_HEIGHT: u16 = 3;

/// Draw toasts stacked upward from the bottom-right corner of `area`.
pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastManager) {
    for (idx, toast) in toasts.visible_toasts().enumerate() {
        let offset = idx as u16 * (TOAST_HEIGHT + 1);
        let x = area.right().saturating_sub(TOAST_WIDTH + 2);
        let y = area.bottom().saturating_sub(TOAST_HEIGHT + 2 + offset);
        let toast_area = Rect::new(x, y, TOAST_WIDTH.min(area.width), TOAST_HEIGHT.min(area.height));
        if toast_area.y < area.y {
            break;
        }

        frame.render_widget(Clear, toast_area);

        let border_style = Style::default().fg(toast.toast_type.color());
        let text = Paragraph::new(Line::from(vec![
            Span::styled(toast.toast_type.icon(), border_style.add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::raw(toast.message.clone()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_only_most_recent_toasts() {
        let mut manager = ToastManager::new();
        for i in 0..6 {
            manager.push(format!("toast {i}"), ToastType::Info);
        }
        let messages: Vec<&str> = manager.visible_toasts().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4", "toast 5"]);
    }

    #[test]
    fn update_drops_expired_toasts() {
        let mut manager = ToastManager::new();
        manager.push("saved", ToastType::Success);
        if let Some(toast) = manager.queue.back_mut() {
            toast.duration = Duration::ZERO;
        }
        manager.update();
        assert!(manager.is_empty());
    }
}
