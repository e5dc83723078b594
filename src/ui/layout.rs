use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::LayoutConfig;

/// Split the screen into chart, detail panel and the one-line help bar.
pub fn create_layout_with_help(area: Rect, config: &LayoutConfig) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let main_area = vertical[0];
    let help_area = vertical[1];

    let detail_pct = u16::from(config.detail_width_pct.clamp(20, 60));
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100 - detail_pct),
            Constraint::Percentage(detail_pct),
        ])
        .split(main_area);

    (horizontal[0], horizontal[1], help_area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_bar_takes_last_line() {
        let (chart, detail, help) =
            create_layout_with_help(Rect::new(0, 0, 100, 30), &LayoutConfig::default());
        assert_eq!(help, Rect::new(0, 29, 100, 1));
        assert_eq!(chart.height, 29);
        assert_eq!(chart.width + detail.width, 100);
        assert_eq!(detail.width, 35);
    }
}
