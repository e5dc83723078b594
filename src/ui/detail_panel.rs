//! Detail panel for the focus tooth plus the list of selected teeth.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::chart::Chart;

pub struct DetailPanel<'a> {
    chart: &'a Chart,
}

impl<'a> DetailPanel<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    fn focus_lines(&self) -> Vec<Line<'static>> {
        let Some(tooth) = self.chart.focus() else {
            return vec![Line::from(Span::styled(
                "No tooth selected",
                Style::default().fg(Color::DarkGray),
            ))];
        };

        let summary = self
            .chart
            .selection()
            .summary(tooth)
            .map_or_else(|| "(no summary)".to_string(), str::to_string);

        vec![
            Line::from(vec![
                Span::styled(
                    format!("{tooth} "),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(tooth.name()),
            ]),
            Line::from(""),
            Line::from(summary),
        ]
    }

    fn selection_lines(&self) -> Vec<Line<'static>> {
        let selection = self.chart.selection();
        selection
            .selected()
            .iter()
            .map(|&tooth| {
                let marker = if self.chart.is_pending(tooth) { "+" } else { " " };
                let text = selection.summary(tooth).unwrap_or("");
                let style = if self.chart.focus() == Some(tooth) {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(format!("{marker}{:>3} ", tooth.fdi()), style.fg(Color::Yellow)),
                    Span::styled(text.to_string(), style),
                ])
            })
            .collect()
    }
}

impl Widget for DetailPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([Constraint::Length(7), Constraint::Min(0)]).split(area);

        Paragraph::new(self.focus_lines())
            .block(
                Block::default()
                    .title(" Tooth ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let title = format!(" Selected ({}) ", self.chart.selection().len());
        Paragraph::new(self.selection_lines())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(chunks[1], buf);
    }
}
