//! Odontogram widget: tooth cells laid out by arch, styled by selection state.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::chart::{segments, ArchSegment, Chart, Dentition, ToothId};

/// Width of one tooth cell in columns
pub const CELL_WIDTH: u16 = 3;
/// Extra gap between the patient's right and left halves
pub const MIDLINE_GAP: u16 = 2;
/// Label line + number line + marker line + spacer
const ROW_HEIGHT: u16 = 4;
/// Teeth per side of a permanent arch
const HALF_ARCH: usize = 8;

/// Screen region occupied by one tooth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToothCell {
    pub tooth: ToothId,
    pub area: Rect,
}

/// Arch rows drawn for the given layout setting
pub fn visible_segments(show_primary: bool) -> Vec<&'static ArchSegment> {
    segments()
        .iter()
        .filter(|segment| show_primary || segment.dentition == Dentition::Permanent)
        .collect()
}

fn chart_width() -> u16 {
    HALF_ARCH as u16 * 2 * CELL_WIDTH + MIDLINE_GAP
}

fn origin_x(area: Rect) -> u16 {
    area.x + area.width.saturating_sub(chart_width()) / 2
}

/// Compute the cell of every visible tooth within `area`.
///
/// Primary rows are centred under the permanent rows so each primary tooth
/// sits below its permanent successor. Cells that do not fit are omitted.
pub fn layout_chart(area: Rect, show_primary: bool) -> Vec<ToothCell> {
    let x0 = origin_x(area);
    let mut cells = Vec::new();

    for (row, segment) in visible_segments(show_primary).iter().enumerate() {
        let y = area.y + row as u16 * ROW_HEIGHT + 1;
        if y + 2 > area.bottom() {
            break;
        }

        let half = segment.teeth.len() / 2;
        for (i, &fdi) in segment.teeth.iter().enumerate() {
            let Some(tooth) = ToothId::new(fdi) else {
                continue;
            };
            let column = HALF_ARCH - half + i;
            let gap = if column >= HALF_ARCH { MIDLINE_GAP } else { 0 };
            let x = x0 + column as u16 * CELL_WIDTH + gap;
            if x + CELL_WIDTH > area.right() {
                continue;
            }
            cells.push(ToothCell {
                tooth,
                area: Rect::new(x, y, CELL_WIDTH, 2),
            });
        }
    }

    cells
}

/// Find the tooth under a screen position.
pub fn tooth_at(cells: &[ToothCell], column: u16, row: u16) -> Option<ToothId> {
    cells
        .iter()
        .find(|cell| {
            column >= cell.area.x
                && column < cell.area.right()
                && row >= cell.area.y
                && row < cell.area.bottom()
        })
        .map(|cell| cell.tooth)
}

/// The chart widget.
pub struct OdontogramWidget<'a> {
    chart: &'a Chart,
    cells: &'a [ToothCell],
    show_primary: bool,
}

impl<'a> OdontogramWidget<'a> {
    pub fn new(chart: &'a Chart, cells: &'a [ToothCell], show_primary: bool) -> Self {
        Self {
            chart,
            cells,
            show_primary,
        }
    }

    /// Area inside the widget border, where [`layout_chart`] places teeth
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    fn tooth_style(&self, tooth: ToothId) -> Style {
        let selection = self.chart.selection();
        let mut style = if self.chart.is_pending(tooth) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if selection.contains(tooth) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else if tooth.dentition() == Dentition::Primary {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        if self.chart.focus() == Some(tooth) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        style
    }
}

impl Widget for OdontogramWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.chart.is_read_only() {
            " Chart (read-only) "
        } else {
            " Chart "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let x0 = origin_x(inner);
        for (row, segment) in visible_segments(self.show_primary).iter().enumerate() {
            let y = inner.y + row as u16 * ROW_HEIGHT;
            if y >= inner.bottom() {
                break;
            }
            buf.set_span(
                x0,
                y,
                &Span::styled(segment.label, Style::default().fg(Color::DarkGray)),
                inner.width,
            );
        }

        let selection = self.chart.selection();
        for cell in self.cells {
            let label = format!("{:^width$}", cell.tooth.fdi(), width = CELL_WIDTH as usize);
            buf.set_string(cell.area.x, cell.area.y, label, self.tooth_style(cell.tooth));

            let marker = if selection.has_summary(cell.tooth) {
                "•"
            } else if self.chart.anchor() == Some(cell.tooth) {
                "^"
            } else {
                ""
            };
            let marker = format!("{marker:^width$}", width = CELL_WIDTH as usize);
            buf.set_string(
                cell.area.x,
                cell.area.y + 1,
                marker,
                Style::default().fg(Color::Green),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Modifiers;

    fn t(fdi: u8) -> ToothId {
        ToothId::new(fdi).unwrap()
    }

    fn cell(cells: &[ToothCell], fdi: u8) -> Rect {
        cells.iter().find(|c| c.tooth == t(fdi)).unwrap().area
    }

    #[test]
    fn layout_places_all_teeth_when_space_allows() {
        let cells = layout_chart(Rect::new(0, 0, 80, 20), true);
        assert_eq!(cells.len(), 52);

        let cells = layout_chart(Rect::new(0, 0, 80, 20), false);
        assert_eq!(cells.len(), 32);
    }

    #[test]
    fn upper_arch_runs_from_patient_right_to_left() {
        let cells = layout_chart(Rect::new(0, 0, 80, 20), true);
        assert!(cell(&cells, 18).x < cell(&cells, 11).x);
        assert!(cell(&cells, 11).x < cell(&cells, 21).x);
        assert_eq!(cell(&cells, 21).x - cell(&cells, 11).x, CELL_WIDTH + MIDLINE_GAP);
        assert!(cell(&cells, 21).x < cell(&cells, 28).x);
    }

    #[test]
    fn primary_teeth_sit_below_their_successors() {
        let cells = layout_chart(Rect::new(0, 0, 80, 20), true);
        assert_eq!(cell(&cells, 55).x, cell(&cells, 15).x);
        assert_eq!(cell(&cells, 61).x, cell(&cells, 21).x);
        assert!(cell(&cells, 55).y > cell(&cells, 15).y);
        assert_eq!(cell(&cells, 85).x, cell(&cells, 45).x);
    }

    #[test]
    fn short_area_drops_rows_that_do_not_fit() {
        let cells = layout_chart(Rect::new(0, 0, 80, 4), true);
        assert_eq!(cells.len(), 16);
        assert!(cells.iter().all(|c| c.tooth.quadrant() <= 2));
    }

    #[test]
    fn tooth_at_maps_positions_to_cells() {
        let cells = layout_chart(Rect::new(0, 0, 80, 20), true);
        let area = cell(&cells, 36);
        assert_eq!(tooth_at(&cells, area.x, area.y), Some(t(36)));
        assert_eq!(tooth_at(&cells, area.x + CELL_WIDTH - 1, area.y + 1), Some(t(36)));
        assert_eq!(tooth_at(&cells, 0, 0), None);
    }

    #[test]
    fn render_shows_summary_marker() {
        let mut chart = Chart::new();
        chart.click(t(11), Modifiers::NONE);
        chart.begin_edit(t(11));
        chart.save_edit("veneer");

        let area = Rect::new(0, 0, 80, 20);
        let cells = layout_chart(OdontogramWidget::inner(area), true);
        let mut buf = Buffer::empty(area);
        OdontogramWidget::new(&chart, &cells, true).render(area, &mut buf);

        let tooth = cell(&cells, 11);
        let number: String = (tooth.x..tooth.right())
            .map(|x| buf[(x, tooth.y)].symbol().to_string())
            .collect();
        assert_eq!(number.trim(), "11");
        let marker: String = (tooth.x..tooth.right())
            .map(|x| buf[(x, tooth.y + 1)].symbol().to_string())
            .collect();
        assert_eq!(marker.trim(), "•");
    }
}
