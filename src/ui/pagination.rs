//! Pagination column: one dot per entry, current one highlighted.

use crate::app::App;
use crate::navigator::PageMarker;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rows actually occupied by `count` markers, vertically centred in
/// `column`. Empty when there is nothing to show.
pub fn marker_area(column: Rect, count: usize) -> Rect {
    if count == 0 || column.width == 0 {
        return Rect::default();
    }
    let height = u16::try_from(count).unwrap_or(u16::MAX).min(column.height);
    Rect {
        x: column.x,
        y: column.y + (column.height - height) / 2,
        width: column.width,
        height,
    }
}

pub fn render(f: &mut Frame, app: &App, markers: &[PageMarker], area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let lines: Vec<Line> = markers
        .iter()
        .take(usize::from(area.height))
        .map(|m| {
            if m.active {
                Line::from(Span::styled("●", app.style("pagination_active")))
            } else {
                Line::from(Span::styled("○", app.style("pagination_inactive")))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
