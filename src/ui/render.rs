//! Render functions for the TUI.
//!
//! Lays out the feed screen and records the areas mouse input is mapped
//! against.

use crate::app::{App, FeedLayout};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{actions, help, pagination, player_view, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Width of the action bar column.
const ACTION_BAR_WIDTH: u16 = 12;
/// Width of the pagination column.
const PAGINATION_WIDTH: u16 = 3;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-sized frames during extreme resizes
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        app.layout = FeedLayout::default();
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    if app.entries.is_empty() {
        render_empty(f, app, chunks[0]);
        app.layout = FeedLayout::default();
    } else {
        render_feed(f, app, chunks[0]);
    }

    status::render(f, app, chunks[1]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Placeholder for a feed with no entries.
fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let top_padding = area.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        "No videos yet",
        app.style("empty_title"),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Be the first to upload a video and start creating.",
        app.style("empty_hint"),
    )));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Player with overlay, action bar, and pagination column.
fn render_feed(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(ACTION_BAR_WIDTH),
            Constraint::Length(PAGINATION_WIDTH),
        ])
        .split(area);

    let markers = app.pagination();
    app.layout = FeedLayout {
        player: columns[0],
        pagination: pagination::marker_area(columns[2], markers.len()),
    };

    player_view::render(f, app, columns[0]);
    actions::render(f, app, columns[1]);
    pagination::render(f, app, &markers, app.layout.pagination);
}
