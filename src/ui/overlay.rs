//! Entry overlay: creator, follow state, title, description and tags.

use crate::app::App;
use crate::feed::FeedEntry;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Tags beyond this many are not shown.
const MAX_TAGS: usize = 4;

/// Rows the overlay needs for `entry`.
pub fn height(entry: &FeedEntry) -> u16 {
    let meta = &entry.metadata;
    1 + u16::from(meta.title.is_some())
        + u16::from(meta.description.is_some())
        + u16::from(!meta.tags.is_empty())
}

pub fn render(f: &mut Frame, app: &App, entry: &FeedEntry, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let lines = overlay_lines(app, entry, usize::from(area.width));
    f.render_widget(Paragraph::new(lines), area);
}

fn overlay_lines<'a>(app: &App, entry: &'a FeedEntry, width: usize) -> Vec<Line<'a>> {
    let meta = &entry.metadata;
    let creator = &meta.creator;

    let mut creator_line = vec![Span::styled(creator.handle(), app.style("overlay_username"))];
    if creator.is_verified {
        creator_line.push(Span::styled(" ✓", app.style("verified_badge")));
    }
    creator_line.push(Span::raw("  "));
    if app.is_following(&creator.id) {
        creator_line.push(Span::styled("Following", app.style("following_button")));
    } else {
        creator_line.push(Span::styled(" Follow ", app.style("follow_button")));
    }

    let mut lines = vec![Line::from(creator_line)];

    if let Some(title) = &meta.title {
        lines.push(Line::from(Span::styled(
            truncate_to_width(title, width),
            app.style("overlay_title"),
        )));
    }
    if let Some(description) = &meta.description {
        // Single line: newlines in the description would break the layout
        let first_line = description.lines().next().unwrap_or_default();
        lines.push(Line::from(Span::styled(
            truncate_to_width(first_line, width),
            app.style("overlay_description"),
        )));
    }
    if !meta.tags.is_empty() {
        let tags = meta
            .tags
            .iter()
            .take(MAX_TAGS)
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            truncate_to_width(&tags, width).into_owned(),
            app.style("overlay_tag"),
        )));
    }
    lines
}
