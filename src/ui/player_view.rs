//! Player surface: playback glyph, mute indicator, overlay and progress bar.

use crate::app::App;
use crate::player::{MediaBackend, PlaybackHandle, PlaybackState, SimulatedMedia};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::overlay;

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let (Some(index), Some(entry)) = (app.current_index(), app.current_entry()) else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .style(app.style("player_surface"))
        .title(format!(" {}/{} ", index + 1, app.entries.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let overlay_height = overlay::height(entry).min(inner.height.saturating_sub(2));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(overlay_height),
            Constraint::Length(1),
        ])
        .split(inner);

    let Some(handle) = app.active_handle() else {
        return;
    };

    let mute = if handle.is_muted() { "muted" } else { "sound on" };
    f.render_widget(
        Paragraph::new(Span::styled(format!("[m] {}", mute), app.style("mute_indicator")))
            .alignment(Alignment::Right),
        rows[0],
    );

    render_stage(f, app, handle, entry.poster_url.as_deref(), rows[1]);
    overlay::render(f, app, entry, rows[2]);
    f.render_widget(
        Paragraph::new(progress_line(
            handle.progress(),
            rows[3].width,
            app.style("progress_filled"),
            app.style("progress_track"),
        )),
        rows[3],
    );
}

/// Centre of the player: the play prompt, or elapsed time while playing.
/// The poster stands in for the first frame until playback starts.
fn render_stage(
    f: &mut Frame,
    app: &App,
    handle: &PlaybackHandle<SimulatedMedia>,
    poster_url: Option<&str>,
    area: Rect,
) {
    if area.height == 0 {
        return;
    }
    let text = if handle.shows_play_prompt() {
        Span::styled("▶  Tap or press Space to play", app.style("play_prompt"))
    } else {
        Span::styled(
            clock_label(handle.position(), handle.media().duration()),
            app.style("mute_indicator"),
        )
    };

    let mid = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), mid);

    if handle.shows_play_prompt() && area.height > 2 {
        if let Some(label) = poster_url.and_then(poster_label) {
            let above = Rect { y: mid.y - 1, ..mid };
            f.render_widget(
                Paragraph::new(Span::styled(format!("▣ {}", label), app.style("progress_track")))
                    .alignment(Alignment::Center),
                above,
            );
        }
    }

    if handle.state() == PlaybackState::Paused && area.height > 2 {
        let below = Rect { y: mid.y + 1, ..mid };
        f.render_widget(
            Paragraph::new(Span::styled("paused", app.style("progress_track")))
                .alignment(Alignment::Center),
            below,
        );
    }
}

/// Last path segment of the poster URL, e.g. `thumb.jpg`.
fn poster_label(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let name = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    Some(format!("cover: {}", name))
}

/// `m:ss / m:ss`, or just the position when the duration is unknown.
fn clock_label(position: f64, duration: Option<f64>) -> String {
    fn mmss(secs: f64) -> String {
        let total = secs.max(0.0) as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
    match duration {
        Some(d) => format!("{} / {}", mmss(position), mmss(d)),
        None => mmss(position),
    }
}

/// Fixed-width bar: `filled` cells for the percentage, the rest track.
fn progress_line(percent: f64, width: u16, filled: Style, track: Style) -> Line<'static> {
    let width = usize::from(width);
    let done = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let done = done.min(width);
    Line::from(vec![
        Span::styled("━".repeat(done), filled),
        Span::styled("─".repeat(width - done), track),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_cells(line: &Line) -> usize {
        line.spans[0].content.chars().count()
    }

    #[test]
    fn test_progress_line_bounds() {
        let s = Style::default();
        assert_eq!(filled_cells(&progress_line(0.0, 10, s, s)), 0);
        assert_eq!(filled_cells(&progress_line(50.0, 10, s, s)), 5);
        assert_eq!(filled_cells(&progress_line(100.0, 10, s, s)), 10);
        assert_eq!(filled_cells(&progress_line(250.0, 10, s, s)), 10);
        assert_eq!(progress_line(30.0, 0, s, s).width(), 0);
    }

    #[test]
    fn test_poster_label() {
        assert_eq!(
            poster_label("https://cdn.example.com/posters/a-thumb.jpg").as_deref(),
            Some("cover: a-thumb.jpg")
        );
        assert_eq!(poster_label("https://cdn.example.com/"), None);
    }

    #[test]
    fn test_clock_label() {
        assert_eq!(clock_label(65.4, Some(125.0)), "1:05 / 2:05");
        assert_eq!(clock_label(3.0, None), "0:03");
    }
}
