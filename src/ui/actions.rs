//! Action bar: avatar, like, comments, save, share and view counts.

use crate::app::{App, Engagement};
use crate::feed::FeedEntry;
use crate::util::format_count;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }
    let (Some(entry), Some(engagement)) = (app.current_entry(), app.current_engagement()) else {
        return;
    };

    let lines = action_lines(app, entry, engagement);
    let top = area.height.saturating_sub(lines.len() as u16);
    let area = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// One button per pair of lines: glyph with key hint, then its count.
fn action_lines(app: &App, entry: &FeedEntry, engagement: &Engagement) -> Vec<Line<'static>> {
    let counts = entry.metadata.counts;
    let normal = app.style("action_normal");
    let count_style = app.style("action_count");

    let (like_glyph, like_style) = if engagement.liked {
        ("♥ l", app.style("action_liked"))
    } else {
        ("♡ l", normal)
    };
    let (save_glyph, save_style) = if engagement.saved {
        ("■ b", app.style("action_saved"))
    } else {
        ("□ b", normal)
    };

    let buttons = [
        (
            format!("({})", entry.metadata.creator.initial()),
            normal,
            String::from("f"),
        ),
        (like_glyph.to_string(), like_style, format_count(engagement.likes)),
        ("✎".to_string(), normal, format_count(counts.comments)),
        (save_glyph.to_string(), save_style, String::from("Save")),
        ("↗ s".to_string(), normal, format_count(counts.shares)),
        ("◉".to_string(), normal, format_count(engagement.views)),
    ];

    let mut lines = Vec::with_capacity(buttons.len() * 3);
    for (glyph, style, label) in buttons {
        lines.push(Line::from(Span::styled(glyph, style)));
        lines.push(Line::from(Span::styled(label, count_style)));
        lines.push(Line::from(""));
    }
    lines.pop();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{parse_feed, FeedOptions};

    fn texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_counts_are_formatted() {
        let json = r#"[{"id": "a", "video_url": "https://cdn.example.com/a.mp4",
            "like_count": 1500, "comment_count": 12, "share_count": 2000000,
            "view_count": 999, "profiles": {"display_name": "mila"}}]"#;
        let mut app = App::new(
            parse_feed(json, &FeedOptions::default()).unwrap(),
            &Config::default(),
        );
        let entry = app.current_entry().unwrap().clone();

        let text = texts(&action_lines(&app, &entry, app.current_engagement().unwrap()));
        assert_eq!(text[0], "(M)");
        assert_eq!(text[3], "♡ l");
        assert_eq!(text[4], "1.5K");
        assert_eq!(text[7], "12");
        assert_eq!(text[13], "2.0M");
        // Opening the entry counted a view
        assert_eq!(text[16], "1.0K");

        app.toggle_like();
        let text = texts(&action_lines(&app, &entry, app.current_engagement().unwrap()));
        assert_eq!(text[3], "♥ l");
        assert_eq!(text[4], "1.5K");
    }
}
