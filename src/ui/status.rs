use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Borrow the status message; hints are static
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if app.show_help {
        Cow::Borrowed("[j/k]scroll [?/Esc]close")
    } else if app.entries.is_empty() {
        Cow::Borrowed("[?]help [q]uit")
    } else {
        Cow::Borrowed(
            "[j/k]next/prev [space]play [m]ute [l]ike [b]save [f]ollow [s]hare [o]pen [?]help [q]uit",
        )
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
