//! Input handling for the TUI.
//!
//! Keys resolve through the keybinding registry; mouse events become
//! touch gestures, wheel events or pagination clicks. Every navigation
//! path ends in one of the `App` transition methods.

use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::navigator::Step;
use crate::util::validate_url_for_open;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::Action;

/// Wheel delta reported per scroll notch. Only the sign matters.
const SCROLL_NOTCH: f64 = 1.0;

/// Main key dispatch function.
pub(super) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if app.show_help {
        return handle_help_key(app, code, modifiers);
    }

    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Feed)
    else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NextEntry => {
            app.step(Step::Forward);
        }
        KbAction::PrevEntry => {
            app.step(Step::Back);
        }
        KbAction::FirstEntry => {
            app.first();
        }
        KbAction::LastEntry => {
            app.last();
        }
        KbAction::TogglePlay => app.toggle_play(),
        KbAction::ToggleMute => app.toggle_mute(),
        KbAction::ToggleLike => app.toggle_like(),
        KbAction::ToggleSave => app.toggle_save(),
        KbAction::ToggleFollow => app.toggle_follow(),
        KbAction::Share => app.share(),
        KbAction::OpenMedia => open_media(app),
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::CloseHelp => {}
    }
    Action::Continue
}

/// Keys while the help overlay is visible: scroll or dismiss.
fn handle_help_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Help)
    {
        Some(KbAction::CloseHelp) => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        Some(KbAction::Quit) => return Action::Quit,
        _ => match code {
            KeyCode::Char('j') | KeyCode::Down => {
                app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
            }
            _ => {}
        },
    }
    Action::Continue
}

/// Hand the current entry's media URL to the system handler.
fn open_media(app: &mut App) {
    let Some(url) = app.current_entry().map(|e| e.media_url.clone()) else {
        return;
    };
    // Validate before open::that() so only http(s) reaches the shell handler
    if let Err(e) = validate_url_for_open(&url) {
        app.set_status(e);
    } else if let Err(e) = open::that(&*url) {
        app.set_status(format!("Failed to open player: {}", e));
    } else {
        app.set_status("Opening video...");
    }
}

/// Map a mouse event onto the feed.
///
/// Left press/release is a touch gesture measured in rows scaled by
/// `row_height_units`; a press on a pagination marker jumps straight to
/// that entry instead. Scrolling feeds the debounced wheel adapter.
pub(super) fn handle_mouse(app: &mut App, event: MouseEvent) {
    if app.show_help {
        match event.kind {
            MouseEventKind::ScrollDown => {
                app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
            }
            MouseEventKind::ScrollUp => {
                app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
            }
            _ => {}
        }
        return;
    }

    let y = f64::from(event.row) * app.row_height_units;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let count = app.entries.len();
            if let Some(index) = app.layout.marker_at(event.column, event.row, count) {
                app.touch_cancel();
                app.go_to(index as i64);
            } else {
                app.touch_start(y);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let outcome = app.touch_end(y);
            tracing::trace!(?outcome, row = event.row, "Pointer released");
        }
        MouseEventKind::ScrollDown => {
            app.wheel(SCROLL_NOTCH);
        }
        MouseEventKind::ScrollUp => {
            app.wheel(-SCROLL_NOTCH);
        }
        _ => {}
    }
}
