//! Integration tests for navigation and playback binding.
//!
//! Drives `App` the way the event loop does: keys, touch gestures and wheel
//! events all funnel into one index, and the playback binding follows it.

use crossterm::event::{KeyCode, KeyModifiers};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use reels::app::App;
use reels::config::Config;
use reels::feed::{parse_feed, FeedEntry, FeedOptions};
use reels::keybindings::{Action, Context};
use reels::navigator::{FeedNavigator, NavigatorSettings, Step, TouchOutcome};
use reels::player::{AutoplayPolicy, MediaBackend, PlaybackState};
use std::time::Duration;

fn entries(n: usize) -> Vec<FeedEntry> {
    let records: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id": "v{i}", "video_url": "https://cdn.example.com/{i}.mp4",
                    "duration_secs": 12, "user_id": "u{i}"}}"#
            )
        })
        .collect();
    parse_feed(&format!("[{}]", records.join(",")), &FeedOptions { limit: 0 }).unwrap()
}

fn app(n: usize) -> App {
    App::new(entries(n), &Config::default())
}

/// Exactly one handle engaged at the current index; the rest idle at 0.
fn assert_single_active(app: &App) {
    let current = app.current_index().unwrap();
    for (i, handle) in app.playback.handles().iter().enumerate() {
        if i == current {
            assert_eq!(handle.state(), PlaybackState::Playing, "handle {}", i);
        } else {
            assert_eq!(handle.state(), PlaybackState::Idle, "handle {}", i);
            assert_eq!(handle.position(), 0.0, "handle {}", i);
            assert!(!handle.media().is_playing());
        }
    }
}

/// What the keyboard adapter does for a key in the feed.
fn press(app: &mut App, c: char) {
    match app
        .keybindings
        .action_for_key(KeyCode::Char(c), KeyModifiers::NONE, Context::Feed)
    {
        Some(Action::NextEntry) => {
            app.step(Step::Forward);
        }
        Some(Action::PrevEntry) => {
            app.step(Step::Back);
        }
        other => panic!("unexpected action for {:?}: {:?}", c, other),
    }
}

// ============================================================================
// Index invariant
// ============================================================================

proptest! {
    /// Property: the index stays in range after any sequence of go_to calls
    #[test]
    fn prop_index_always_in_range(
        count in 1usize..30,
        targets in prop::collection::vec(-40i64..40, 0..60)
    ) {
        let mut nav = FeedNavigator::new(count, NavigatorSettings::default());
        for target in targets {
            nav.go_to(target);
            let current = nav.current_index().unwrap();
            prop_assert!(current < count);
        }
    }

    /// Property: after any mix of transitions exactly one handle is engaged
    #[test]
    fn prop_single_active_handle(
        count in 1usize..8,
        ops in prop::collection::vec((0u8..4, -3i64..10), 0..40)
    ) {
        let mut app = app(count);
        for (op, arg) in ops {
            match op {
                0 => { app.go_to(arg); }
                1 => { app.step(Step::Forward); }
                2 => { app.step(Step::Back); }
                _ => { app.last(); }
            }
        }
        prop_assert_eq!(app.playback.engaged_count(), 1);
        prop_assert_eq!(app.playback.active_index(), app.current_index());
    }
}

#[test]
fn test_out_of_range_targets_never_move() {
    let mut nav = FeedNavigator::new(4, NavigatorSettings::default());
    nav.go_to(2);
    assert_eq!(nav.go_to(-1), None);
    assert_eq!(nav.go_to(4), None);
    assert_eq!(nav.current_index(), Some(2));
}

#[test]
fn test_empty_feed_is_inert() {
    let mut app = app(0);
    assert_eq!(app.current_index(), None);
    assert_eq!(app.go_to(0), None);
    assert_eq!(app.wheel(5.0), None);
    app.touch_start(100.0);
    assert_eq!(app.touch_end(0.0), TouchOutcome::NoGesture);
    assert!(app.pagination().is_empty());
}

// ============================================================================
// Touch
// ============================================================================

#[test]
fn test_swipe_49_units_does_nothing() {
    let mut app = app(3);
    app.touch_start(200.0);
    assert_eq!(app.touch_end(151.0), TouchOutcome::BelowThreshold);
    assert_eq!(app.current_index(), Some(0));
}

#[test]
fn test_swipe_51_units_moves_once() {
    let mut app = app(3);
    let mut rx = app.navigator.subscribe();
    app.touch_start(200.0);
    assert!(matches!(app.touch_end(149.0), TouchOutcome::Swiped(Some(_))));
    assert_eq!(app.current_index(), Some(1));
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_swipe_down_goes_back() {
    let mut app = app(3);
    app.go_to(2);
    app.touch_start(100.0);
    app.touch_end(180.0);
    assert_eq!(app.current_index(), Some(1));
    assert_single_active(&app);
}

// ============================================================================
// Wheel
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_wheel_events_100ms_apart_move_once() {
    let mut app = app(3);
    assert!(app.wheel(4.0).is_some());
    tokio::time::advance(Duration::from_millis(100)).await;
    assert!(app.wheel(4.0).is_none());
    assert_eq!(app.current_index(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_wheel_events_700ms_apart_move_twice() {
    let mut app = app(3);
    assert!(app.wheel(4.0).is_some());
    tokio::time::advance(Duration::from_millis(700)).await;
    assert!(app.wheel(4.0).is_some());
    assert_eq!(app.current_index(), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_wheel_burst_is_not_queued() {
    let mut app = app(5);
    for _ in 0..10 {
        app.wheel(1.0);
        tokio::time::advance(Duration::from_millis(50)).await;
    }
    // 10 events over 500ms: only the first lands
    assert_eq!(app.current_index(), Some(1));
}

// ============================================================================
// Playback binding
// ============================================================================

#[test]
fn test_one_handle_playing_after_each_transition() {
    let mut app = app(4);
    assert_single_active(&app);

    app.tick(Duration::from_secs(3));
    assert_eq!(app.active_handle().unwrap().position(), 3.0);

    app.step(Step::Forward);
    assert_single_active(&app);
    app.go_to(3);
    assert_single_active(&app);
    app.go_to(0);
    assert_single_active(&app);
    // Returning restarts from the beginning
    assert_eq!(app.active_handle().unwrap().position(), 0.0);
}

#[test]
fn test_paused_entry_is_reset_when_leaving() {
    let mut app = app(2);
    app.toggle_play();
    assert_eq!(app.active_handle().unwrap().state(), PlaybackState::Paused);
    app.step(Step::Forward);
    assert_single_active(&app);
}

#[test]
fn test_unmute_does_not_survive_leaving() {
    let mut app = app(2);
    app.toggle_mute();
    assert!(!app.active_handle().unwrap().is_muted());
    app.step(Step::Forward);
    app.step(Step::Back);
    assert!(app.active_handle().unwrap().is_muted());
}

#[test]
fn test_blocked_autoplay_is_not_an_error() {
    let config = Config {
        autoplay: AutoplayPolicy::Blocked,
        ..Config::default()
    };
    let mut app = App::new(entries(2), &config);
    let handle = app.active_handle().unwrap();
    assert_eq!(handle.state(), PlaybackState::Playing);
    assert!(handle.shows_play_prompt());
    assert!(!handle.media().is_playing());

    app.toggle_play();
    assert!(app.active_handle().unwrap().media().is_playing());
    assert_eq!(app.active_handle().unwrap().media().duration(), Some(12.0));
}

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_key_wheel_goto_scenario() {
    let mut app = app(3);
    assert_eq!(app.current_index(), Some(0));

    press(&mut app, 'j');
    assert_eq!(app.current_index(), Some(1));

    // First wheel event of the session, so no cooldown applies
    app.wheel(-10.0);
    assert_eq!(app.current_index(), Some(0));

    app.go_to(5);
    assert_eq!(app.current_index(), Some(0));
    assert_single_active(&app);
}

#[test]
fn test_rebound_keys_drive_navigation() {
    let mut config = Config::default();
    config.keybindings.insert("next".to_string(), "n".to_string());
    config.keybindings.insert("prev".to_string(), "p".to_string());
    let mut app = App::new(entries(3), &config);

    press(&mut app, 'n');
    press(&mut app, 'n');
    press(&mut app, 'p');
    assert_eq!(app.current_index(), Some(1));
}
