//! reels: a terminal feed of short videos.
//!
//! The core is a feed navigator that owns the current index and funnels
//! keyboard, touch and wheel input into one transition function, plus a
//! playback binding that keeps exactly one entry's media handle active.
//! The `ui` module puts a ratatui front end on top.
//!
//! # Example
//!
//! ```
//! use reels::navigator::{FeedNavigator, NavigatorSettings, Step};
//! use reels::player::{AutoplayPolicy, PlaybackBinding, PlaybackState, SimulatedMedia};
//!
//! let mut nav = FeedNavigator::new(3, NavigatorSettings::default());
//! let mut playback = PlaybackBinding::new(
//!     (0..3).map(|_| SimulatedMedia::new(Some(15.0), AutoplayPolicy::Allowed)),
//! );
//! playback.bind(0);
//!
//! if let Some(change) = nav.step(Step::Forward) {
//!     playback.bind(change.current);
//! }
//! assert_eq!(nav.current_index(), Some(1));
//! assert_eq!(playback.handle(1).map(|h| h.state()), Some(PlaybackState::Playing));
//! assert_eq!(playback.handle(0).map(|h| h.state()), Some(PlaybackState::Idle));
//! ```

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod navigator;
pub mod player;
pub mod theme;
pub mod ui;
pub mod util;
