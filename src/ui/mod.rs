//! Terminal User Interface module.
//!
//! - `loop_runner` - main event loop and terminal management
//! - `input` - key and mouse dispatch onto `App`
//! - `render` - layout and view dispatch
//! - `player_view` - player surface with progress bar
//! - `overlay` - creator, title, description and tags
//! - `actions` - action bar with engagement counts
//! - `pagination` - per-entry dots
//! - `status` - status bar
//! - `help` - keybinding overlay

mod actions;
mod help;
mod input;
mod loop_runner;
mod overlay;
mod pagination;
mod player_view;
mod render;
mod status;

pub use loop_runner::{run, Action};
