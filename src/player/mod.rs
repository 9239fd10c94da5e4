//! Playback layer.
//!
//! - `handle` - per-entry `{Idle, Playing, Paused}` state machine over a
//!   `MediaBackend`
//! - `binding` - keeps exactly one handle active for the current index
//! - `simulated` - clock-driven backend for the terminal

mod binding;
mod handle;
mod simulated;

pub use binding::PlaybackBinding;
pub use handle::{
    progress_percent, MediaBackend, PlayError, PlayTrigger, PlaybackHandle, PlaybackState,
};
pub use simulated::{AutoplayPolicy, SimulatedMedia};
