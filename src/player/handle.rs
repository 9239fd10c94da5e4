//! Per-entry playback handle.
//!
//! State machine:
//! - `Idle --activate--> Playing`
//! - `Playing --deactivate--> Idle` (position 0, muted again)
//! - `Playing --tap--> Paused`, `Paused --tap--> Playing`
//!
//! Mute is independent of play state and only changes on explicit user
//! action, except that becoming inactive restores the muted default that
//! autoplay policies expect.

use thiserror::Error;

/// Why a `play()` request was refused by the media layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlayError {
    /// The environment does not allow playback without a user gesture.
    #[error("autoplay blocked by policy")]
    AutoplayBlocked,
    /// The media could not be started at all.
    #[error("media unavailable: {0}")]
    Unavailable(String),
}

/// What initiated a play request. Autoplay policies only gate `Autoplay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayTrigger {
    Autoplay,
    UserGesture,
}

/// The media-playback primitive a handle drives.
///
/// Implementations may start playback asynchronously; `play` only reports
/// whether the request was accepted.
pub trait MediaBackend {
    fn play(&mut self, trigger: PlayTrigger) -> Result<(), PlayError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, secs: f64);
    fn current_time(&self) -> f64;
    /// Total length, once known.
    fn duration(&self) -> Option<f64>;
    fn set_muted(&mut self, muted: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Playback progress as a percentage of the duration.
///
/// Unknown, zero or non-finite durations yield 0 rather than dividing.
pub fn progress_percent(position_secs: f64, duration_secs: Option<f64>) -> f64 {
    match duration_secs {
        Some(d) if d.is_finite() && d > 0.0 && position_secs.is_finite() => {
            (position_secs / d * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

pub struct PlaybackHandle<M> {
    media: M,
    state: PlaybackState,
    muted: bool,
    progress: f64,
    /// Set when the last autoplay attempt was refused; the UI shows a play
    /// prompt and the next tap retries instead of pausing.
    play_blocked: bool,
}

impl<M: MediaBackend> PlaybackHandle<M> {
    pub fn new(mut media: M) -> Self {
        media.set_muted(true);
        Self {
            media,
            state: PlaybackState::Idle,
            muted: true,
            progress: 0.0,
            play_blocked: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlaybackState::Idle
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_play_blocked(&self) -> bool {
        self.play_blocked
    }

    /// Whether the UI should show the play prompt instead of the pause glyph.
    pub fn shows_play_prompt(&self) -> bool {
        self.state != PlaybackState::Playing || self.play_blocked
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn position(&self) -> f64 {
        self.media.current_time()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Become the active entry: restart from 0 and request autoplay.
    ///
    /// The state is `Playing` even when the request is refused; the refusal
    /// is recorded, never surfaced as an error.
    pub fn activate(&mut self) {
        self.media.set_current_time(0.0);
        self.progress = 0.0;
        self.state = PlaybackState::Playing;
        self.play_blocked = match self.media.play(PlayTrigger::Autoplay) {
            Ok(()) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Play request rejected, showing play prompt");
                true
            }
        };
    }

    /// Stop being the active entry: pause, rewind, and restore muted.
    pub fn deactivate(&mut self) {
        self.media.pause();
        self.media.set_current_time(0.0);
        self.media.set_muted(true);
        self.muted = true;
        self.progress = 0.0;
        self.play_blocked = false;
        self.state = PlaybackState::Idle;
    }

    /// User tap on the player surface.
    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Idle => {}
            PlaybackState::Playing if self.play_blocked => self.request_play(),
            PlaybackState::Playing => {
                self.media.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.request_play();
                self.state = PlaybackState::Playing;
            }
        }
    }

    fn request_play(&mut self) {
        self.play_blocked = match self.media.play(PlayTrigger::UserGesture) {
            Ok(()) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Play request rejected after tap");
                true
            }
        };
    }

    /// Explicit mute toggle. Returns the new muted flag.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.media.set_muted(self.muted);
        self.muted
    }

    /// Time-update signal from the media layer.
    pub fn on_time_update(&mut self) {
        self.progress = progress_percent(self.media.current_time(), self.media.duration());
    }
}
