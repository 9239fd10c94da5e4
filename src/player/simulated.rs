//! Clock-driven media backend used by the terminal front end.
//!
//! There is no decoder in a terminal; playback is modelled as a position
//! that advances with wall time while playing and loops at the end.

use super::handle::{MediaBackend, PlayError, PlayTrigger};
use serde::Deserialize;
use std::time::Duration;

/// How the environment treats play requests that were not started by the
/// user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplayPolicy {
    /// Autoplay always allowed.
    Allowed,
    /// Autoplay allowed only while muted (browser default).
    #[default]
    MutedOnly,
    /// Autoplay never allowed; playback needs a tap.
    Blocked,
}

#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    position: f64,
    duration: Option<f64>,
    playing: bool,
    muted: bool,
    policy: AutoplayPolicy,
}

impl SimulatedMedia {
    pub fn new(duration: Option<f64>, policy: AutoplayPolicy) -> Self {
        Self {
            position: 0.0,
            duration,
            playing: false,
            muted: true,
            policy,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Advance the clock by `elapsed` if playing. Wraps at the end of the
    /// duration. Returns true when the position changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.playing {
            return false;
        }
        let mut next = self.position + elapsed.as_secs_f64();
        if let Some(d) = self.duration {
            if next >= d {
                next %= d;
            }
        }
        self.position = next;
        true
    }
}

impl MediaBackend for SimulatedMedia {
    fn play(&mut self, trigger: PlayTrigger) -> Result<(), PlayError> {
        if trigger == PlayTrigger::Autoplay {
            let allowed = match self.policy {
                AutoplayPolicy::Allowed => true,
                AutoplayPolicy::MutedOnly => self.muted,
                AutoplayPolicy::Blocked => false,
            };
            if !allowed {
                return Err(PlayError::AutoplayBlocked);
            }
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_current_time(&mut self, secs: f64) {
        self.position = secs.max(0.0);
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
