//! Wheel debounce.
//!
//! One physical wheel flick produces a burst of events. The first event
//! outside a cooldown is accepted and opens a new cooldown; everything
//! inside the cooldown is dropped. Nothing is queued.

use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_WHEEL_COOLDOWN: Duration = Duration::from_millis(600);

#[derive(Debug, Clone)]
pub struct WheelDebounce {
    cooldown: Duration,
    clear_at: Option<Instant>,
}

impl WheelDebounce {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            clear_at: None,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Whether a cooldown is running at `now`.
    pub fn is_cooling(&self, now: Instant) -> bool {
        self.clear_at.is_some_and(|t| now < t)
    }

    /// Offer an event at `now`. Returns true when it should be acted on.
    pub fn accept(&mut self, now: Instant) -> bool {
        if self.is_cooling(now) {
            return false;
        }
        self.clear_at = Some(now + self.cooldown);
        true
    }
}

impl Default for WheelDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_COOLDOWN)
    }
}
