//! Vertical swipe recognition.

/// Minimum absolute vertical travel, in gesture units, for a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

/// Start of an in-progress gesture. Discarded once the gesture resolves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_y: f64,
}

/// How a finished gesture was classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swipe {
    /// No travel at all: a tap.
    Tap,
    /// Some travel, but not past the threshold.
    BelowThreshold { delta: f64 },
    /// Finger moved up (content scrolls to the next entry).
    Forward { delta: f64 },
    /// Finger moved down.
    Back { delta: f64 },
}

/// Tracks at most one gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    sample: Option<GestureSample>,
}

impl SwipeTracker {
    /// `threshold` is expected to be finite and positive; config loading
    /// rejects anything else.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            sample: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_tracking(&self) -> bool {
        self.sample.is_some()
    }

    /// Begin a gesture. A second start replaces the first.
    pub fn start(&mut self, y: f64) {
        self.sample = Some(GestureSample { start_y: y });
    }

    /// Drop an in-progress gesture without classifying it.
    pub fn cancel(&mut self) {
        self.sample = None;
    }

    /// Finish the gesture at `end_y`. `None` when no gesture was started.
    ///
    /// `delta = start - end`, so a positive delta means the pointer moved
    /// up the screen.
    pub fn finish(&mut self, end_y: f64) -> Option<Swipe> {
        let sample = self.sample.take()?;
        let delta = sample.start_y - end_y;

        let swipe = if delta == 0.0 {
            Swipe::Tap
        } else if delta.abs() <= self.threshold {
            Swipe::BelowThreshold { delta }
        } else if delta > 0.0 {
            Swipe::Forward { delta }
        } else {
            Swipe::Back { delta }
        };
        Some(swipe)
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}
