//! Feed navigator.
//!
//! Owns the current index over a fixed-length feed and turns keyboard,
//! touch and wheel input into index changes. Every adapter ends in
//! [`FeedNavigator::go_to`], so transitions from all three sources form a
//! single ordered sequence.
//!
//! Out-of-range targets are ignored rather than wrapped: at either end of
//! the feed, further navigation does nothing.

mod gesture;
mod pagination;
mod wheel;

pub use gesture::{GestureSample, Swipe, SwipeTracker, DEFAULT_SWIPE_THRESHOLD};
pub use pagination::{pagination, PageMarker};
pub use wheel::{WheelDebounce, DEFAULT_WHEEL_COOLDOWN};

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

/// Capacity of the index-change broadcast. Slow observers skip ahead.
const NOTIFY_CAPACITY: usize = 16;

/// Notification sent once per index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChanged {
    pub previous: usize,
    pub current: usize,
}

/// Direction of a single-step transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Back,
}

impl Step {
    fn offset(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Back => -1,
        }
    }
}

/// Result of ending a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// `touch_end` without a matching `touch_start`.
    NoGesture,
    /// Pointer released where it went down.
    Tap,
    /// Moved, but not past the swipe threshold.
    BelowThreshold,
    /// Past the threshold. `None` when already at the end of the feed.
    Swiped(Option<IndexChanged>),
}

/// Tunables for the input adapters.
#[derive(Debug, Clone, Copy)]
pub struct NavigatorSettings {
    pub swipe_threshold: f64,
    pub wheel_cooldown: Duration,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            wheel_cooldown: DEFAULT_WHEEL_COOLDOWN,
        }
    }
}

pub struct FeedNavigator {
    entry_count: usize,
    current: usize,
    swipe: SwipeTracker,
    wheel: WheelDebounce,
    notify: broadcast::Sender<IndexChanged>,
}

impl FeedNavigator {
    pub fn new(entry_count: usize, settings: NavigatorSettings) -> Self {
        let (notify, _) = broadcast::channel(NOTIFY_CAPACITY);
        Self {
            entry_count,
            current: 0,
            swipe: SwipeTracker::new(settings.swipe_threshold),
            wheel: WheelDebounce::new(settings.wheel_cooldown),
            notify,
        }
    }

    /// Current index, or `None` for an empty feed.
    pub fn current_index(&self) -> Option<usize> {
        (self.entry_count > 0).then_some(self.current)
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// An empty feed accepts no transitions.
    pub fn is_inert(&self) -> bool {
        self.entry_count == 0
    }

    /// Receive an [`IndexChanged`] for every transition from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<IndexChanged> {
        self.notify.subscribe()
    }

    /// Move to `target`.
    ///
    /// Targets outside `0..entry_count` are ignored, as is the current
    /// index. Otherwise the index changes and exactly one notification is
    /// sent.
    pub fn go_to(&mut self, target: i64) -> Option<IndexChanged> {
        if target < 0 {
            return None;
        }
        let target = usize::try_from(target).ok()?;
        if target >= self.entry_count || target == self.current {
            return None;
        }

        let change = IndexChanged {
            previous: self.current,
            current: target,
        };
        self.current = target;
        tracing::debug!(previous = change.previous, current = change.current, "Index changed");

        // No receivers is fine: observers are optional
        let _ = self.notify.send(change);
        Some(change)
    }

    /// `go_to(current ± 1)`.
    pub fn step(&mut self, step: Step) -> Option<IndexChanged> {
        if self.is_inert() {
            return None;
        }
        let target = i64::try_from(self.current).ok()?.checked_add(step.offset())?;
        self.go_to(target)
    }

    pub fn first(&mut self) -> Option<IndexChanged> {
        self.go_to(0)
    }

    pub fn last(&mut self) -> Option<IndexChanged> {
        let last = i64::try_from(self.entry_count).ok()? - 1;
        self.go_to(last)
    }

    // ------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------

    /// Record where a touch (or pointer drag) began.
    pub fn touch_start(&mut self, y: f64) {
        if self.is_inert() {
            return;
        }
        self.swipe.start(y);
    }

    /// Resolve the touch that began at the last `touch_start`.
    pub fn touch_end(&mut self, y: f64) -> TouchOutcome {
        match self.swipe.finish(y) {
            None => TouchOutcome::NoGesture,
            Some(Swipe::Tap) => TouchOutcome::Tap,
            Some(Swipe::BelowThreshold { .. }) => TouchOutcome::BelowThreshold,
            Some(Swipe::Forward { .. }) => TouchOutcome::Swiped(self.step(Step::Forward)),
            Some(Swipe::Back { .. }) => TouchOutcome::Swiped(self.step(Step::Back)),
        }
    }

    pub fn touch_cancel(&mut self) {
        self.swipe.cancel();
    }

    // ------------------------------------------------------------------
    // Wheel
    // ------------------------------------------------------------------

    /// Wheel event at the current time. See [`FeedNavigator::wheel_at`].
    pub fn wheel(&mut self, delta_y: f64) -> Option<IndexChanged> {
        self.wheel_at(delta_y, Instant::now())
    }

    /// Wheel event at `now`: positive delta steps forward, negative back.
    ///
    /// The first event outside the cooldown is taken and starts a new
    /// cooldown even if it ends up not moving (zero delta, end of feed).
    pub fn wheel_at(&mut self, delta_y: f64, now: Instant) -> Option<IndexChanged> {
        if self.is_inert() || !self.wheel.accept(now) {
            return None;
        }
        if delta_y > 0.0 {
            self.step(Step::Forward)
        } else if delta_y < 0.0 {
            self.step(Step::Back)
        } else {
            None
        }
    }

    /// Highlighted/unhighlighted marker per entry.
    pub fn pagination(&self) -> Vec<PageMarker> {
        pagination(self.current_index(), self.entry_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(n: usize) -> FeedNavigator {
        FeedNavigator::new(n, NavigatorSettings::default())
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(nav(3).current_index(), Some(0));
    }

    #[test]
    fn test_empty_feed_is_inert() {
        let mut n = nav(0);
        assert!(n.is_inert());
        assert_eq!(n.current_index(), None);
        assert_eq!(n.go_to(0), None);
        assert_eq!(n.step(Step::Forward), None);
        n.touch_start(200.0);
        assert_eq!(n.touch_end(0.0), TouchOutcome::NoGesture);
        assert_eq!(n.wheel(5.0), None);
        assert!(n.pagination().is_empty());
    }

    #[test]
    fn test_go_to_in_range() {
        let mut n = nav(3);
        assert_eq!(
            n.go_to(2),
            Some(IndexChanged {
                previous: 0,
                current: 2
            })
        );
        assert_eq!(n.current_index(), Some(2));
    }

    #[test]
    fn test_go_to_out_of_range_is_noop() {
        let mut n = nav(3);
        n.go_to(1);
        assert_eq!(n.go_to(-1), None);
        assert_eq!(n.go_to(3), None);
        assert_eq!(n.go_to(i64::MAX), None);
        assert_eq!(n.go_to(i64::MIN), None);
        assert_eq!(n.current_index(), Some(1));
    }

    #[test]
    fn test_go_to_current_is_noop() {
        let mut n = nav(3);
        let mut rx = n.subscribe();
        assert_eq!(n.go_to(0), None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_one_notification_per_change() {
        let mut n = nav(3);
        let mut rx = n.subscribe();
        n.go_to(1);
        n.go_to(7);
        assert_eq!(
            rx.try_recv().unwrap(),
            IndexChanged {
                previous: 0,
                current: 1
            }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_step_stops_at_ends() {
        let mut n = nav(2);
        assert_eq!(n.step(Step::Back), None);
        assert!(n.step(Step::Forward).is_some());
        assert_eq!(n.step(Step::Forward), None);
        assert_eq!(n.current_index(), Some(1));
    }

    #[test]
    fn test_first_and_last() {
        let mut n = nav(5);
        assert_eq!(n.last().map(|c| c.current), Some(4));
        assert_eq!(n.first().map(|c| c.current), Some(0));
    }

    #[test]
    fn test_touch_swipe_thresholds() {
        let mut n = nav(3);
        n.touch_start(300.0);
        assert_eq!(n.touch_end(251.0), TouchOutcome::BelowThreshold);
        assert_eq!(n.current_index(), Some(0));

        n.touch_start(300.0);
        assert!(matches!(n.touch_end(249.0), TouchOutcome::Swiped(Some(_))));
        assert_eq!(n.current_index(), Some(1));

        n.touch_start(100.0);
        assert!(matches!(n.touch_end(200.0), TouchOutcome::Swiped(Some(_))));
        assert_eq!(n.current_index(), Some(0));
    }

    #[test]
    fn test_touch_swipe_past_end() {
        let mut n = nav(1);
        n.touch_start(0.0);
        assert_eq!(n.touch_end(100.0), TouchOutcome::Swiped(None));
    }

    #[test]
    fn test_touch_tap() {
        let mut n = nav(2);
        n.touch_start(40.0);
        assert_eq!(n.touch_end(40.0), TouchOutcome::Tap);
        assert_eq!(n.touch_end(40.0), TouchOutcome::NoGesture);
    }

    #[test]
    fn test_wheel_direction_and_debounce() {
        let mut n = nav(3);
        let t0 = Instant::now();
        assert!(n.wheel_at(3.0, t0).is_some());
        assert_eq!(n.wheel_at(3.0, t0 + Duration::from_millis(100)), None);
        assert_eq!(n.current_index(), Some(1));

        assert!(n
            .wheel_at(-3.0, t0 + Duration::from_millis(700))
            .is_some());
        assert_eq!(n.current_index(), Some(0));
    }

    #[test]
    fn test_zero_wheel_delta_still_opens_cooldown() {
        let mut n = nav(3);
        let t0 = Instant::now();
        assert_eq!(n.wheel_at(0.0, t0), None);
        assert_eq!(n.wheel_at(1.0, t0 + Duration::from_millis(50)), None);
        assert!(n.wheel_at(1.0, t0 + Duration::from_millis(650)).is_some());
    }

    #[test]
    fn test_pagination_follows_index() {
        let mut n = nav(3);
        n.go_to(2);
        let active: Vec<bool> = n.pagination().iter().map(|m| m.active).collect();
        assert_eq!(active, vec![false, false, true]);
    }
}
