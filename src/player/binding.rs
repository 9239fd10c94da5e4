//! Binding between the navigator's current index and the playback handles.
//!
//! Handles live in one indexed collection with a single `active` pointer,
//! so "at most one entry plays" is a property of the data layout: only the
//! handle at `active` can be outside `Idle`.

use super::handle::{MediaBackend, PlaybackHandle, PlaybackState};

pub struct PlaybackBinding<M> {
    handles: Vec<PlaybackHandle<M>>,
    active: Option<usize>,
}

impl<M: MediaBackend> PlaybackBinding<M> {
    /// Build one idle handle per media backend, in feed order.
    pub fn new(media: impl IntoIterator<Item = M>) -> Self {
        Self {
            handles: media.into_iter().map(PlaybackHandle::new).collect(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn handle(&self, index: usize) -> Option<&PlaybackHandle<M>> {
        self.handles.get(index)
    }

    pub fn handles(&self) -> &[PlaybackHandle<M>] {
        &self.handles
    }

    pub fn active(&self) -> Option<&PlaybackHandle<M>> {
        self.active.and_then(|i| self.handles.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut PlaybackHandle<M>> {
        match self.active {
            Some(i) => self.handles.get_mut(i),
            None => None,
        }
    }

    /// Make `index` the only active handle.
    ///
    /// Every other non-idle handle is paused and rewound first, then the
    /// target is activated from position 0. Out-of-range indices are
    /// ignored and rebinding the active index does nothing.
    pub fn bind(&mut self, index: usize) {
        if index >= self.handles.len() || self.active == Some(index) {
            return;
        }

        for (i, handle) in self.handles.iter_mut().enumerate() {
            if i != index && !handle.is_idle() {
                handle.deactivate();
            }
        }

        self.handles[index].activate();
        tracing::debug!(previous = ?self.active, active = index, "Playback rebound");
        self.active = Some(index);
    }

    /// Deactivate everything, e.g. when the feed view goes away.
    pub fn release(&mut self) {
        if let Some(handle) = self.active_mut() {
            handle.deactivate();
        }
        self.active = None;
    }

    /// Number of handles that are not idle. Never more than one.
    pub fn engaged_count(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_idle()).count()
    }

    /// Number of handles currently in `Playing`.
    pub fn playing_count(&self) -> usize {
        self.handles
            .iter()
            .filter(|h| h.state() == PlaybackState::Playing)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayError, PlayTrigger};

    #[derive(Default)]
    struct Clip {
        playing: bool,
        position: f64,
    }

    impl MediaBackend for Clip {
        fn play(&mut self, _trigger: PlayTrigger) -> Result<(), PlayError> {
            self.playing = true;
            Ok(())
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn set_current_time(&mut self, secs: f64) {
            self.position = secs;
        }
        fn current_time(&self) -> f64 {
            self.position
        }
        fn duration(&self) -> Option<f64> {
            Some(10.0)
        }
        fn set_muted(&mut self, _muted: bool) {}
    }

    fn binding(n: usize) -> PlaybackBinding<Clip> {
        PlaybackBinding::new((0..n).map(|_| Clip::default()))
    }

    #[test]
    fn test_starts_with_nothing_active() {
        let b = binding(3);
        assert_eq!(b.active_index(), None);
        assert_eq!(b.engaged_count(), 0);
    }

    #[test]
    fn test_bind_activates_exactly_one() {
        let mut b = binding(3);
        b.bind(1);
        assert_eq!(b.active_index(), Some(1));
        assert_eq!(b.playing_count(), 1);
        assert_eq!(b.handle(1).unwrap().state(), PlaybackState::Playing);
    }

    #[test]
    fn test_rebind_rewinds_previous() {
        let mut b = binding(3);
        b.bind(0);
        b.active_mut().unwrap().media_mut().position = 4.0;
        b.bind(2);

        let prev = b.handle(0).unwrap();
        assert_eq!(prev.state(), PlaybackState::Idle);
        assert_eq!(prev.position(), 0.0);
        assert!(!prev.media().playing);
        assert_eq!(b.playing_count(), 1);
    }

    #[test]
    fn test_paused_handle_is_deactivated_on_rebind() {
        let mut b = binding(2);
        b.bind(0);
        b.active_mut().unwrap().toggle_play();
        assert_eq!(b.handle(0).unwrap().state(), PlaybackState::Paused);

        b.bind(1);
        assert_eq!(b.handle(0).unwrap().state(), PlaybackState::Idle);
        assert_eq!(b.engaged_count(), 1);
    }

    #[test]
    fn test_rebinding_active_index_keeps_position() {
        let mut b = binding(2);
        b.bind(0);
        b.active_mut().unwrap().media_mut().position = 3.0;
        b.bind(0);
        assert_eq!(b.handle(0).unwrap().position(), 3.0);
    }

    #[test]
    fn test_out_of_range_bind_ignored() {
        let mut b = binding(2);
        b.bind(0);
        b.bind(5);
        assert_eq!(b.active_index(), Some(0));
    }

    #[test]
    fn test_release_idles_everything() {
        let mut b = binding(2);
        b.bind(1);
        b.release();
        assert_eq!(b.active_index(), None);
        assert_eq!(b.engaged_count(), 0);
    }

    #[test]
    fn test_empty_binding_is_inert() {
        let mut b = binding(0);
        b.bind(0);
        assert!(b.is_empty());
        assert!(b.active().is_none());
    }
}
