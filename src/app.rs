use crate::config::Config;
use crate::feed::FeedEntry;
use crate::keybindings::KeybindingRegistry;
use crate::navigator::{FeedNavigator, IndexChanged, PageMarker, Step, TouchOutcome};
use crate::player::{PlaybackBinding, PlaybackHandle, SimulatedMedia};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Per-entry Engagement
// ============================================================================

/// Session-local engagement for one entry.
///
/// Seeded from the feed's counts; toggles update the counts optimistically
/// since there is no backend to confirm them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engagement {
    pub liked: bool,
    pub likes: u64,
    pub saved: bool,
    pub views: u64,
    /// Whether this entry has been active at least once this session.
    pub viewed: bool,
}

impl Engagement {
    fn from_entry(entry: &FeedEntry) -> Self {
        Self {
            liked: entry.metadata.liked_by_viewer,
            likes: entry.metadata.counts.likes,
            saved: false,
            views: entry.metadata.counts.views,
            viewed: false,
        }
    }
}

// ============================================================================
// Screen Layout
// ============================================================================

/// Areas recorded by the last render, used to map mouse input back to
/// feed operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedLayout {
    pub player: Rect,
    /// One row per pagination marker, top to bottom.
    pub pagination: Rect,
}

impl FeedLayout {
    /// Pagination marker under `(column, row)`, if any.
    pub fn marker_at(&self, column: u16, row: u16, count: usize) -> Option<usize> {
        let area = self.pagination;
        if area.width == 0 || column < area.x || column >= area.x + area.width || row < area.y {
            return None;
        }
        let index = usize::from(row - area.y);
        (index < count && index < usize::from(area.height)).then_some(index)
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    /// Immutable for the session; shared with render code.
    pub entries: Arc<Vec<FeedEntry>>,
    pub navigator: FeedNavigator,
    pub playback: PlaybackBinding<SimulatedMedia>,
    /// Parallel to `entries`.
    pub engagement: Vec<Engagement>,
    /// Creator ids the viewer follows.
    pub following: HashSet<Arc<str>>,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    /// Gesture units per terminal row for mouse drags.
    pub row_height_units: f64,
    pub share_base_url: String,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,
    pub layout: FeedLayout,
}

impl App {
    pub fn new(entries: Vec<FeedEntry>, config: &Config) -> Self {
        Self::with_start(entries, config, 0)
    }

    /// Open the feed at `start` instead of the first entry. An out-of-range
    /// start leaves the feed at the first entry.
    pub fn with_start(entries: Vec<FeedEntry>, config: &Config, start: usize) -> Self {
        let media = entries
            .iter()
            .map(|e| SimulatedMedia::new(e.metadata.duration_secs, config.autoplay));
        let playback = PlaybackBinding::new(media);
        let engagement = entries.iter().map(Engagement::from_entry).collect();
        let following = entries
            .iter()
            .filter(|e| e.metadata.following_creator)
            .map(|e| Arc::clone(&e.metadata.creator.id))
            .collect();

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        let warnings = keybindings.apply_overrides(&config.keybindings);
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let mut app = Self {
            navigator: FeedNavigator::new(entries.len(), config.navigator_settings()),
            entries: Arc::new(entries),
            playback,
            engagement,
            following,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            row_height_units: config.row_height_units,
            share_base_url: config.share_base_url.clone(),
            status_message: None,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
            layout: FeedLayout::default(),
        };

        if let Some(first_warning) = warnings.into_iter().next() {
            app.set_status(first_warning);
        }

        if start != 0 && app.navigator.go_to(i64::try_from(start).unwrap_or(i64::MAX)).is_none() {
            tracing::warn!(start, count = app.entries.len(), "Start index out of range");
        }
        if let Some(index) = app.navigator.current_index() {
            app.playback.bind(index);
            app.record_view(index);
        }
        app
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn current_index(&self) -> Option<usize> {
        self.navigator.current_index()
    }

    pub fn current_entry(&self) -> Option<&FeedEntry> {
        self.current_index().and_then(|i| self.entries.get(i))
    }

    pub fn current_engagement(&self) -> Option<&Engagement> {
        self.current_index().and_then(|i| self.engagement.get(i))
    }

    pub fn active_handle(&self) -> Option<&PlaybackHandle<SimulatedMedia>> {
        self.playback.active()
    }

    pub fn pagination(&self) -> Vec<PageMarker> {
        self.navigator.pagination()
    }

    /// Every navigation path ends here: rebind playback to the new index.
    fn apply(&mut self, change: Option<IndexChanged>) -> Option<IndexChanged> {
        let change = change?;
        self.playback.bind(change.current);
        self.needs_redraw = true;
        Some(change)
    }

    pub fn go_to(&mut self, target: i64) -> Option<IndexChanged> {
        let change = self.navigator.go_to(target);
        self.apply(change)
    }

    pub fn step(&mut self, step: Step) -> Option<IndexChanged> {
        let change = self.navigator.step(step);
        self.apply(change)
    }

    pub fn first(&mut self) -> Option<IndexChanged> {
        let change = self.navigator.first();
        self.apply(change)
    }

    pub fn last(&mut self) -> Option<IndexChanged> {
        let change = self.navigator.last();
        self.apply(change)
    }

    pub fn touch_start(&mut self, y: f64) {
        self.navigator.touch_start(y);
    }

    /// End a touch gesture. A tap toggles playback of the active entry.
    pub fn touch_end(&mut self, y: f64) -> TouchOutcome {
        let outcome = self.navigator.touch_end(y);
        match outcome {
            TouchOutcome::Tap => self.toggle_play(),
            TouchOutcome::Swiped(change) => {
                self.apply(change);
            }
            TouchOutcome::NoGesture | TouchOutcome::BelowThreshold => {}
        }
        outcome
    }

    pub fn touch_cancel(&mut self) {
        self.navigator.touch_cancel();
    }

    pub fn wheel(&mut self, delta_y: f64) -> Option<IndexChanged> {
        let change = self.navigator.wheel(delta_y);
        self.apply(change)
    }

    /// Observer for index-change notifications.
    pub fn on_index_changed(&mut self, change: IndexChanged) {
        self.record_view(change.current);
        self.needs_redraw = true;
    }

    /// Count a view the first time an entry becomes active.
    fn record_view(&mut self, index: usize) {
        if let Some(state) = self.engagement.get_mut(index) {
            if !state.viewed {
                state.viewed = true;
                state.views = state.views.saturating_add(1);
                tracing::debug!(index, views = state.views, "Recorded view");
            }
        }
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn toggle_play(&mut self) {
        if let Some(handle) = self.playback.active_mut() {
            handle.toggle_play();
            self.needs_redraw = true;
        }
    }

    pub fn toggle_mute(&mut self) {
        if let Some(handle) = self.playback.active_mut() {
            let muted = handle.toggle_mute();
            self.set_status(if muted { "Muted" } else { "Unmuted" });
        }
    }

    /// Advance the active entry's clock and fire its time-update signal.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(handle) = self.playback.active_mut() {
            if handle.media_mut().advance(elapsed) {
                handle.on_time_update();
                self.needs_redraw = true;
            }
        }
    }

    // ------------------------------------------------------------------
    // Engagement
    // ------------------------------------------------------------------

    pub fn toggle_like(&mut self) {
        let Some(state) = self.current_index().and_then(|i| self.engagement.get_mut(i)) else {
            return;
        };
        state.liked = !state.liked;
        state.likes = if state.liked {
            state.likes.saturating_add(1)
        } else {
            state.likes.saturating_sub(1)
        };
        self.needs_redraw = true;
    }

    pub fn toggle_save(&mut self) {
        let Some(state) = self.current_index().and_then(|i| self.engagement.get_mut(i)) else {
            return;
        };
        state.saved = !state.saved;
        let msg = if state.saved { "Saved" } else { "Removed from saved" };
        self.set_status(msg);
    }

    pub fn is_following(&self, creator_id: &str) -> bool {
        self.following.contains(creator_id)
    }

    /// Follow or unfollow the creator of the current entry. Applies to every
    /// entry by that creator.
    pub fn toggle_follow(&mut self) {
        let Some(creator) = self.current_entry().map(|e| e.metadata.creator.clone()) else {
            return;
        };
        if self.following.remove(&creator.id) {
            self.set_status(format!("Unfollowed {}", creator.handle()));
        } else {
            self.following.insert(Arc::clone(&creator.id));
            self.set_status(format!("Following {}", creator.handle()));
        }
    }

    /// Shareable link for the current entry.
    pub fn share_link(&self) -> Option<String> {
        self.current_entry().map(|entry| {
            format!(
                "{}/video/{}",
                self.share_base_url.trim_end_matches('/'),
                entry.id
            )
        })
    }

    pub fn share(&mut self) {
        if let Some(link) = self.share_link() {
            tracing::info!(link = %link, "Share link");
            self.set_status(format!("Share: {}", link));
        }
    }

    // ------------------------------------------------------------------
    // Theme and status
    // ------------------------------------------------------------------

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant and return its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.playback.release();
    }
}
