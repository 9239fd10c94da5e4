//! Feed entry types.
//!
//! A `FeedEntry` is created once per session from the feed file and never
//! mutated by the navigator. Engagement that changes during a session
//! (likes, follows, saves) lives in `App`, keyed by entry index.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// One video in the feed. Identity is `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub id: Arc<str>,
    pub media_url: Arc<str>,
    /// Cover image shown until playback starts.
    pub poster_url: Option<Arc<str>>,
    pub metadata: EntryMetadata,
}

/// Display metadata carried alongside the media.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMetadata {
    pub title: Option<Arc<str>>,
    pub description: Option<Arc<str>>,
    pub tags: Vec<Arc<str>>,
    /// Known media length. `None` until the backend reports it.
    pub duration_secs: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub creator: Creator,
    pub counts: EngagementCounts,
    /// Whether the viewer had liked this entry when the feed was built.
    pub liked_by_viewer: bool,
    /// Whether the viewer followed the creator when the feed was built.
    pub following_creator: bool,
}

/// The profile that uploaded an entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Creator {
    pub id: Arc<str>,
    pub username: Option<Arc<str>>,
    pub display_name: Option<Arc<str>>,
    /// Carried for library callers; the terminal draws `initial()` instead.
    pub avatar_url: Option<Arc<str>>,
    pub is_verified: bool,
}

impl Creator {
    /// `@username`, or `@user` for profiles without one.
    pub fn handle(&self) -> String {
        format!("@{}", self.username.as_deref().unwrap_or("user"))
    }

    /// Avatar fallback letter: first char of display name, then username.
    pub fn initial(&self) -> char {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}

/// Engagement counters as delivered by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngagementCounts {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}
