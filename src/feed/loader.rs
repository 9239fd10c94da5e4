//! Feed file loader.
//!
//! The feed file is the JSON export of the video listing: either a bare
//! array of video records or an object with a `videos` array. Records
//! mirror the backend rows (`video_url`, `thumbnail_url`, `like_count`,
//! a nested `profiles` object, ...).
//!
//! Loading applies the same selection the listing page does: only active,
//! public videos, newest first, capped at a limit.

use super::entry::{Creator, EngagementCounts, EntryMetadata, FeedEntry};
use crate::util::{strip_control_chars, validate_url};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Feed files above this size are refused outright.
pub const MAX_FEED_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Default number of entries kept after filtering and sorting.
pub const DEFAULT_FEED_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid feed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feed file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// Selection options applied after parsing.
#[derive(Debug, Clone, Copy)]
pub struct FeedOptions {
    /// Maximum number of entries to keep. 0 keeps everything.
    pub limit: usize,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
        }
    }
}

// ============================================================================
// Raw records
// ============================================================================

/// Rows stay untyped here; each is converted on its own in `parse_feed`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFeedDocument {
    List(Vec<serde_json::Value>),
    Wrapped { videos: Vec<serde_json::Value> },
}

/// One listing row. Every column except `id` and `video_url` is nullable.
#[derive(Debug, Deserialize)]
struct RawVideo {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    video_url: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    like_count: Option<u64>,
    #[serde(default)]
    comment_count: Option<u64>,
    #[serde(default)]
    share_count: Option<u64>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    is_private: Option<bool>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    duration_secs: Option<f64>,
    #[serde(default)]
    profiles: Option<RawProfiles>,
    #[serde(default)]
    user_has_liked: Option<bool>,
    #[serde(default)]
    user_is_following: Option<bool>,
}

/// The profile join comes back either as an object or a one-element array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawProfiles {
    One(RawProfile),
    Many(Vec<RawProfile>),
}

#[derive(Debug, Default, Deserialize)]
struct RawProfile {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    is_verified: Option<bool>,
}

impl RawVideo {
    fn is_listed(&self) -> bool {
        let active = self.status.as_deref().map_or(true, |s| s == "active");
        active && !self.is_private.unwrap_or(false)
    }

    fn into_entry(self) -> Option<FeedEntry> {
        if let Err(e) = validate_url(&self.video_url) {
            tracing::warn!(id = %self.id, error = %e, "Skipping video with invalid media URL");
            return None;
        }

        // A broken poster only loses the thumbnail, not the entry
        let poster_url = self
            .thumbnail_url
            .filter(|url| match validate_url(url) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!(id = %self.id, error = %e, "Dropping invalid poster URL");
                    false
                }
            })
            .map(|url| Arc::from(url.trim()));

        let profile = match self.profiles {
            Some(RawProfiles::One(p)) => p,
            Some(RawProfiles::Many(list)) => list.into_iter().next().unwrap_or_default(),
            None => RawProfile::default(),
        };

        let duration_secs = self.duration_secs.filter(|d| d.is_finite() && *d > 0.0);

        Some(FeedEntry {
            id: Arc::from(self.id),
            media_url: Arc::from(self.video_url.trim()),
            poster_url,
            metadata: EntryMetadata {
                title: clean_text(self.title),
                description: clean_text(self.description),
                tags: self
                    .tags
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|t| clean_text(Some(t)))
                    .collect(),
                duration_secs,
                created_at: self.created_at,
                creator: Creator {
                    id: Arc::from(self.user_id.unwrap_or_default()),
                    username: clean_text(profile.username),
                    display_name: clean_text(profile.display_name),
                    avatar_url: profile.avatar_url.map(Arc::from),
                    is_verified: profile.is_verified.unwrap_or(false),
                },
                counts: EngagementCounts {
                    views: self.view_count.unwrap_or_default(),
                    likes: self.like_count.unwrap_or_default(),
                    comments: self.comment_count.unwrap_or_default(),
                    shares: self.share_count.unwrap_or_default(),
                },
                liked_by_viewer: self.user_has_liked.unwrap_or(false),
                following_creator: self.user_is_following.unwrap_or(false),
            },
        })
    }
}

/// Strip control characters and drop strings that end up blank.
fn clean_text(s: Option<String>) -> Option<Arc<str>> {
    let s = s?;
    let cleaned = strip_control_chars(&s);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Arc::from(trimmed))
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Parse feed JSON and apply listing selection.
pub fn parse_feed(json: &str, options: &FeedOptions) -> Result<Vec<FeedEntry>, FeedError> {
    let rows = match serde_json::from_str::<RawFeedDocument>(json)? {
        RawFeedDocument::List(v) => v,
        RawFeedDocument::Wrapped { videos } => videos,
    };
    let total = rows.len();

    let mut seen = HashSet::with_capacity(total);
    let mut listed: Vec<RawVideo> = Vec::with_capacity(total);
    for (row, value) in rows.into_iter().enumerate() {
        let video = match serde_json::from_value::<RawVideo>(value) {
            Ok(video) => video,
            Err(e) => {
                tracing::warn!(row, error = %e, "Skipping malformed video record");
                continue;
            }
        };
        if !video.is_listed() {
            continue;
        }
        if !seen.insert(video.id.clone()) {
            tracing::warn!(id = %video.id, "Duplicate video id in feed, keeping first");
            continue;
        }
        listed.push(video);
    }

    // Newest first; undated records after dated ones. sort_by is stable.
    listed.sort_by(|a, b| match (&a.created_at, &b.created_at) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut entries: Vec<FeedEntry> = listed.into_iter().filter_map(RawVideo::into_entry).collect();
    if options.limit > 0 {
        entries.truncate(options.limit);
    }

    tracing::debug!(total, kept = entries.len(), "Parsed feed");
    Ok(entries)
}

/// Read and parse a feed file.
pub fn load_feed(path: &Path, options: &FeedOptions) -> Result<Vec<FeedEntry>, FeedError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_FEED_FILE_SIZE {
        return Err(FeedError::TooLarge {
            size,
            max: MAX_FEED_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path)?;
    let entries = parse_feed(&content, options)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "Loaded feed");
    Ok(entries)
}
