//! Feed data: entry types and the JSON feed loader.
//!
//! # Example
//!
//! ```
//! use reels::feed::{parse_feed, FeedOptions};
//!
//! let json = r#"[{"id": "v1", "video_url": "https://cdn.example.com/v1.mp4"}]"#;
//! let entries = parse_feed(json, &FeedOptions::default()).unwrap();
//! assert_eq!(&*entries[0].id, "v1");
//! ```

mod entry;
mod loader;

pub use entry::{Creator, EngagementCounts, EntryMetadata, FeedEntry};
pub use loader::{
    load_feed, parse_feed, FeedError, FeedOptions, DEFAULT_FEED_LIMIT, MAX_FEED_FILE_SIZE,
};
