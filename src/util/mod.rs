//! Utility functions shared by the loader and the TUI.
//!
//! - **URL validation**: media URLs from the feed file are checked before
//!   they are stored or handed to the OS opener
//! - **Text processing**: Unicode-aware width, truncation, control-character
//!   stripping and compact engagement counts
//!
//! # Examples
//!
//! ```
//! use reels::util::{format_count, truncate_to_width, validate_url};
//!
//! let url = validate_url("https://cdn.example.com/clip.mp4").unwrap();
//! assert_eq!(url.host_str(), Some("cdn.example.com"));
//! assert_eq!(format_count(12_400), "12.4K");
//! assert_eq!(truncate_to_width("A very long caption", 9), "A very...");
//! ```

mod text;
mod url_validator;

pub use text::{display_width, format_count, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url, validate_url_for_open, UrlValidationError};
