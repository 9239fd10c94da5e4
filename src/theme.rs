//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant`
//! picks the Dark or Light palette, and `StyleMap` resolves role names
//! to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role of the feed screen, as a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Player --
    pub player_surface: Style,
    pub play_prompt: Style,
    pub mute_indicator: Style,
    pub progress_filled: Style,
    pub progress_track: Style,

    // -- Overlay --
    pub overlay_username: Style,
    pub verified_badge: Style,
    pub follow_button: Style,
    pub following_button: Style,
    pub overlay_title: Style,
    pub overlay_description: Style,
    pub overlay_tag: Style,

    // -- Action bar --
    pub action_normal: Style,
    pub action_liked: Style,
    pub action_saved: Style,
    pub action_count: Style,

    // -- Pagination --
    pub pagination_active: Style,
    pub pagination_inactive: Style,

    // -- Empty state --
    pub empty_title: Style,
    pub empty_hint: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub help_heading: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            player_surface: Style::default().bg(Color::Black).fg(Color::Gray),
            play_prompt: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            mute_indicator: Style::default().fg(Color::Gray),
            progress_filled: Style::default().fg(Color::White),
            progress_track: Style::default().fg(Color::DarkGray),

            overlay_username: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            verified_badge: Style::default().fg(Color::LightBlue),
            follow_button: Style::default().fg(Color::Black).bg(Color::White),
            following_button: Style::default().fg(Color::Gray),
            overlay_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            overlay_description: Style::default().fg(Color::Gray),
            overlay_tag: Style::default().fg(Color::Cyan),

            action_normal: Style::default().fg(Color::White),
            action_liked: Style::default().fg(Color::Red),
            action_saved: Style::default().fg(Color::Yellow),
            action_count: Style::default().fg(Color::Gray),

            pagination_active: Style::default().fg(Color::White),
            pagination_inactive: Style::default().fg(Color::DarkGray),

            empty_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            empty_hint: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default().fg(Color::DarkGray),
            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// For light terminal backgrounds.
    fn light() -> Self {
        Self {
            player_surface: Style::default().bg(Color::White).fg(Color::DarkGray),
            play_prompt: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            mute_indicator: Style::default().fg(Color::DarkGray),
            progress_filled: Style::default().fg(Color::Black),
            progress_track: Style::default().fg(Color::Gray),

            overlay_username: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            verified_badge: Style::default().fg(Color::Blue),
            follow_button: Style::default().fg(Color::White).bg(Color::Black),
            following_button: Style::default().fg(Color::DarkGray),
            overlay_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            overlay_description: Style::default().fg(Color::DarkGray),
            overlay_tag: Style::default().fg(Color::Blue),

            action_normal: Style::default().fg(Color::Black),
            action_liked: Style::default().fg(Color::Red),
            action_saved: Style::default().fg(Color::Magenta),
            action_count: Style::default().fg(Color::DarkGray),

            pagination_active: Style::default().fg(Color::Black),
            pagination_inactive: Style::default().fg(Color::Gray),

            empty_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            empty_hint: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::Gray),
            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup used by the render functions.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 25] = [
    "player_surface",
    "play_prompt",
    "mute_indicator",
    "progress_filled",
    "progress_track",
    "overlay_username",
    "verified_badge",
    "follow_button",
    "following_button",
    "overlay_title",
    "overlay_description",
    "overlay_tag",
    "action_normal",
    "action_liked",
    "action_saved",
    "action_count",
    "pagination_active",
    "pagination_inactive",
    "empty_title",
    "empty_hint",
    "status_bar",
    "panel_border",
    "help_heading",
    // Aliases kept for render code that names the chrome generically
    "title",
    "border",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 25] = [
            p.player_surface,
            p.play_prompt,
            p.mute_indicator,
            p.progress_filled,
            p.progress_track,
            p.overlay_username,
            p.verified_badge,
            p.follow_button,
            p.following_button,
            p.overlay_title,
            p.overlay_description,
            p.overlay_tag,
            p.action_normal,
            p.action_liked,
            p.action_saved,
            p.action_count,
            p.pagination_active,
            p.pagination_inactive,
            p.empty_title,
            p.empty_hint,
            p.status_bar,
            p.panel_border,
            p.help_heading,
            p.overlay_title,
            p.panel_border,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
