//! Configuration file parser for ~/.config/reels/config.toml.
//!
//! The config file is optional: a missing or empty file yields
//! `Config::default()`. Unknown keys are accepted but logged, since they
//! are usually typos.
use crate::feed::DEFAULT_FEED_LIMIT;
use crate::navigator::{NavigatorSettings, DEFAULT_SWIPE_THRESHOLD, DEFAULT_WHEEL_COOLDOWN};
use crate::player::AutoplayPolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid value for `{key}` in config file: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level application configuration.
///
/// Every field has a default, so any subset of keys can be given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Vertical travel, in gesture units, a drag must exceed to change entry.
    pub swipe_threshold: f64,

    /// Cooldown after an accepted wheel event, in milliseconds.
    pub wheel_cooldown_ms: u64,

    /// Gesture units per terminal row when converting mouse drags.
    pub row_height_units: f64,

    /// Maximum number of entries loaded from the feed (0 = unlimited).
    pub max_entries: usize,

    /// How simulated playback treats autoplay requests.
    pub autoplay: AutoplayPolicy,

    /// Origin used to build share links (`<origin>/video/<id>`).
    pub share_base_url: String,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            wheel_cooldown_ms: DEFAULT_WHEEL_COOLDOWN.as_millis() as u64,
            row_height_units: 16.0,
            max_entries: DEFAULT_FEED_LIMIT,
            autoplay: AutoplayPolicy::default(),
            share_base_url: "https://reels.example.com".to_string(),
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 8] = [
        "theme",
        "swipe_threshold",
        "wheel_cooldown_ms",
        "row_height_units",
        "max_entries",
        "autoplay",
        "share_base_url",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML or wrong value types → `Err(ConfigError::Parse)`
    /// - Non-positive or non-finite gesture tunables → `Err(ConfigError::InvalidValue)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        tracing::info!(
            theme = %config.theme,
            autoplay = ?config.autoplay,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Gesture tunables must be finite and positive.
    fn validate(&self) -> Result<(), ConfigError> {
        let tunables = [
            ("swipe_threshold", self.swipe_threshold),
            ("row_height_units", self.row_height_units),
        ];
        for (key, value) in tunables {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }
        Ok(())
    }

    /// Navigator tunables derived from this config.
    pub fn navigator_settings(&self) -> NavigatorSettings {
        NavigatorSettings {
            swipe_threshold: self.swipe_threshold,
            wheel_cooldown: Duration::from_millis(self.wheel_cooldown_ms),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("reels_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.swipe_threshold, 50.0);
        assert_eq!(config.wheel_cooldown_ms, 600);
        assert_eq!(config.max_entries, 20);
        assert_eq!(config.autoplay, AutoplayPolicy::MutedOnly);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/reels_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_returns_default() {
        let path = write_config("whitespace", "  \n\n ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.wheel_cooldown_ms, 600);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::parse("swipe_threshold = 30.0\n").unwrap();
        assert_eq!(config.swipe_threshold, 30.0);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.row_height_units, 16.0);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "light"
swipe_threshold = 80.0
wheel_cooldown_ms = 250
row_height_units = 20.0
max_entries = 0
autoplay = "blocked"
share_base_url = "https://clips.example.org"

[keybindings]
next = "n"
prev = "p"
"#;
        let path = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.swipe_threshold, 80.0);
        assert_eq!(config.wheel_cooldown_ms, 250);
        assert_eq!(config.max_entries, 0);
        assert_eq!(config.autoplay, AutoplayPolicy::Blocked);
        assert_eq!(config.share_base_url, "https://clips.example.org");
        assert_eq!(config.keybindings.get("next").map(String::as_str), Some("n"));

        let settings = config.navigator_settings();
        assert_eq!(settings.wheel_cooldown, Duration::from_millis(250));
        assert_eq!(settings.swipe_threshold, 80.0);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_muted_only_autoplay_name() {
        let config = Config::parse("autoplay = \"muted-only\"\n").unwrap();
        assert_eq!(config.autoplay, AutoplayPolicy::MutedOnly);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_autoplay_value_is_error() {
        assert!(Config::parse("autoplay = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_non_positive_row_height_rejected() {
        for value in ["0.0", "-16.0"] {
            let err = Config::parse(&format!("row_height_units = {}\n", value)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { key: "row_height_units", .. }),
                "{}: {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_non_finite_swipe_threshold_rejected() {
        for value in ["nan", "inf", "0.0", "-50.0"] {
            let err = Config::parse(&format!("swipe_threshold = {}\n", value)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { key: "swipe_threshold", .. }),
                "{}: {:?}",
                value,
                err
            );
            assert!(err.to_string().contains("swipe_threshold"));
        }
    }

    #[test]
    fn test_invalid_row_height_in_file_is_error() {
        let path = write_config("bad_row_height", "row_height_units = -16.0\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::parse("theme = \"dark\"\nmystery = 1\n").unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
