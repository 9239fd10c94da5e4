//! Keybinding registry: maps key events to actions, with config overrides.
//!
//! The keyboard adapter of the feed navigator lives here: `Down`/`j` and
//! `Up`/`k` resolve to `NextEntry`/`PrevEntry` unless the user rebinds them.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NextEntry,
    PrevEntry,
    FirstEntry,
    LastEntry,
    TogglePlay,
    ToggleMute,
    ToggleLike,
    ToggleSave,
    ToggleFollow,
    Share,
    OpenMedia,
    CycleTheme,
    ShowHelp,
    CloseHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NextEntry => "Next video",
            Self::PrevEntry => "Previous video",
            Self::FirstEntry => "First video",
            Self::LastEntry => "Last video",
            Self::TogglePlay => "Play / pause",
            Self::ToggleMute => "Mute / unmute",
            Self::ToggleLike => "Like / unlike",
            Self::ToggleSave => "Save / unsave",
            Self::ToggleFollow => "Follow / unfollow creator",
            Self::Share => "Show share link",
            Self::OpenMedia => "Open video in system player",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::CloseHelp => "Close help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Feed,
    Help,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats: single chars ("j", "?"), named keys ("Enter", "Esc",
/// "Tab", "Up", "Down", "Left", "Right", "Space", "PageUp", "PageDown",
/// "Home", "End"), "Ctrl+x", and "F1" through "F12".
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        let c = chars.next()?;
        return chars.next().is_none().then_some(KeySpec::ctrl(c));
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "space" => Some(KeyCode::Char(' ')),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(KeySpec::ch(c))
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts;
/// lookups fall back to `Global`.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;
        use Context::*;

        let defaults = [
            (Global, KeySpec::ch('q'), Quit),
            (Global, KeySpec::ctrl('c'), Quit),
            (Global, KeySpec::ch('?'), ShowHelp),
            (Global, KeySpec::ch('T'), CycleTheme),
            // Feed navigation
            (Feed, KeySpec::ch('j'), NextEntry),
            (Feed, KeySpec::plain(KeyCode::Down), NextEntry),
            (Feed, KeySpec::ch('k'), PrevEntry),
            (Feed, KeySpec::plain(KeyCode::Up), PrevEntry),
            (Feed, KeySpec::ch('g'), FirstEntry),
            (Feed, KeySpec::plain(KeyCode::Home), FirstEntry),
            (Feed, KeySpec::ch('G'), LastEntry),
            (Feed, KeySpec::plain(KeyCode::End), LastEntry),
            // Player
            (Feed, KeySpec::ch(' '), TogglePlay),
            (Feed, KeySpec::plain(KeyCode::Enter), TogglePlay),
            (Feed, KeySpec::ch('m'), ToggleMute),
            // Action bar and overlay
            (Feed, KeySpec::ch('l'), ToggleLike),
            (Feed, KeySpec::ch('b'), ToggleSave),
            (Feed, KeySpec::ch('f'), ToggleFollow),
            (Feed, KeySpec::ch('s'), Share),
            (Feed, KeySpec::ch('o'), OpenMedia),
            // Help overlay
            (Help, KeySpec::plain(KeyCode::Esc), CloseHelp),
            (Help, KeySpec::ch('?'), CloseHelp),
            (Help, KeySpec::ch('q'), CloseHelp),
        ];

        for (context, key, action) in defaults {
            self.bind(context, key, action);
        }
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "next", "toggle_mute").
    /// Values are key strings (e.g., "n", "Ctrl+d", "F5"). The new key
    /// replaces every default key of that action, in the same contexts.
    ///
    /// Returns warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key: specific context first, then Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            return self.lookup.get(&(Context::Global, key)).copied();
        }

        None
    }

    /// All bindings as (context, key display, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "next" | "next_entry" | "down" => Some(Action::NextEntry),
        "prev" | "previous" | "prev_entry" | "up" => Some(Action::PrevEntry),
        "first" | "first_entry" => Some(Action::FirstEntry),
        "last" | "last_entry" => Some(Action::LastEntry),
        "play" | "toggle_play" | "pause" => Some(Action::TogglePlay),
        "mute" | "toggle_mute" => Some(Action::ToggleMute),
        "like" | "toggle_like" => Some(Action::ToggleLike),
        "save" | "toggle_save" | "bookmark" => Some(Action::ToggleSave),
        "follow" | "toggle_follow" => Some(Action::ToggleFollow),
        "share" => Some(Action::Share),
        "open" | "open_media" => Some(Action::OpenMedia),
        "theme" | "cycle_theme" => Some(Action::CycleTheme),
        "help" | "show_help" => Some(Action::ShowHelp),
        "close_help" => Some(Action::CloseHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_navigation_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Feed), Some(Action::NextEntry));
        assert_eq!(lookup(&reg, KeyCode::Down, Context::Feed), Some(Action::NextEntry));
        assert_eq!(lookup(&reg, KeyCode::Char('k'), Context::Feed), Some(Action::PrevEntry));
        assert_eq!(lookup(&reg, KeyCode::Up, Context::Feed), Some(Action::PrevEntry));
    }

    #[test]
    fn test_feed_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Feed), Some(Action::Quit));
        assert_eq!(
            reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, Context::Feed),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_help_context_overrides_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Help), Some(Action::CloseHelp));
        assert_eq!(lookup(&reg, KeyCode::Esc, Context::Help), Some(Action::CloseHelp));
    }

    #[test]
    fn test_feed_keys_not_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Global), None);
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Help), None);
    }

    #[test]
    fn test_apply_overrides_replaces_all_keys() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("next".to_string(), "n".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());

        assert_eq!(lookup(&reg, KeyCode::Char('n'), Context::Feed), Some(Action::NextEntry));
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Feed), None);
        assert_eq!(lookup(&reg, KeyCode::Down, Context::Feed), None);
        // Only the overridden action moved
        assert_eq!(lookup(&reg, KeyCode::Char('k'), Context::Feed), Some(Action::PrevEntry));
    }

    #[test]
    fn test_apply_overrides_keeps_contexts() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("quit".to_string(), "Ctrl+q".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), None);
        // The override registers one binding even though Quit had two defaults
        let quit_bindings = reg
            .all_bindings()
            .into_iter()
            .filter(|(_, _, a, _)| *a == Action::Quit)
            .count();
        assert_eq!(quit_bindings, 1);
    }

    #[test]
    fn test_apply_overrides_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([
            ("teleport".to_string(), "t".to_string()),
            ("mute".to_string(), "Ctrl+Alt+M".to_string()),
        ]);
        let mut warnings = reg.apply_overrides(&overrides);
        warnings.sort();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cannot parse key"));
        assert!(warnings[1].contains("Unknown action"));
    }

    #[test]
    fn test_parse_key_string_forms() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::ch(' ')));
        assert_eq!(parse_key_string("PageDown"), Some(KeySpec::plain(KeyCode::PageDown)));
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("j"), Some(KeySpec::ch('j')));
        assert_eq!(parse_key_string("jk"), None);
        assert_eq!(parse_key_string(""), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ch('j')), "j");
        assert_eq!(format_key(&KeySpec::ch(' ')), "Space");
        assert_eq!(format_key(&KeySpec::ctrl('c')), "Ctrl+c");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(2))), "F2");
    }

    #[test]
    fn test_every_action_has_a_default() {
        let reg = KeybindingRegistry::new();
        let bound: Vec<Action> = reg.all_bindings().iter().map(|(_, _, a, _)| *a).collect();
        for action in [
            Action::Quit,
            Action::NextEntry,
            Action::PrevEntry,
            Action::FirstEntry,
            Action::LastEntry,
            Action::TogglePlay,
            Action::ToggleMute,
            Action::ToggleLike,
            Action::ToggleSave,
            Action::ToggleFollow,
            Action::Share,
            Action::OpenMedia,
            Action::CycleTheme,
            Action::ShowHelp,
            Action::CloseHelp,
        ] {
            assert!(bound.contains(&action), "{:?} has no default key", action);
        }
    }
}
