//! # Command and Shortcut Tables
//!
//! Two independent lookups:
//!
//! - [`CommandTable`] maps a submitted prompt keyword to a [`Command`].
//!   Keywords are bare words, matched trimmed and case-insensitively. There
//!   are no arguments.
//! - [`ShortcutTable`] maps a single lowercase letter to a navigation path.
//!   It only ever sees raw key presses, never prompt text.

use crate::ui::config::ConfigError;
use std::collections::BTreeMap;

/// Navigation keywords and their fixed destinations.
pub const NAVIGATION_COMMANDS: [(&str, &str); 8] = [
    ("home", "/"),
    ("blog", "/blog"),
    ("work", "/work"),
    ("about", "/about"),
    ("contact", "/contact"),
    ("archive", "/archive"),
    ("projects", "/projects"),
    ("everyday", "/everyday"),
];

/// Default single-key shortcuts.
pub const DEFAULT_SHORTCUTS: [(char, &str); 8] = [
    ('h', "/"),
    ('b', "/blog"),
    ('w', "/work"),
    ('a', "/about"),
    ('c', "/contact"),
    ('r', "/archive"),
    ('p', "/projects"),
    ('e', "/everyday"),
];

/// Action bound to a command keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to the selectable menu.
    Menu,
    /// Print the command and shortcut summary.
    Help,
    /// Empty the output log and forget the session flag.
    Clear,
    /// Navigate to a path.
    Navigate(String),
}

#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: BTreeMap<String, Command>,
}

impl CommandTable {
    /// The built-in table: `menu`, `help`, `clear` and the navigation keywords.
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("menu".to_string(), Command::Menu);
        commands.insert("help".to_string(), Command::Help);
        commands.insert("clear".to_string(), Command::Clear);
        for (keyword, path) in NAVIGATION_COMMANDS {
            commands.insert(keyword.to_string(), Command::Navigate(path.to_string()));
        }
        Self { commands }
    }

    /// Look up a submitted command.
    pub fn lookup(&self, input: &str) -> Option<&Command> {
        self.commands.get(&input.trim().to_lowercase())
    }

    /// Keywords that navigate, sorted.
    pub fn navigation_keywords(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .filter(|(_, command)| matches!(command, Command::Navigate(_)))
            .map(|(keyword, _)| keyword.as_str())
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutTable {
    shortcuts: BTreeMap<char, String>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self {
            shortcuts: BTreeMap::new(),
        }
    }

    /// Build a table from `(key, path)` pairs as they appear in configuration.
    ///
    /// Keys must be a single ASCII letter; uppercase is folded to lowercase.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (key, path) in pairs {
            let mut chars = key.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_lowercase(),
                _ => return Err(ConfigError::InvalidShortcut(key.to_string())),
            };
            table.shortcuts.insert(letter, path.to_string());
        }
        Ok(table)
    }

    /// Path bound to a pressed key. Only lowercase letters match.
    pub fn lookup(&self, key: char) -> Option<&str> {
        self.shortcuts.get(&key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.shortcuts.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self {
            shortcuts: DEFAULT_SHORTCUTS
                .iter()
                .map(|(k, v)| (*k, (*v).to_string()))
                .collect(),
        }
    }
}
