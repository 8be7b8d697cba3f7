//! # Site Configuration
//!
//! Manages the site configuration stored in `~/.config/termfolio/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the user's XDG config directory. Every field has a default, so an empty
//! object (or a missing file) yields a working site:
//!
//! ```json
//! {
//!   "page": "/",
//!   "targets": [{ "label": "Home", "path": "/" }, { "label": "Blog", "path": "/blog" }],
//!   "menu_heading": "Where to?",
//!   "shortcuts": { "h": "/", "b": "/blog" },
//!   "prompt": { "glyph": "$", "placeholder": "type 'help' and press Enter" },
//!   "console": { "height": 12, "min_height": 5 },
//!   "theme": "Catppuccin Mocha"
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::ui::commands::{ShortcutTable, DEFAULT_SHORTCUTS, NAVIGATION_COMMANDS};
use crate::ui::menu::MenuItem;
use crate::ui::tray::{DEFAULT_HEIGHT, DEFAULT_MIN_HEIGHT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors that are recovered from or reported to the user.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed menu payload: {0}")]
    MenuPayload(#[source] serde_json::Error),

    #[error("invalid shortcut key {0:?}: expected a single letter")]
    InvalidShortcut(String),
}

/// Prompt appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptConfig {
    #[serde(default = "default_glyph")]
    pub glyph: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_glyph() -> String {
    "$".to_string()
}

fn default_placeholder() -> String {
    "type 'help' and press Enter".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            glyph: default_glyph(),
            placeholder: default_placeholder(),
        }
    }
}

/// Console tray sizing, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    #[serde(default = "default_height")]
    pub height: u16,
    #[serde(default = "default_min_height")]
    pub min_height: u16,
}

fn default_height() -> u16 {
    DEFAULT_HEIGHT
}

fn default_min_height() -> u16 {
    DEFAULT_MIN_HEIGHT
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            min_height: default_min_height(),
        }
    }
}

/// Persisted site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Identifier of the page shown at startup.
    #[serde(default = "default_page")]
    pub page: String,

    /// Ordered navigation targets shown in the menu.
    #[serde(default = "default_targets")]
    pub targets: Vec<MenuItem>,

    /// Optional line shown above the menu items.
    #[serde(default)]
    pub menu_heading: Option<String>,

    /// Single-letter navigation shortcuts.
    #[serde(default = "default_shortcuts")]
    pub shortcuts: BTreeMap<String, String>,

    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub console: ConsoleConfig,

    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

fn default_page() -> String {
    "/".to_string()
}

fn default_targets() -> Vec<MenuItem> {
    NAVIGATION_COMMANDS
        .iter()
        .map(|(keyword, path)| MenuItem::new(capitalize(keyword), *path))
        .collect()
}

fn default_shortcuts() -> BTreeMap<String, String> {
    DEFAULT_SHORTCUTS
        .iter()
        .map(|(key, path)| (key.to_string(), (*path).to_string()))
        .collect()
}

fn default_theme_name() -> String {
    "Catppuccin Mocha".to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page: default_page(),
            targets: default_targets(),
            menu_heading: None,
            shortcuts: default_shortcuts(),
            prompt: PromptConfig::default(),
            console: ConsoleConfig::default(),
            theme: default_theme_name(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_default()
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "termfolio")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Validate and build the shortcut table.
    pub fn shortcut_table(&self) -> Result<ShortcutTable, ConfigError> {
        ShortcutTable::from_pairs(
            self.shortcuts
                .iter()
                .map(|(key, path)| (key.as_str(), path.as_str())),
        )
    }
}
