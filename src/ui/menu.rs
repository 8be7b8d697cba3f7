//! # Selectable Menu
//!
//! A vertical list of navigation targets with exactly one selected item.
//!
//! ## Keys
//!
//! - `Down` / `j`, `Up` / `k` - move by one, stopping at the ends
//! - `Home` / `End` - jump to the first / last item
//! - `Enter` / `Space` - confirm the selected item
//! - `Esc` - cancel
//!
//! ## Pointer
//!
//! Hovering a row selects it ([`MenuEvent::Select`]) without confirming;
//! clicking selects and confirms.
//!
//! ## Configuration Payload
//!
//! When items arrive as a serialized JSON list (the one string-encoded
//! boundary), [`SelectableMenu::from_payload`] parses them. A malformed
//! payload yields an empty, inert menu and a warning in the log file.

use crate::ui::config::ConfigError;
use crate::ui::surface::InputSurface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(alias = "path")]
    pub target: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Events emitted by the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// The selection moved.
    Select { index: usize, item: MenuItem },
    /// The selected item was activated.
    Confirm { index: usize, item: MenuItem },
    /// `Esc` was pressed.
    Cancel,
}

/// Parse a JSON list of `{label, path}` objects.
pub fn parse_payload(payload: &str) -> Result<Vec<MenuItem>, ConfigError> {
    serde_json::from_str(payload).map_err(ConfigError::MenuPayload)
}

#[derive(Debug)]
pub struct SelectableMenu {
    items: Vec<MenuItem>,
    heading: Option<String>,
    selected: usize,
    active: bool,
    focused: bool,
}

impl SelectableMenu {
    /// Menus start suppressed; the orchestrator activates them on demand.
    pub fn new(items: Vec<MenuItem>, heading: Option<String>) -> Self {
        Self {
            items,
            heading,
            selected: 0,
            active: false,
            focused: false,
        }
    }

    /// Build a menu from a serialized item list, falling back to no items.
    pub fn from_payload(payload: &str, heading: Option<String>) -> Self {
        let items = match parse_payload(payload) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "menu payload rejected, using an empty menu");
                Vec::new()
            }
        };
        Self::new(items, heading)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }

    /// Move the selection. Out-of-range indices are ignored.
    ///
    /// Returns a [`MenuEvent::Select`] only when the selection changed.
    pub fn set_selected(&mut self, index: usize) -> Option<MenuEvent> {
        if index >= self.items.len() || index == self.selected {
            return None;
        }
        self.selected = index;
        Some(MenuEvent::Select {
            index,
            item: self.items[index].clone(),
        })
    }

    pub fn select_next(&mut self) -> Option<MenuEvent> {
        let last = self.items.len().checked_sub(1)?;
        self.set_selected((self.selected + 1).min(last))
    }

    pub fn select_prev(&mut self) -> Option<MenuEvent> {
        self.set_selected(self.selected.saturating_sub(1))
    }

    pub fn select_first(&mut self) -> Option<MenuEvent> {
        self.set_selected(0)
    }

    pub fn select_last(&mut self) -> Option<MenuEvent> {
        let last = self.items.len().checked_sub(1)?;
        self.set_selected(last)
    }

    /// Confirm the current selection.
    pub fn confirm(&self) -> Option<MenuEvent> {
        self.selected_item().map(|item| MenuEvent::Confirm {
            index: self.selected,
            item: item.clone(),
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<MenuEvent> {
        if !self.active {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Enter | KeyCode::Char(' ') => self.confirm(),
            KeyCode::Esc => Some(MenuEvent::Cancel),
            _ => None,
        }
    }

    /// Pointer moved over the item at `index`.
    pub fn hover(&mut self, index: usize) -> Option<MenuEvent> {
        if !self.active {
            return None;
        }
        self.set_selected(index)
    }

    /// Pointer clicked the item at `index`: select it, then confirm.
    pub fn click(&mut self, index: usize) -> Vec<MenuEvent> {
        if !self.active || index >= self.items.len() {
            return Vec::new();
        }
        let mut events = Vec::new();
        events.extend(self.set_selected(index));
        events.extend(self.confirm());
        events
    }
}

impl InputSurface for SelectableMenu {
    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.focused = false;
    }

    fn focus(&mut self) {
        if self.active {
            self.focused = true;
        }
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn accepts_text(&self) -> bool {
        false
    }
}
