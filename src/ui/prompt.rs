//! # Command Prompt
//!
//! Single-line text input with a local command history.
//!
//! ## Keys
//!
//! - printable characters - insert at the end
//! - `Backspace` - delete the last character
//! - `Enter` - submit the trimmed text (whitespace-only input is discarded)
//! - `Esc` - clear the field and reset the history cursor
//! - `Up` / `Down` - walk the history
//!
//! ## History Cursor
//!
//! The cursor ranges over `0..=history.len()`. `history.len()` is the parked
//! position "one past the newest entry", where the field is empty.
//!
//! ```text
//! history: [ "help", "menu", "blog" ]     parked
//!              0       1       2           3
//!                    <── Up        Down ──>
//! ```

use crate::ui::surface::InputSurface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events emitted by the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// A non-empty command, trimmed.
    Submit { command: String },
    /// The field was cleared with `Esc`.
    Cancel,
}

#[derive(Debug)]
pub struct CommandPrompt {
    glyph: String,
    placeholder: String,
    value: String,
    history: Vec<String>,
    history_cursor: usize,
    active: bool,
    focused: bool,
}

impl CommandPrompt {
    pub fn new(glyph: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            placeholder: placeholder.into(),
            value: String::new(),
            history: Vec::new(),
            history_cursor: 0,
            active: true,
            focused: false,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Submitted commands, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    /// Handle a key press. Returns an event when the key submits or cancels.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PromptEvent> {
        if !self.active {
            return None;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.value.clear();
                self.history_cursor = self.history.len();
                Some(PromptEvent::Cancel)
            }
            KeyCode::Up => {
                self.history_up();
                None
            }
            KeyCode::Down => {
                self.history_down();
                None
            }
            KeyCode::Backspace => {
                self.value.pop();
                None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.value.push(c);
                None
            }
            _ => None,
        }
    }

    fn submit(&mut self) -> Option<PromptEvent> {
        let command = self.value.trim().to_string();
        self.value.clear();
        if command.is_empty() {
            return None;
        }
        self.history.push(command.clone());
        self.history_cursor = self.history.len();
        Some(PromptEvent::Submit { command })
    }

    fn history_up(&mut self) {
        if self.history_cursor == 0 {
            return;
        }
        self.history_cursor -= 1;
        self.value = self.history[self.history_cursor].clone();
    }

    fn history_down(&mut self) {
        if self.history_cursor >= self.history.len() {
            return;
        }
        self.history_cursor += 1;
        match self.history.get(self.history_cursor) {
            Some(command) => self.value = command.clone(),
            None => self.value.clear(),
        }
    }
}

impl InputSurface for CommandPrompt {
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
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(prompt: &mut CommandPrompt, text: &str) {
        for c in text.chars() {
            prompt.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn submit(prompt: &mut CommandPrompt, text: &str) -> Option<PromptEvent> {
        type_text(prompt, text);
        prompt.handle_key(key(KeyCode::Enter))
    }

    #[test]
    fn test_typing_builds_value() {
        let mut prompt = CommandPrompt::new("$", "type a command");
        type_text(&mut prompt, "help");
        assert_eq!(prompt.value(), "help");
        prompt.handle_key(key(KeyCode::Backspace));
        assert_eq!(prompt.value(), "hel");
    }

    #[test]
    fn test_submit_trims_and_records() {
        let mut prompt = CommandPrompt::new("$", "");
        let event = submit(&mut prompt, "  blog  ");
        assert_eq!(
            event,
            Some(PromptEvent::Submit {
                command: "blog".to_string()
            })
        );
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.history(), ["blog"]);
    }

    #[test]
    fn test_whitespace_submit_is_noop_but_clears() {
        let mut prompt = CommandPrompt::new("$", "");
        assert_eq!(submit(&mut prompt, "   "), None);
        assert_eq!(prompt.value(), "");
        assert!(prompt.history().is_empty());
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), None);
        assert!(prompt.history().is_empty());
    }

    #[test]
    fn test_escape_clears_without_submitting() {
        let mut prompt = CommandPrompt::new("$", "");
        submit(&mut prompt, "help");
        prompt.handle_key(key(KeyCode::Up));
        assert_eq!(prompt.history_cursor(), 0);
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), Some(PromptEvent::Cancel));
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.history_cursor(), 1);
        assert_eq!(prompt.history().len(), 1);
    }

    #[test]
    fn test_history_walk_up_and_down() {
        let mut prompt = CommandPrompt::new("$", "");
        for cmd in ["one", "two", "three"] {
            submit(&mut prompt, cmd);
        }

        let mut seen = Vec::new();
        for _ in 0..3 {
            prompt.handle_key(key(KeyCode::Up));
            seen.push(prompt.value().to_string());
        }
        assert_eq!(seen, ["three", "two", "one"]);

        // Extra Up stays on the oldest entry.
        prompt.handle_key(key(KeyCode::Up));
        assert_eq!(prompt.value(), "one");
        assert_eq!(prompt.history_cursor(), 0);

        prompt.handle_key(key(KeyCode::Down));
        assert_eq!(prompt.value(), "two");
        prompt.handle_key(key(KeyCode::Down));
        assert_eq!(prompt.value(), "three");
        prompt.handle_key(key(KeyCode::Down));
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.history_cursor(), 3);

        // Parked: Down is a no-op, Up returns to the newest.
        prompt.handle_key(key(KeyCode::Down));
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.history_cursor(), 3);
        prompt.handle_key(key(KeyCode::Up));
        assert_eq!(prompt.value(), "three");
    }

    #[test]
    fn test_history_keys_with_empty_history() {
        let mut prompt = CommandPrompt::new("$", "");
        prompt.handle_key(key(KeyCode::Up));
        prompt.handle_key(key(KeyCode::Down));
        assert_eq!(prompt.value(), "");
        assert_eq!(prompt.history_cursor(), 0);
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut prompt = CommandPrompt::new("$", "");
        prompt.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(prompt.value(), "");
        prompt.handle_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(prompt.value(), "A");
    }

    #[test]
    fn test_inactive_prompt_ignores_keys() {
        let mut prompt = CommandPrompt::new("$", "");
        prompt.focus();
        prompt.deactivate();
        assert!(!prompt.is_focused());
        assert_eq!(submit(&mut prompt, "help"), None);
        assert_eq!(prompt.value(), "");

        prompt.activate();
        prompt.set_value("kept");
        assert_eq!(prompt.value(), "kept");
    }

    #[test]
    fn test_focus_requires_active() {
        let mut prompt = CommandPrompt::new("$", "");
        prompt.deactivate();
        prompt.focus();
        assert!(!prompt.is_focused());
        prompt.activate();
        prompt.focus();
        assert!(prompt.is_focused());
        assert!(prompt.accepts_text());
    }
}
