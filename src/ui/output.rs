//! # Output Log
//!
//! Append-only scrollback of categorized entries.
//!
//! ## Ordering
//!
//! Every entry gets a sequence number from a counter that only ever grows.
//! [`OutputLog::clear`] drops the entries but keeps the counter, so numbers
//! are never reused within a page lifetime.
//!
//! ## Auto-scroll
//!
//! Appending does not move the viewport immediately: it marks a scroll as
//! pending. The renderer knows how many rows the log occupies once layout and
//! wrapping are done and calls [`OutputLog::settle_scroll`], which parks the
//! viewport on the newest entry. The host draws before reading each event, so
//! the log is always at the bottom by the time the next input is handled.

use crate::ui::markup;

/// Display category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    System,
    Command,
    Error,
    Success,
    #[default]
    None,
}

/// Entry payload: literal text or inline markup (see [`markup`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Markup(String),
}

impl Content {
    /// The displayed text with markup stripped.
    pub fn plain_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Markup(source) => markup::plain_text(source),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

/// One immutable line of scrollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    content: Content,
    category: Category,
    sequence: u64,
}

impl OutputEntry {
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Shorthand for `content().plain_text()`.
    pub fn text(&self) -> String {
        self.content.plain_text()
    }
}

#[derive(Debug, Default)]
pub struct OutputLog {
    entries: Vec<OutputEntry>,
    next_sequence: u64,
    scroll_offset: usize,
    max_scroll: usize,
    scroll_pending: bool,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and schedule a scroll to it.
    pub fn append(&mut self, content: impl Into<Content>, category: Category) -> &OutputEntry {
        let entry = OutputEntry {
            content: content.into(),
            category,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.scroll_pending = true;
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Append literal text. The text is escaped, so markup in it is shown as-is.
    pub fn append_line(&mut self, text: &str, category: Category) -> &OutputEntry {
        self.append(Content::Markup(markup::escape(text)), category)
    }

    /// Remove every entry at once.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_offset = 0;
        self.max_scroll = 0;
        self.scroll_pending = false;
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.last()
    }

    /// First visible row (0 = top of the scrollback).
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Whether an append is waiting for layout to scroll the view.
    pub fn is_scroll_pending(&self) -> bool {
        self.scroll_pending
    }

    /// Whether the newest row is in view.
    pub fn is_at_bottom(&self) -> bool {
        !self.scroll_pending && self.scroll_offset >= self.max_scroll
    }

    /// Resolve the scroll position once the rendered size is known.
    pub fn settle_scroll(&mut self, content_rows: usize, viewport_rows: usize) {
        self.max_scroll = content_rows.saturating_sub(viewport_rows);
        if self.scroll_pending {
            self.scroll_offset = self.max_scroll;
            self.scroll_pending = false;
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll);
        }
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = (self.scroll_offset + rows).min(self.max_scroll);
    }
}
