//! # Console Tray
//!
//! Visibility and height of the panel that holds the output log and the
//! active input surface. The tray is docked above the footer line; its top
//! border is the drag handle.
//!
//! ```text
//! row 0   ┌───────────────────────────┐
//!         │          page             │
//!         │                           │
//! handle  ├─ console ─────────────────┤  <- drag to resize
//!         │ output log                │   height = bottom - pointer row
//!         │ $ prompt                  │
//!         └───────────────────────────┘
//! bottom  footer
//! ```
//!
//! `bottom` is the first row below the tray, so releasing the handle on the
//! row it was pressed on leaves the height unchanged.
//!
//! Heights are clamped to `[min_height, viewport / 2]`. When the viewport is
//! so small that half of it is below `min_height`, `min_height` wins.

/// Fallback height used when a configured height is zero.
pub const DEFAULT_HEIGHT: u16 = 12;

/// Smallest height a drag can produce unless configured otherwise.
pub const DEFAULT_MIN_HEIGHT: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleTray {
    hidden: bool,
    height: u16,
    saved_height: u16,
    min_height: u16,
    dragging: bool,
}

impl ConsoleTray {
    pub fn new(height: u16, min_height: u16) -> Self {
        let min_height = min_height.max(1);
        let height = if height == 0 { DEFAULT_HEIGHT } else { height }.max(min_height);
        Self {
            hidden: false,
            height,
            saved_height: height,
            min_height,
            dragging: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Height in rows. Zero while hidden.
    pub fn height(&self) -> u16 {
        if self.hidden {
            0
        } else {
            self.height
        }
    }

    pub fn min_height(&self) -> u16 {
        self.min_height
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Largest height allowed in a viewport of `viewport_rows` rows.
    pub fn max_height(&self, viewport_rows: u16) -> u16 {
        (viewport_rows / 2).max(self.min_height)
    }

    /// Clamp a requested height into `[min_height, viewport / 2]`.
    pub fn clamp_height(&self, requested: u16, viewport_rows: u16) -> u16 {
        requested.clamp(self.min_height, self.max_height(viewport_rows))
    }

    /// Pointer pressed on the drag handle.
    pub fn begin_drag(&mut self) {
        if !self.hidden {
            self.dragging = true;
        }
    }

    /// Pointer moved to `pointer_row` while dragging. `bottom` is the first
    /// row below the tray. Returns the new height.
    pub fn drag_to(&mut self, pointer_row: u16, bottom: u16, viewport_rows: u16) -> Option<u16> {
        if !self.dragging {
            return None;
        }
        let requested = bottom.saturating_sub(pointer_row);
        self.height = self.clamp_height(requested, viewport_rows);
        Some(self.height)
    }

    /// Pointer released.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Flip visibility. Hiding remembers the height; showing restores it.
    /// Returns the new hidden state.
    pub fn toggle(&mut self) -> bool {
        if self.hidden {
            self.height = self.saved_height;
            self.hidden = false;
        } else {
            self.saved_height = self.height;
            self.dragging = false;
            self.hidden = true;
        }
        self.hidden
    }
}

impl Default for ConsoleTray {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT, DEFAULT_MIN_HEIGHT)
    }
}
