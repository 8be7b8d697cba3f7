//! # Input Surfaces
//!
//! The prompt and the menu take turns being the active input surface. Both
//! implement [`InputSurface`]; the orchestrator owns one of each and switches
//! between them by [`Surface`] rather than replacing either one.

/// The closed set of input surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Prompt,
    Menu,
}

/// Contract shared by the prompt and the menu.
///
/// A deactivated surface keeps its state (prompt text, history, menu
/// selection) but ignores input until it is activated again.
pub trait InputSurface {
    fn activate(&mut self);

    /// Suppress the surface. Also drops keyboard focus.
    fn deactivate(&mut self);

    /// Give keyboard focus. Has no effect on an inactive surface.
    fn focus(&mut self);

    fn blur(&mut self);

    fn is_active(&self) -> bool;

    fn is_focused(&self) -> bool;

    /// Whether key presses on this surface are text entry.
    fn accepts_text(&self) -> bool;
}
