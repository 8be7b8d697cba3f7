//! # UI Module
//!
//! The console tray and everything that feeds it.
//!
//! ## Components
//!
//! - [`output`] - append-only scrollback with deferred auto-scroll
//! - [`prompt`] - single-line command entry with history
//! - [`menu`] - keyboard and pointer driven list of navigation targets
//! - [`tray`] - collapsible, resizable console area
//! - [`orchestrator`] - mode switching, command dispatch, shortcuts and the
//!   session greeting
//! - [`render`] - draws a frame and records the layout used for hit-testing
//!
//! Supporting modules: [`commands`] (keyword and shortcut tables),
//! [`config`] (site configuration), [`events`] (injectable event sources),
//! [`markup`] (inline markup for log entries), [`surface`] (the shared
//! activate/focus contract) and [`theme`].

pub mod commands;
pub mod config;
pub mod events;
pub mod markup;
pub mod menu;
pub mod orchestrator;
pub mod output;
pub mod prompt;
pub mod render;
pub mod surface;
pub mod theme;
pub mod tray;

pub use config::{Config, ConfigError};
pub use events::{CrosstermEventSource, EventSource, Subscription};
pub use menu::{MenuEvent, MenuItem, SelectableMenu};
pub use orchestrator::{Focus, HostEvent, LayoutSnapshot, Mode, Orchestrator};
pub use output::{Category, Content, OutputLog};
pub use prompt::{CommandPrompt, PromptEvent};
pub use render::render;
pub use theme::Theme;
pub use tray::ConsoleTray;
