//! # termfolio
//!
//! A terminal-style shell for browsing a personal site. Each page shows a
//! console tray with a scrollback log and a command prompt; typed commands,
//! an arrow-key menu and single-letter shortcuts navigate between pages.
//!
//! - [`ui`] - the log, prompt, menu, tray, orchestrator and renderer
//! - [`session`] - per-tab storage that outlives a single page load

pub mod session;
pub mod ui;
