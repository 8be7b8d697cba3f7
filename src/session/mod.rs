//! # Session Module
//!
//! Per-tab key-value storage shared across page loads.
//!
//! ## Overview
//!
//! A "tab" is the lifetime of the host process. Every navigation tears down
//! the current [`Orchestrator`](crate::ui::Orchestrator) and builds a new one
//! for the destination page, so anything that must survive a page load lives
//! in a [`SessionStore`] that the host hands from one orchestrator to the next.
//!
//! Only one key is written today: [`VISITED_KEY`], the flag that separates a
//! first visit (welcome sequence) from a return visit ("Connected to ...").
//!
//! ## Lifetime
//!
//! ```text
//! process start ──> MemorySessionStore::new()
//!                    │
//!      page "/"  ────┤  Orchestrator::new(.., store) ... into_store()
//!      page "/blog" ─┤  Orchestrator::new(.., store) ... into_store()
//!                    │
//! process exit  ──> dropped (nothing is written to disk)
//! ```

mod store;

pub use store::{MemorySessionStore, SessionStore, VISITED_KEY};
