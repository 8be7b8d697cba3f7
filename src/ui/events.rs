//! # Event Sources
//!
//! Terminal input is read through the [`EventSource`] trait so the host loop
//! and the orchestrator can be driven by scripted events in tests.
//!
//! ## Subscriptions
//!
//! Pointer reporting is switched on only while an orchestrator is live. The
//! orchestrator acquires a [`Subscription`] in `initialize` and releases it
//! in `dispose`; a subscription also releases itself when dropped, so early
//! teardown (an error, a panic unwinding through the loop) never leaves mouse
//! capture enabled.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
};
use std::fmt;
use std::io;
use std::time::Duration;
use tracing::{debug, warn};

/// Trait for reading terminal events (allows dependency injection for testing)
pub trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;

    /// Start delivering pointer events until the returned guard is released.
    fn subscribe(&mut self) -> Result<Subscription>;
}

/// Scoped event subscription. Releasing happens exactly once.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release now instead of at drop.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.release.is_some())
            .finish()
    }
}

/// Production event source that uses crossterm's event polling + read
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(event::read().context("Failed to read terminal event")?))
        } else {
            Ok(None)
        }
    }

    fn subscribe(&mut self) -> Result<Subscription> {
        execute!(io::stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;
        debug!("mouse capture enabled");
        Ok(Subscription::new(|| {
            if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
                warn!(error = %e, "failed to disable mouse capture");
            } else {
                debug!("mouse capture disabled");
            }
        }))
    }
}
