//! TUI event handling
//!
//! A dedicated thread polls the terminal and forwards what the form cares
//! about over a channel: key presses, resizes, and a tick whenever the poll
//! window elapses quietly. Ticks drive toast expiry and the runner's queued
//! work, so they arrive at the poll cadence (~30 per second).

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::debug;

/// Terminal events the form reacts to
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic refresh
    Tick,
}

/// Map a raw terminal event to a form event
///
/// Only key presses pass through; repeat and release events would
/// double-insert characters into the field editor on platforms that
/// report them.
fn translate(raw: event::Event) -> Option<Event> {
    match raw {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => {
            debug!(?key, "translate: key press");
            Some(Event::Key(key))
        }
        event::Event::Key(key) => {
            debug!(?key.kind, "translate: non-press key event, skipping");
            None
        }
        event::Event::Resize(w, h) => {
            debug!(w, h, "translate: resize");
            Some(Event::Resize(w, h))
        }
        _ => {
            debug!("translate: other event, skipping");
            None
        }
    }
}

/// Event handler for the TUI
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given poll window
    pub fn new(poll_window: Duration) -> Self {
        debug!(?poll_window, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        // Crossterm polling blocks, so it lives on its own thread
        std::thread::spawn(move || {
            debug!("EventHandler::new: polling thread started");
            loop {
                let event = if event::poll(poll_window).unwrap_or(false) {
                    match event::read().ok().and_then(translate) {
                        Some(event) => event,
                        None => continue,
                    }
                } else {
                    Event::Tick
                };

                if tx.send(event).is_err() {
                    debug!("EventHandler: channel closed, exiting loop");
                    break;
                }
            }
            debug!("EventHandler: polling thread exiting");
        });

        Self { rx }
    }

    /// Get the next event (async)
    pub async fn next(&mut self) -> Result<Event> {
        let event = self.rx.recv().await.ok_or_else(|| eyre::eyre!("event channel closed"));
        if let Ok(ref e) = event {
            debug!(?e, "EventHandler::next: received event");
        }
        event
    }
}
