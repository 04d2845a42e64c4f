//! TUI Runner - main loop that owns the terminal and drains queued work
//!
//! The TuiRunner is responsible for:
//! - Initializing state from the loaded config (default template, helpers)
//! - Dispatching events to App for handling
//! - Rendering at ~30 FPS
//! - Applying templates chosen in the picker
//! - Writing the composed prompt to the clipboard on a blocking thread

use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::clipboard::{self, CopyOutcome};
use crate::config::Config;
use crate::templates::TemplateLoader;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// Result from the background clipboard task
#[derive(Debug)]
enum CopyTaskResult {
    /// Copy completed
    Done(CopyOutcome),
    /// Error occurred
    Failed(String),
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Template loader (user dirs + built-ins)
    loader: TemplateLoader,
    /// Explicit clipboard helper command from config
    clipboard_helper: Option<String>,
    /// Receiver for clipboard task results
    copy_rx: Option<mpsc::Receiver<CopyTaskResult>>,
    /// Handle to the background clipboard task
    copy_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    /// Create a new TuiRunner from the loaded config
    pub fn new(terminal: Tui, config: &Config) -> Self {
        debug!("TuiRunner::new: called");
        let loader = TemplateLoader::new(&config.templates);

        let mut app = App::new();
        app.state_mut().template_names = loader.names();

        // Start from the configured template
        let default_template = &config.general.default_template;
        if loader.apply(default_template, &mut app.state_mut().form) {
            debug!(%default_template, "TuiRunner::new: applied default template");
        } else {
            warn!("Unknown default template: {}", default_template);
        }
        app.state_mut().recompose();

        Self {
            app,
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            loader,
            clipboard_helper: config.clipboard.helper.clone(),
            copy_rx: None,
            copy_task: None,
        }
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            // Draw the UI
            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            // Wait for either a terminal event OR a clipboard result
            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {
                            self.handle_tick();
                        }
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                // Handle clipboard results immediately when they arrive
                Some(result) = async {
                    if let Some(rx) = &mut self.copy_rx {
                        rx.recv().await
                    } else {
                        std::future::pending::<Option<CopyTaskResult>>().await
                    }
                } => {
                    self.handle_copy_result(result);
                }
            }

            // Check if we should quit
            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Handle tick event - toast expiry and queued work
    fn handle_tick(&mut self) {
        debug!("TuiRunner::handle_tick: called");
        self.app.state_mut().tick();

        // Check for a template chosen in the picker
        if let Some(name) = self.app.state_mut().pending_template.take() {
            debug!(%name, "TuiRunner::handle_tick: pending template");
            let applied = self.loader.apply(&name, &mut self.app.state_mut().form);
            if applied {
                info!("Applied template: {}", name);
                self.app.state_mut().recompose();
            } else {
                // Unknown names are dropped without touching the preview
                debug!(%name, "TuiRunner::handle_tick: unknown template, ignoring");
            }
        }

        // Check for a pending clipboard write - spawn background task
        if let Some(text) = self.app.state_mut().pending_copy.take() {
            debug!(text_len = text.len(), "TuiRunner::handle_tick: pending copy");
            self.start_copy(text);
        }
    }

    /// Spawn the clipboard write on a blocking thread
    fn start_copy(&mut self, text: String) {
        debug!(text_len = text.len(), "TuiRunner::start_copy: called");
        let (tx, rx) = mpsc::channel(1);
        let helper = self.clipboard_helper.clone();

        let task = tokio::task::spawn_blocking(move || {
            let result = match clipboard::copy_text(&text, helper.as_deref()) {
                Ok(outcome) => CopyTaskResult::Done(outcome),
                Err(err) => CopyTaskResult::Failed(err.to_string()),
            };
            if tx.blocking_send(result).is_err() {
                debug!("TuiRunner::start_copy: result channel closed");
            }
        });

        self.copy_rx = Some(rx);
        self.copy_task = Some(task);
    }

    /// Handle a clipboard task result
    fn handle_copy_result(&mut self, result: CopyTaskResult) {
        debug!(?result, "TuiRunner::handle_copy_result: called");
        match result {
            CopyTaskResult::Done(outcome) => {
                if outcome == CopyOutcome::Fallback {
                    debug!("TuiRunner::handle_copy_result: helper fallback used");
                }
                self.app.state_mut().show_toast("Copied to clipboard");
            }
            CopyTaskResult::Failed(error) => {
                // Keep the UI quiet, the log carries the details
                warn!("Clipboard copy failed: {}", error);
            }
        }
        self.copy_rx = None;
        self.copy_task = None;
    }
}
