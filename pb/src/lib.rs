//! Prompt Builder - compose structured LLM prompts from a guided form
//!
//! A prompt is assembled from eleven fields (role, goal, context, steps,
//! tone, examples, format, constraints and friends) into labeled segments,
//! with a creativity dial that always contributes a segment. The same
//! composition backs both the interactive TUI and the one-shot CLI commands.
//!
//! # Core Concepts
//!
//! - **Pure Composition**: `compose` derives the prompt from the form alone
//! - **Templates**: built-in and user YAML bundles that prefill the form
//! - **Clipboard**: arboard first, platform helper commands as fallback
//!
//! # Modules
//!
//! - [`form`] - Field identifiers and form state
//! - [`compose`] - Prompt assembly, word count, rationale
//! - [`templates`] - Embedded and user template loading
//! - [`clipboard`] - System clipboard with helper fallback
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Interactive terminal UI

pub mod cli;
pub mod clipboard;
pub mod compose;
pub mod config;
pub mod form;
pub mod templates;
pub mod tui;

// Re-export commonly used types
pub use clipboard::{CopyError, CopyOutcome, copy_text};
pub use compose::{ComposedPrompt, compose, describe_creativity};
pub use config::Config;
pub use form::{DEFAULT_CREATIVITY, FieldId, FormState};
pub use templates::{Template, TemplateLoader};
