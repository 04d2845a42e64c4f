//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.
//! One screen: the field list on the left, the composed prompt on the right,
//! with overlays for the template picker and help.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::compose::{ComposedPrompt, compose};
use crate::form::{FieldId, FormState};

/// How long the copy toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

/// Tone presets rendered as pills: (label, phrase written into the tone field)
pub const TONE_PRESETS: &[(&str, &str)] = &[
    ("Friendly", "Warm, friendly, and encouraging."),
    ("Neutral", "Neutral, concrete, and matter-of-fact."),
    ("Confident", "Direct, confident, and succinct."),
    ("Playful", "Playful, vivid, and a little irreverent."),
];

/// Interaction mode (modal)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Editing the focused field (Enter key)
    Editing,
    /// Template picker overlay (t key)
    TemplatePicker,
    /// Help overlay
    Help,
}

impl InteractionMode {
    /// Check if the field editor is open
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing)
    }
}

/// Transient confirmation shown after a copy lands
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    /// True once the display window has elapsed
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_DURATION
    }
}

/// Selection state for list views
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    pub selected_index: usize,
    pub scroll_offset: usize,
}

impl SelectionState {
    pub fn select_next(&mut self, max_items: usize) {
        if max_items > 0 && self.selected_index < max_items - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self, max_items: usize) {
        if max_items > 0 {
            self.selected_index = max_items - 1;
        }
    }

    /// Ensure selection is within bounds
    pub fn clamp(&mut self, max_items: usize) {
        if max_items == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= max_items {
            self.selected_index = max_items - 1;
        }
    }
}

/// Main TUI application state
#[derive(Debug)]
pub struct AppState {
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// The eleven prompt fields
    pub form: FormState,
    /// Latest composition of the form
    pub composed: ComposedPrompt,
    /// Should the app quit
    pub should_quit: bool,
    /// Last error message
    pub error_message: Option<String>,

    // === Field list ===
    pub field_selection: SelectionState,
    /// Cursor position within the edited field (byte offset)
    pub edit_cursor: usize,

    // === Tone pills ===
    /// Index into TONE_PRESETS of the active pill
    pub active_tone: Option<usize>,

    // === Template picker ===
    /// Resolvable template names (loaded at startup)
    pub template_names: Vec<String>,
    pub template_selection: SelectionState,

    // === Toast ===
    pub toast: Option<Toast>,

    // === Pending actions (drained by the runner) ===
    pub pending_template: Option<String>,
    pub pending_copy: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let form = FormState::new();
        let composed = compose(&form);
        Self {
            interaction_mode: InteractionMode::default(),
            form,
            composed,
            should_quit: false,
            error_message: None,
            field_selection: SelectionState::default(),
            edit_cursor: 0,
            active_tone: None,
            template_names: Vec::new(),
            template_selection: SelectionState::default(),
            toast: None,
            pending_template: None,
            pending_copy: None,
        }
    }
}

impl AppState {
    /// Create new AppState
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self::default()
    }

    /// Currently focused field
    pub fn focused_field(&self) -> FieldId {
        FieldId::ALL[self.field_selection.selected_index]
    }

    /// Recompute the composed prompt from the form
    pub fn recompose(&mut self) {
        debug!("AppState::recompose: called");
        self.composed = compose(&self.form);
    }

    /// Open the field editor on the focused field
    pub fn start_editing(&mut self) {
        let field = self.focused_field();
        debug!(?field, "AppState::start_editing: called");
        self.edit_cursor = self.form.get(field).len();
        self.interaction_mode = InteractionMode::Editing;
    }

    /// Close the field editor
    pub fn stop_editing(&mut self) {
        debug!("AppState::stop_editing: called");
        self.interaction_mode = InteractionMode::Normal;
    }

    /// Select tone pill `index`, writing its phrase into the tone field
    ///
    /// Only one pill is active at a time; selecting deactivates the rest.
    pub fn select_tone_preset(&mut self, index: usize) {
        debug!(index, "AppState::select_tone_preset: called");
        if let Some((_, phrase)) = TONE_PRESETS.get(index) {
            self.form.set(FieldId::Tone, *phrase);
            self.active_tone = Some(index);
            self.recompose();
        }
    }

    /// Adjust the creativity slider by `delta`, clamped to 0-10
    pub fn adjust_creativity(&mut self, delta: i64) {
        let current = self
            .form
            .get(FieldId::Creativity)
            .trim()
            .parse::<i64>()
            .unwrap_or(0);
        let next = (current + delta).clamp(0, 10);
        debug!(current, next, "AppState::adjust_creativity: called");
        self.form.set(FieldId::Creativity, next.to_string());
        self.recompose();
    }

    /// Return every field to its default and recompose
    pub fn reset_form(&mut self) {
        debug!("AppState::reset_form: called");
        self.form.reset();
        self.recompose();
    }

    /// Queue the composed text for the clipboard
    pub fn request_copy(&mut self) {
        debug!("AppState::request_copy: called");
        self.pending_copy = Some(self.composed.text.clone());
    }

    /// Show the copy toast (restarts the timer if already visible)
    pub fn show_toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "AppState::show_toast: called");
        self.toast = Some(Toast::new(message));
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_error: called");
        self.error_message = Some(msg);
    }

    /// Clear the error message
    pub fn clear_error(&mut self) {
        debug!("AppState::clear_error: called");
        self.error_message = None;
    }

    /// Advance time-based state (toast expiry)
    pub fn tick(&mut self) {
        if let Some(toast) = &self.toast
            && toast.is_expired()
        {
            debug!("AppState::tick: toast expired");
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_state_navigation() {
        let mut sel = SelectionState::default();
        sel.select_next(11);
        assert_eq!(sel.selected_index, 1);
        sel.select_prev();
        assert_eq!(sel.selected_index, 0);
        sel.select_prev();
        assert_eq!(sel.selected_index, 0);
        sel.select_last(11);
        assert_eq!(sel.selected_index, 10);
        sel.select_next(11);
        assert_eq!(sel.selected_index, 10);
        sel.clamp(4);
        assert_eq!(sel.selected_index, 3);
    }

    #[test]
    fn test_focused_field_follows_selection() {
        let mut state = AppState::new();
        assert_eq!(state.focused_field(), FieldId::Role);
        state.field_selection.select_last(FieldId::ALL.len());
        assert_eq!(state.focused_field(), FieldId::Priority);
    }

    #[test]
    fn test_tone_preset_selection() {
        let mut state = AppState::new();
        state.select_tone_preset(2);
        assert_eq!(state.active_tone, Some(2));
        assert_eq!(state.form.get(FieldId::Tone), TONE_PRESETS[2].1);
        assert!(state.composed.text.contains("Tone and style: "));

        // selecting another pill deactivates the first
        state.select_tone_preset(0);
        assert_eq!(state.active_tone, Some(0));
        assert_eq!(state.form.get(FieldId::Tone), TONE_PRESETS[0].1);
    }

    #[test]
    fn test_tone_preset_out_of_range_ignored() {
        let mut state = AppState::new();
        state.select_tone_preset(99);
        assert_eq!(state.active_tone, None);
        assert_eq!(state.form.get(FieldId::Tone), "");
    }

    #[test]
    fn test_adjust_creativity_clamps() {
        let mut state = AppState::new();
        state.form.set(FieldId::Creativity, "10");
        state.adjust_creativity(1);
        assert_eq!(state.form.get(FieldId::Creativity), "10");

        state.form.set(FieldId::Creativity, "0");
        state.adjust_creativity(-1);
        assert_eq!(state.form.get(FieldId::Creativity), "0");

        state.form.set(FieldId::Creativity, "not a number");
        state.adjust_creativity(1);
        assert_eq!(state.form.get(FieldId::Creativity), "1");
    }

    #[test]
    fn test_reset_form_recomposes() {
        let mut state = AppState::new();
        state.form.set(FieldId::Role, "a narrator");
        state.recompose();
        assert!(state.composed.text.contains("You are a narrator"));

        state.reset_form();
        assert_eq!(
            state.composed.text,
            "Creativity setting: Balanced (mix precision with light variation)."
        );
    }

    #[test]
    fn test_toast_expiry() {
        let fresh = Toast::new("Copied to clipboard");
        assert!(!fresh.is_expired());

        let stale = Toast {
            message: "Copied to clipboard".to_string(),
            shown_at: Instant::now() - TOAST_DURATION,
        };
        assert!(stale.is_expired());
    }

    #[test]
    fn test_tick_expires_toast() {
        let mut state = AppState::new();
        state.toast = Some(Toast {
            message: "Copied to clipboard".to_string(),
            shown_at: Instant::now() - TOAST_DURATION,
        });
        state.tick();
        assert!(state.toast.is_none());
    }

    #[test]
    fn test_show_toast_restarts_timer() {
        let mut state = AppState::new();
        state.toast = Some(Toast {
            message: "Copied to clipboard".to_string(),
            shown_at: Instant::now() - TOAST_DURATION,
        });
        state.show_toast("Copied to clipboard");
        assert!(!state.toast.as_ref().unwrap().is_expired());
    }

    #[test]
    fn test_request_copy_queues_composed_text() {
        let mut state = AppState::new();
        state.form.set(FieldId::Goal, "Ship it");
        state.recompose();
        state.request_copy();
        let queued = state.pending_copy.as_deref().unwrap();
        assert!(queued.starts_with("Goal: Ship it"));
    }
}
