//! TUI application logic
//!
//! The App struct owns the application state and handles keyboard input.
//! Rendering is delegated to the views module; async work (template
//! application, clipboard writes) is drained by the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use crate::form::FieldId;
use crate::tui::state::{AppState, InteractionMode};

/// Main application
pub struct App {
    /// Application state
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: AppState::new() }
    }

    /// Get a reference to the state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get a mutable reference to the state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event, returns true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Clear error message on any key press
        self.state.clear_error();

        match &self.state.interaction_mode {
            InteractionMode::Normal => {
                debug!("App::handle_key: Normal mode");
                self.handle_normal_key(key)
            }
            InteractionMode::Editing => {
                debug!("App::handle_key: Editing mode");
                self.handle_editing_key(key)
            }
            InteractionMode::TemplatePicker => {
                debug!("App::handle_key: TemplatePicker mode");
                self.handle_picker_key(key)
            }
            InteractionMode::Help => {
                debug!("App::handle_key: Help mode");
                self.handle_help_key(key)
            }
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_normal_key: called");
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: Ctrl+C quit");
                return true;
            }
            (KeyCode::Char('q'), _) => {
                debug!("App::handle_normal_key: quit requested");
                self.state.should_quit = true;
            }

            // === Help ===
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                debug!("App::handle_normal_key: showing help");
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === Field navigation ===
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) | (KeyCode::BackTab, _) => {
                self.state.field_selection.select_prev();
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) | (KeyCode::Tab, _) => {
                self.state.field_selection.select_next(FieldId::ALL.len());
            }
            (KeyCode::Char('g'), _) => {
                self.state.field_selection.select_first();
            }
            (KeyCode::Char('G'), _) => {
                self.state.field_selection.select_last(FieldId::ALL.len());
            }

            // === Creativity slider (when focused) ===
            (KeyCode::Left, _) if self.state.focused_field().is_slider() => {
                self.state.adjust_creativity(-1);
            }
            (KeyCode::Right, _) if self.state.focused_field().is_slider() => {
                self.state.adjust_creativity(1);
            }

            // === Edit the focused field ===
            (KeyCode::Enter, _) => {
                debug!("App::handle_normal_key: start editing");
                self.state.start_editing();
            }

            // === Tone presets ===
            (KeyCode::Char(c @ '1'..='9'), _) => {
                let index = (c as usize) - ('1' as usize);
                self.state.select_tone_preset(index);
            }

            // === Templates ===
            (KeyCode::Char('t'), _) => {
                debug!("App::handle_normal_key: opening template picker");
                self.state.template_selection.select_first();
                self.state.interaction_mode = InteractionMode::TemplatePicker;
            }

            // === Reset ===
            (KeyCode::Char('r'), _) => {
                debug!("App::handle_normal_key: reset form");
                self.state.reset_form();
            }

            // === Copy ===
            (KeyCode::Char('c'), _) => {
                debug!("App::handle_normal_key: copy requested");
                self.state.request_copy();
            }

            _ => {
                debug!("App::handle_normal_key: unhandled key");
            }
        }

        false
    }

    /// Handle keys while editing the focused field
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_editing_key: called");
        let field = self.state.focused_field();

        // The creativity slider edits as a value, not as text
        if field.is_slider() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    debug!("App::handle_editing_key: done adjusting slider");
                    self.state.stop_editing();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.state.adjust_creativity(-1);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.state.adjust_creativity(1);
                }
                KeyCode::Char(c @ '0'..='9') => {
                    self.state.form.set(field, c.to_string());
                    self.state.recompose();
                }
                _ => {
                    debug!("App::handle_editing_key: unhandled slider key");
                }
            }
            return false;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_editing_key: Ctrl+C quit");
                return true;
            }
            (KeyCode::Esc, _) => {
                debug!("App::handle_editing_key: Esc - done editing");
                self.state.stop_editing();
            }
            (KeyCode::Enter, KeyModifiers::ALT) => {
                // Alt+Enter inserts a newline in multiline fields
                self.insert_char(field, '\n');
            }
            (KeyCode::Enter, _) => {
                debug!("App::handle_editing_key: Enter - done editing");
                self.state.stop_editing();
            }
            (KeyCode::Backspace, _) => {
                if self.state.edit_cursor > 0 {
                    let new_pos = self.prev_char_boundary(self.state.edit_cursor);
                    let cursor = self.state.edit_cursor;
                    self.state.form.value_mut(field).drain(new_pos..cursor);
                    self.state.edit_cursor = new_pos;
                    self.state.recompose();
                }
            }
            (KeyCode::Delete, _) => {
                if self.state.edit_cursor < self.state.form.get(field).len() {
                    let end_pos = self.next_char_boundary(self.state.edit_cursor);
                    let cursor = self.state.edit_cursor;
                    self.state.form.value_mut(field).drain(cursor..end_pos);
                    self.state.recompose();
                }
            }
            (KeyCode::Char(c), _) => {
                self.insert_char(field, c);
            }
            (KeyCode::Left, _) => {
                if self.state.edit_cursor > 0 {
                    self.state.edit_cursor = self.prev_char_boundary(self.state.edit_cursor);
                }
            }
            (KeyCode::Right, _) => {
                if self.state.edit_cursor < self.state.form.get(field).len() {
                    self.state.edit_cursor = self.next_char_boundary(self.state.edit_cursor);
                }
            }
            (KeyCode::Home, _) => {
                self.state.edit_cursor = 0;
            }
            (KeyCode::End, _) => {
                self.state.edit_cursor = self.state.form.get(field).len();
            }
            _ => {
                debug!("App::handle_editing_key: unhandled key");
            }
        }

        false
    }

    /// Handle keys in the template picker overlay
    fn handle_picker_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_picker_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                debug!("App::handle_picker_key: cancel picker");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.template_selection.select_prev();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = self.state.template_names.len();
                self.state.template_selection.select_next(count);
            }
            KeyCode::Enter => {
                let index = self.state.template_selection.selected_index;
                if let Some(name) = self.state.template_names.get(index) {
                    debug!(%name, "App::handle_picker_key: template chosen");
                    // Queue for the runner; application happens on the next tick
                    self.state.pending_template = Some(name.clone());
                }
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {
                debug!("App::handle_picker_key: unhandled key");
            }
        }

        false
    }

    /// Handle keys in the help overlay
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                debug!("App::handle_help_key: closing help");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {
                debug!("App::handle_help_key: unhandled key");
            }
        }

        false
    }

    /// Insert a character into the focused field at the cursor
    fn insert_char(&mut self, field: FieldId, c: char) {
        let cursor = self.state.edit_cursor;
        self.state.form.value_mut(field).insert(cursor, c);
        self.state.edit_cursor += c.len_utf8();
        self.state.recompose();
    }

    /// Find the previous character boundary in the edited value
    fn prev_char_boundary(&self, pos: usize) -> usize {
        let value = self.state.form.get(self.state.focused_field());
        let mut new_pos = pos.saturating_sub(1);
        while new_pos > 0 && !value.is_char_boundary(new_pos) {
            new_pos -= 1;
        }
        new_pos
    }

    /// Find the next character boundary in the edited value
    fn next_char_boundary(&self, pos: usize) -> usize {
        let value = self.state.form.get(self.state.focused_field());
        let mut new_pos = pos + 1;
        while new_pos < value.len() && !value.is_char_boundary(new_pos) {
            new_pos += 1;
        }
        new_pos.min(value.len())
    }
}
