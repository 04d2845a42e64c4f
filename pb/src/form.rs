//! Form state - the eleven prompt fields and their current values
//!
//! The field set is closed: ten free-text fields plus the numeric-as-string
//! creativity slider (0-10). Every field is always present; empty string is a
//! valid value. Values pass through verbatim, no escaping or length limits.

use tracing::{debug, trace};

/// Factory default for the creativity slider
pub const DEFAULT_CREATIVITY: &str = "4";

/// Identifier for one of the eleven prompt fields, in composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Role,
    Goal,
    Context,
    Inputs,
    Steps,
    Tone,
    Examples,
    Format,
    Constraints,
    Creativity,
    Priority,
}

impl FieldId {
    /// All fields in composition/display order
    pub const ALL: [FieldId; 11] = [
        FieldId::Role,
        FieldId::Goal,
        FieldId::Context,
        FieldId::Inputs,
        FieldId::Steps,
        FieldId::Tone,
        FieldId::Examples,
        FieldId::Format,
        FieldId::Constraints,
        FieldId::Creativity,
        FieldId::Priority,
    ];

    /// Canonical lowercase name (config keys, CLI flags, template keys)
    pub fn name(&self) -> &'static str {
        match self {
            FieldId::Role => "role",
            FieldId::Goal => "goal",
            FieldId::Context => "context",
            FieldId::Inputs => "inputs",
            FieldId::Steps => "steps",
            FieldId::Tone => "tone",
            FieldId::Examples => "examples",
            FieldId::Format => "format",
            FieldId::Constraints => "constraints",
            FieldId::Creativity => "creativity",
            FieldId::Priority => "priority",
        }
    }

    /// Human-readable label for rendering
    pub fn label(&self) -> &'static str {
        debug!("FieldId::label: called for {:?}", self);
        match self {
            FieldId::Role => "Role",
            FieldId::Goal => "Goal",
            FieldId::Context => "Context",
            FieldId::Inputs => "Inputs",
            FieldId::Steps => "Steps",
            FieldId::Tone => "Tone",
            FieldId::Examples => "Examples",
            FieldId::Format => "Format",
            FieldId::Constraints => "Constraints",
            FieldId::Creativity => "Creativity",
            FieldId::Priority => "Priority",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        FieldId::ALL.into_iter().find(|id| id.name() == name)
    }

    /// The creativity field renders and edits as a slider, not free text
    pub fn is_slider(&self) -> bool {
        matches!(self, FieldId::Creativity)
    }

    /// Value a reset returns this field to
    pub fn default_value(&self) -> &'static str {
        match self {
            FieldId::Creativity => DEFAULT_CREATIVITY,
            _ => "",
        }
    }
}

/// Current value of every prompt field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: [String; 11],
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|i| FieldId::ALL[i].default_value().to_string()),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        debug!("FormState::new: called");
        Self::default()
    }

    pub fn get(&self, id: FieldId) -> &str {
        trace!("FormState::get: called for {:?}", id);
        &self.values[id as usize]
    }

    pub fn set(&mut self, id: FieldId, value: impl Into<String>) {
        let value = value.into();
        debug!("FormState::set: {} = {} chars", id.name(), value.len());
        self.values[id as usize] = value;
    }

    /// Direct mutable access for the in-place field editor
    pub fn value_mut(&mut self, id: FieldId) -> &mut String {
        trace!("FormState::value_mut: called for {:?}", id);
        &mut self.values[id as usize]
    }

    /// Return every field to its default (empty, creativity "4")
    pub fn reset(&mut self) {
        debug!("FormState::reset: called");
        for id in FieldId::ALL {
            self.values[id as usize] = id.default_value().to_string();
        }
    }

    /// Number of text fields with a non-blank value
    pub fn filled_count(&self) -> usize {
        trace!("FormState::filled_count: called");
        FieldId::ALL
            .into_iter()
            .filter(|id| !id.is_slider() && !self.get(*id).trim().is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_id_name_roundtrip() {
        for id in FieldId::ALL {
            assert_eq!(FieldId::from_name(id.name()), Some(id));
        }
        assert_eq!(FieldId::from_name("bogus"), None);
    }

    #[test]
    fn test_form_state_defaults() {
        let form = FormState::new();
        assert_eq!(form.get(FieldId::Creativity), "4");
        assert_eq!(form.get(FieldId::Role), "");
        assert_eq!(form.get(FieldId::Priority), "");
        assert_eq!(form.filled_count(), 0);
    }

    #[test]
    fn test_form_state_set_and_get() {
        let mut form = FormState::new();
        form.set(FieldId::Goal, "Ship fast");
        assert_eq!(form.get(FieldId::Goal), "Ship fast");
        assert_eq!(form.filled_count(), 1);
    }

    #[test]
    fn test_form_state_reset() {
        let mut form = FormState::new();
        form.set(FieldId::Role, "a reviewer");
        form.set(FieldId::Creativity, "9");
        form.reset();
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn test_creativity_is_slider() {
        assert!(FieldId::Creativity.is_slider());
        assert!(!FieldId::Tone.is_slider());
    }
}
