//! Prompt composition - derive the output prompt from the current form
//!
//! `compose` is pure: same form in, same prompt out. Each text field
//! contributes one labeled segment iff its trimmed value is non-empty; the
//! creativity setting always contributes. Segments join with a blank line,
//! so omitted fields leave no stray separators.

use serde::Serialize;
use tracing::debug;

use crate::form::{FieldId, FormState};

const LITERAL: &str = "Literal (focus on accuracy, avoid speculation).";
const BALANCED: &str = "Balanced (mix precision with light variation).";
const INVENTIVE: &str = "Inventive (offer fresh angles while staying on-topic).";

/// Qualitative description for a creativity slider value
///
/// Non-numeric or missing input counts as 0.
pub fn describe_creativity(value: &str) -> &'static str {
    let numeric = value.trim().parse::<f64>().unwrap_or(0.0);
    if numeric <= 2.0 {
        LITERAL
    } else if numeric <= 6.0 {
        BALANCED
    } else {
        INVENTIVE
    }
}

/// A composed prompt with its derived metadata
///
/// Ephemeral, recomputed in full on every form change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposedPrompt {
    pub text: String,
    pub word_count: usize,
    pub rationale: Vec<String>,
}

/// Assemble the prompt text, word count, and rationale from the form
pub fn compose(form: &FormState) -> ComposedPrompt {
    debug!("compose: called");

    let role = form.get(FieldId::Role).trim();
    let goal = form.get(FieldId::Goal).trim();
    let context = form.get(FieldId::Context).trim();
    let inputs = form.get(FieldId::Inputs).trim();
    let steps = form.get(FieldId::Steps).trim();
    let tone = form.get(FieldId::Tone).trim();
    let examples = form.get(FieldId::Examples).trim();
    let format = form.get(FieldId::Format).trim();
    let constraints = form.get(FieldId::Constraints).trim();
    let priority = form.get(FieldId::Priority).trim();

    let mut segments: Vec<String> = Vec::new();
    if !role.is_empty() {
        segments.push(format!("You are {role}"));
    }
    if !goal.is_empty() {
        segments.push(format!("Goal: {goal}"));
    }
    if !context.is_empty() {
        segments.push(format!("Context: {context}"));
    }
    if !inputs.is_empty() {
        segments.push(format!("The user will provide: {inputs}"));
    }
    if !steps.is_empty() {
        segments.push(format!("Follow these steps:\n{steps}"));
    }
    if !tone.is_empty() {
        segments.push(format!("Tone and style: {tone}"));
    }
    if !examples.is_empty() {
        segments.push(format!("Examples to mirror/avoid:\n{examples}"));
    }
    if !format.is_empty() {
        segments.push(format!("Respond using: {format}"));
    }
    if !constraints.is_empty() {
        segments.push(format!("Constraints & guardrails: {constraints}"));
    }
    segments.push(format!(
        "Creativity setting: {}",
        describe_creativity(form.get(FieldId::Creativity))
    ));
    if !priority.is_empty() {
        segments.push(format!("Prioritize: {priority}"));
    }

    let text = segments.join("\n\n");
    let word_count = text.split_whitespace().count();

    let mut rationale: Vec<String> = Vec::new();
    if !role.is_empty() {
        rationale.push("Role anchors the assistant's perspective.".to_string());
    }
    if !steps.is_empty() {
        rationale.push("Steps break down the work into verifiable pieces.".to_string());
    }
    if !format.is_empty() {
        rationale.push("Format guidance shapes the final output.".to_string());
    }
    if rationale.is_empty() {
        rationale.push("Add a role and goal to ground the prompt.".to_string());
    }

    ComposedPrompt {
        text,
        word_count,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_creativity_bands() {
        assert_eq!(describe_creativity("1"), LITERAL);
        assert_eq!(describe_creativity("4"), BALANCED);
        assert_eq!(describe_creativity("9"), INVENTIVE);
    }

    #[test]
    fn test_describe_creativity_boundaries() {
        assert_eq!(describe_creativity("2"), LITERAL);
        assert_eq!(describe_creativity("2.5"), BALANCED);
        assert_eq!(describe_creativity("6"), BALANCED);
        assert_eq!(describe_creativity("6.1"), INVENTIVE);
    }

    #[test]
    fn test_describe_creativity_non_numeric() {
        assert_eq!(describe_creativity(""), LITERAL);
        assert_eq!(describe_creativity("spicy"), LITERAL);
        assert_eq!(describe_creativity("  0  "), LITERAL);
    }

    #[test]
    fn test_compose_default_form() {
        let composed = compose(&FormState::new());
        assert_eq!(
            composed.text,
            "Creativity setting: Balanced (mix precision with light variation)."
        );
        assert_eq!(
            composed.rationale,
            vec!["Add a role and goal to ground the prompt.".to_string()]
        );
    }

    #[test]
    fn test_compose_segment_order() {
        let mut form = FormState::new();
        form.set(FieldId::Priority, "Safety first");
        form.set(FieldId::Role, "a test pilot");
        form.set(FieldId::Goal, "Land the plane");
        let composed = compose(&form);
        assert_eq!(
            composed.text,
            "You are a test pilot\n\nGoal: Land the plane\n\n\
             Creativity setting: Balanced (mix precision with light variation).\n\n\
             Prioritize: Safety first"
        );
    }

    #[test]
    fn test_compose_skips_blank_fields() {
        let mut form = FormState::new();
        form.set(FieldId::Goal, "   ");
        form.set(FieldId::Tone, "\n\t");
        let composed = compose(&form);
        assert!(!composed.text.contains("Goal:"));
        assert!(!composed.text.contains("Tone and style:"));
        assert!(!composed.text.contains("\n\n\n"));
    }

    #[test]
    fn test_compose_trims_field_values() {
        let mut form = FormState::new();
        form.set(FieldId::Goal, "  Ship fast  ");
        let composed = compose(&form);
        assert!(composed.text.starts_with("Goal: Ship fast\n\n"));
    }

    #[test]
    fn test_compose_multiline_steps() {
        let mut form = FormState::new();
        form.set(FieldId::Steps, "1) Look\n2) Leap");
        let composed = compose(&form);
        assert!(composed.text.contains("Follow these steps:\n1) Look\n2) Leap"));
    }

    #[test]
    fn test_compose_word_count() {
        let mut form = FormState::new();
        form.set(FieldId::Goal, "Ship fast");
        let composed = compose(&form);
        // "Goal: Ship fast" is 3 tokens, the creativity segment is 8
        assert_eq!(composed.word_count, 11);
    }

    #[test]
    fn test_compose_rationale_order() {
        let mut form = FormState::new();
        form.set(FieldId::Format, "Bullets");
        form.set(FieldId::Steps, "1) Go");
        form.set(FieldId::Role, "an editor");
        let composed = compose(&form);
        assert_eq!(
            composed.rationale,
            vec![
                "Role anchors the assistant's perspective.".to_string(),
                "Steps break down the work into verifiable pieces.".to_string(),
                "Format guidance shapes the final output.".to_string(),
            ]
        );
    }

    #[test]
    fn test_compose_rationale_single_message() {
        let mut form = FormState::new();
        form.set(FieldId::Role, "a coach");
        let composed = compose(&form);
        assert_eq!(
            composed.rationale,
            vec!["Role anchors the assistant's perspective.".to_string()]
        );
    }

    #[test]
    fn test_compose_is_deterministic() {
        let mut form = FormState::new();
        form.set(FieldId::Role, "a librarian");
        form.set(FieldId::Creativity, "7");
        assert_eq!(compose(&form), compose(&form));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Word count always matches the whitespace tokenization of the text.
        #[test]
        fn word_count_matches_tokens(role in ".*", goal in ".*", steps in ".*") {
            let mut form = FormState::new();
            form.set(FieldId::Role, role);
            form.set(FieldId::Goal, goal);
            form.set(FieldId::Steps, steps);
            let composed = compose(&form);
            prop_assert_eq!(composed.word_count, composed.text.split_whitespace().count());
        }

        /// The creativity segment is present for any slider input.
        #[test]
        fn creativity_segment_always_present(value in ".*") {
            let mut form = FormState::new();
            form.set(FieldId::Creativity, value);
            let composed = compose(&form);
            prop_assert!(composed.text.contains("Creativity setting: "));
            prop_assert!(!composed.rationale.is_empty());
        }
    }
}
