//! Integration tests for PromptBuilder
//!
//! These tests verify end-to-end behavior of the template loader, the
//! composer, and the `pb` binary's non-interactive commands.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use promptbuilder::compose::compose;
use promptbuilder::config::TemplatesConfig;
use promptbuilder::form::{FieldId, FormState};
use promptbuilder::templates::TemplateLoader;
use tempfile::TempDir;

/// Get a command for the pb binary.
fn pb() -> Command {
    Command::cargo_bin("pb").unwrap()
}

/// Write a config that resolves templates from the embedded built-ins only,
/// so tests never see the host's user template directories.
fn isolated_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("promptbuilder.yml");
    std::fs::write(&path, "templates:\n  paths:\n    - builtin\n")
        .expect("Failed to write config");
    path
}

// =============================================================================
// Template + Composer Tests
// =============================================================================

#[test]
fn test_builtin_coding_template_composes() {
    let loader = TemplateLoader::embedded_only();
    let mut form = FormState::new();

    let applied = loader.apply("coding", &mut form);
    assert!(applied, "coding should resolve from the built-ins");

    let composed = compose(&form);
    assert!(composed.text.contains("staff-level engineer"));
    assert!(composed.text.contains("Follow these steps:\n"));
    assert!(composed.text.contains("Constraints & guardrails:"));
    assert!(
        composed
            .rationale
            .iter()
            .any(|r| r.contains("Steps break down the work")),
        "filled steps should be called out in the rationale"
    );
    assert_eq!(composed.rationale.len(), 3);
}

#[test]
fn test_reset_after_template_and_tone() {
    let loader = TemplateLoader::embedded_only();
    let mut form = FormState::new();

    loader.apply("coding", &mut form);
    form.set(FieldId::Tone, "Playful");
    assert_eq!(form.get(FieldId::Tone), "Playful");

    form.reset();

    for id in FieldId::ALL {
        assert_eq!(form.get(id), id.default_value(), "{id:?} should reset");
    }
    let composed = compose(&form);
    assert_eq!(
        composed.text,
        "Creativity setting: Balanced (mix precision with light variation)."
    );
}

#[test]
fn test_unknown_template_is_noop() {
    let loader = TemplateLoader::embedded_only();
    let mut form = FormState::new();
    form.set(FieldId::Goal, "Keep me");

    let before = compose(&form);
    let applied = loader.apply("does-not-exist", &mut form);
    let after = compose(&form);

    assert!(!applied);
    assert_eq!(form.get(FieldId::Goal), "Keep me");
    assert_eq!(before, after, "unknown template must not disturb the output");
}

#[test]
fn test_user_template_dir_overrides_builtin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        temp_dir.path().join("coding.yml"),
        "role: a principal engineer\ngoal: Do the review\n",
    )
    .expect("Failed to write template");

    let config = TemplatesConfig {
        paths: vec![
            temp_dir.path().to_string_lossy().to_string(),
            "builtin".to_string(),
        ],
    };
    let loader = TemplateLoader::new(&config);

    let template = loader.get("coding").expect("coding should resolve");
    assert_eq!(template.field(FieldId::Role), Some("a principal engineer"));
    assert_eq!(template.field(FieldId::Steps), None, "user file wins whole");

    // Names the user directory does not shadow still come from the built-ins
    assert!(loader.get("analysis").is_some());
}

#[test]
fn test_malformed_template_falls_through_to_builtin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("coding.yml"), "role: [not, a, string]\n")
        .expect("Failed to write template");

    let config = TemplatesConfig {
        paths: vec![
            temp_dir.path().to_string_lossy().to_string(),
            "builtin".to_string(),
        ],
    };
    let loader = TemplateLoader::new(&config);

    let template = loader.get("coding").expect("built-in should still resolve");
    assert!(
        template
            .field(FieldId::Role)
            .is_some_and(|r| r.contains("staff-level engineer"))
    );
}

// =============================================================================
// CLI Tests
// =============================================================================

#[test]
fn test_cli_help_displays() {
    pb().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interactive prompt builder"))
        .stdout(predicate::str::contains("compose"))
        .stdout(predicate::str::contains("templates"))
        .stdout(predicate::str::contains("logs"));
}

#[test]
fn test_cli_templates_list_shows_builtins() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    pb().args(["-c", config.to_str().unwrap(), "templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available templates:"))
        .stdout(predicate::str::contains("blank"))
        .stdout(predicate::str::contains("analysis"))
        .stdout(predicate::str::contains("writing"))
        .stdout(predicate::str::contains("coding"));
}

#[test]
fn test_cli_compose_with_field_flags() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    pb().args([
        "-c",
        config.to_str().unwrap(),
        "compose",
        "--role",
        "a code reviewer",
        "--goal",
        "Find bugs",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("You are a code reviewer"))
    .stdout(predicate::str::contains("Goal: Find bugs"))
    .stdout(predicate::str::contains("Creativity setting: Balanced"));
}

#[test]
fn test_cli_compose_json_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    let output = pb()
        .args([
            "-c",
            config.to_str().unwrap(),
            "compose",
            "--goal",
            "Ship fast",
            "--output",
            "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("JSON output should parse");
    assert_eq!(parsed["word_count"], 11);
    assert!(
        parsed["text"]
            .as_str()
            .expect("text should be a string")
            .contains("Goal: Ship fast")
    );
    assert!(parsed["rationale"].is_array());
}

#[test]
fn test_cli_compose_unknown_template_starts_from_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    let output = pb()
        .args([
            "-c",
            config.to_str().unwrap(),
            "compose",
            "--template",
            "nope",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    assert_eq!(
        stdout.trim_end(),
        "Creativity setting: Balanced (mix precision with light variation)."
    );
}

#[test]
fn test_cli_compose_builtin_template() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    pb().args([
        "-c",
        config.to_str().unwrap(),
        "compose",
        "--template",
        "coding",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("staff-level engineer"))
    .stdout(predicate::str::contains("Prioritize: Correctness and safety over style."));
}

#[test]
fn test_cli_compose_creativity_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    pb().args([
        "-c",
        config.to_str().unwrap(),
        "compose",
        "--creativity",
        "9",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Creativity setting: Inventive"));
}

#[test]
fn test_cli_templates_show_unknown_lists_builtins() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    pb().args(["-c", config.to_str().unwrap(), "templates", "show", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Template not found: nope"))
        .stdout(predicate::str::contains("built-in: blank, analysis, writing, coding"));
}

#[test]
fn test_cli_templates_show_builtin() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = isolated_config(&temp_dir);

    pb().args(["-c", config.to_str().unwrap(), "templates", "show", "writing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Template: writing"))
        .stdout(predicate::str::contains("role:"));
}
