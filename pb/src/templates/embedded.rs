//! Embedded templates
//!
//! The four built-in templates are compiled into the binary from YAML files.

use tracing::debug;

/// Built-in template names, in menu order
pub const BUILTIN_NAMES: [&str; 4] = ["blank", "analysis", "writing", "coding"];

/// Neutral starting point
pub const BLANK: &str = include_str!("../../templates/blank.yml");

/// Senior-analyst decision support
pub const ANALYSIS: &str = include_str!("../../templates/analysis.yml");

/// Writing-coach rewrite
pub const WRITING: &str = include_str!("../../templates/writing.yml");

/// Staff-engineer code walkthrough
pub const CODING: &str = include_str!("../../templates/coding.yml");

/// Get an embedded template document by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "blank" => {
            debug!("get_embedded: matched blank");
            Some(BLANK)
        }
        "analysis" => {
            debug!("get_embedded: matched analysis");
            Some(ANALYSIS)
        }
        "writing" => {
            debug!("get_embedded: matched writing");
            Some(WRITING)
        }
        "coding" => {
            debug!("get_embedded: matched coding");
            Some(CODING)
        }
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Template;

    #[test]
    fn test_get_embedded_blank() {
        let blank = get_embedded("blank").unwrap();
        assert!(blank.contains("helpful, detail-oriented assistant"));
        assert!(blank.contains("Accuracy first, then brevity."));
    }

    #[test]
    fn test_get_embedded_coding() {
        let coding = get_embedded("coding").unwrap();
        assert!(coding.contains("staff-level engineer"));
        assert!(coding.contains("bikeshedding"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }

    #[test]
    fn test_all_builtins_parse() {
        for name in BUILTIN_NAMES {
            let content = get_embedded(name).unwrap();
            let template: Template = serde_yaml::from_str(content).unwrap();
            // every built-in defines all ten text fields
            assert!(template.role.is_some(), "{name} missing role");
            assert!(template.priority.is_some(), "{name} missing priority");
        }
    }
}
