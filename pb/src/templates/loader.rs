//! Template Loader
//!
//! Resolves template names against the configured search directories, falling
//! back to the embedded built-ins.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::embedded;
use crate::config::TemplatesConfig;
use crate::form::{FieldId, FormState};

/// A named bundle of field values
///
/// Defines values for a subset of the text fields; the creativity slider is
/// never part of a template. Applying a template overwrites only the fields
/// it defines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub role: Option<String>,
    pub goal: Option<String>,
    pub context: Option<String>,
    pub inputs: Option<String>,
    pub steps: Option<String>,
    pub tone: Option<String>,
    pub examples: Option<String>,
    pub format: Option<String>,
    pub constraints: Option<String>,
    pub priority: Option<String>,
}

impl Template {
    /// Value this template defines for a field, if any
    pub fn field(&self, id: FieldId) -> Option<&str> {
        match id {
            FieldId::Role => self.role.as_deref(),
            FieldId::Goal => self.goal.as_deref(),
            FieldId::Context => self.context.as_deref(),
            FieldId::Inputs => self.inputs.as_deref(),
            FieldId::Steps => self.steps.as_deref(),
            FieldId::Tone => self.tone.as_deref(),
            FieldId::Examples => self.examples.as_deref(),
            FieldId::Format => self.format.as_deref(),
            FieldId::Constraints => self.constraints.as_deref(),
            FieldId::Creativity => None,
            FieldId::Priority => self.priority.as_deref(),
        }
    }

    /// Overwrite the fields this template defines, leaving the rest alone
    pub fn apply_to(&self, form: &mut FormState) {
        debug!("Template::apply_to: called");
        for id in FieldId::ALL {
            if let Some(value) = self.field(id) {
                form.set(id, value);
            }
        }
    }
}

/// Resolves template names to documents
pub struct TemplateLoader {
    /// Existing search directories, in priority order
    dirs: Vec<PathBuf>,
    /// Whether the embedded built-ins participate in resolution
    use_builtin: bool,
}

impl TemplateLoader {
    pub fn new(config: &TemplatesConfig) -> Self {
        debug!("TemplateLoader::new: called");
        let dirs: Vec<PathBuf> = config
            .expanded_paths()
            .into_iter()
            .filter(|p| p.exists())
            .collect();
        debug!(
            dir_count = dirs.len(),
            use_builtin = config.use_builtin(),
            "TemplateLoader::new: search locations resolved"
        );
        Self {
            dirs,
            use_builtin: config.use_builtin(),
        }
    }

    /// Create a loader that only sees the embedded built-ins (for testing)
    pub fn embedded_only() -> Self {
        debug!("TemplateLoader::embedded_only: called");
        Self {
            dirs: Vec::new(),
            use_builtin: true,
        }
    }

    /// Resolve a template by name
    ///
    /// Checks each configured directory for `{name}.yml`, then the embedded
    /// built-ins. A malformed or unreadable file logs a warning and the chain
    /// continues.
    pub fn get(&self, name: &str) -> Option<Template> {
        debug!(%name, "TemplateLoader::get: called");
        for dir in &self.dirs {
            let path = dir.join(format!("{name}.yml"));
            if !path.exists() {
                continue;
            }
            debug!(?path, "TemplateLoader::get: found file");
            match std::fs::read_to_string(&path) {
                Ok(content) => match serde_yaml::from_str::<Template>(&content) {
                    Ok(template) => return Some(template),
                    Err(e) => warn!("Skipping malformed template {}: {}", path.display(), e),
                },
                Err(e) => warn!("Failed to read template {}: {}", path.display(), e),
            }
        }
        if self.use_builtin
            && let Some(content) = embedded::get_embedded(name)
        {
            debug!(%name, "TemplateLoader::get: found in embedded");
            return serde_yaml::from_str(content).ok();
        }
        debug!(%name, "TemplateLoader::get: not found anywhere");
        None
    }

    /// Apply the named template to the form
    ///
    /// Unknown names leave the form untouched and report false so callers can
    /// skip recomposition.
    pub fn apply(&self, name: &str, form: &mut FormState) -> bool {
        debug!(%name, "TemplateLoader::apply: called");
        match self.get(name) {
            Some(template) => {
                template.apply_to(form);
                true
            }
            None => {
                debug!(%name, "TemplateLoader::apply: unknown template, form unchanged");
                false
            }
        }
    }

    /// All resolvable template names: built-ins first, then user files
    pub fn names(&self) -> Vec<String> {
        debug!("TemplateLoader::names: called");
        let mut names: Vec<String> = Vec::new();
        if self.use_builtin {
            names.extend(embedded::BUILTIN_NAMES.iter().map(|s| s.to_string()));
        }
        for dir in &self.dirs {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("yml") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                    && !names.iter().any(|n| n == stem)
                {
                    names.push(stem.to_string());
                }
            }
        }
        names
    }

    /// Directories searched, for diagnostics
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}
