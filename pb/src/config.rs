//! PromptBuilder configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main PromptBuilder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level for the log file (the CLI flag takes precedence)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// General behavior
    pub general: GeneralConfig,

    /// Template search paths configuration
    pub templates: TemplatesConfig,

    /// Clipboard fallback configuration
    pub clipboard: ClipboardConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .promptbuilder.yml
        let local_config = PathBuf::from(".promptbuilder.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/promptbuilder/promptbuilder.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("promptbuilder").join("promptbuilder.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level ahead of full config loading
    ///
    /// Logging comes up before `Config::load` so the load itself can be
    /// logged; this pre-reads the same fallback chain leniently.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let path = if let Some(path) = config_path {
            path.clone()
        } else {
            let local = PathBuf::from(".promptbuilder.yml");
            if local.exists() {
                local
            } else {
                dirs::config_dir().map(|d| d.join("promptbuilder").join("promptbuilder.yml"))?
            }
        };
        let content = fs::read_to_string(path).ok()?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content).ok()?;
        value
            .get("log-level")
            .and_then(|v| v.as_str())
            .map(String::from)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// General behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Template applied at startup and used as the compose baseline
    #[serde(rename = "default-template")]
    pub default_template: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_template: "blank".to_string(),
        }
    }
}

/// Template search paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Paths to search for template definitions (searched in order)
    pub paths: Vec<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                "builtin".to_string(),
                "~/.config/promptbuilder/templates".to_string(),
            ],
        }
    }
}

impl TemplatesConfig {
    /// Expand paths (resolve ~/ and relative paths)
    pub fn expanded_paths(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .filter_map(|p| {
                if p == "builtin" {
                    None // builtin is handled by the loader
                } else if p.starts_with("~/") {
                    dirs::home_dir().map(|home| home.join(&p[2..]))
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .collect()
    }

    /// Check if the embedded built-ins should be loaded
    pub fn use_builtin(&self) -> bool {
        self.paths.iter().any(|p| p == "builtin")
    }
}

/// Clipboard fallback configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Explicit fallback command (e.g. "xclip -selection clipboard");
    /// when unset, the platform candidates are tried in order
    pub helper: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.log_level.is_none());
        assert_eq!(config.general.default_template, "blank");
        assert!(config.templates.use_builtin());
        assert!(config.clipboard.helper.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug
general:
  default-template: coding
templates:
  paths:
    - builtin
    - /tmp/pb-templates
clipboard:
  helper: "xclip -selection clipboard"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.general.default_template, "coding");
        assert_eq!(config.templates.paths.len(), 2);
        assert_eq!(
            config.clipboard.helper.as_deref(),
            Some("xclip -selection clipboard")
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = "general:\n  default-template: writing\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.general.default_template, "writing");
        assert!(config.templates.use_builtin());
        assert!(config.clipboard.helper.is_none());
    }

    #[test]
    fn test_expanded_paths_skips_builtin() {
        let config = TemplatesConfig::default();
        for path in config.expanded_paths() {
            assert_ne!(path, PathBuf::from("builtin"));
        }
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let missing = PathBuf::from("/definitely/not/here/promptbuilder.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
