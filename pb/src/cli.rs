//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// PromptBuilder - structured prompt assembly
#[derive(Parser)]
#[command(
    name = "promptbuilder",
    about = "Interactive prompt builder for LLM workflows",
    version,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose a prompt from a template and field overrides (batch mode)
    Compose {
        /// Template to start from (defaults to general.default-template)
        #[arg(short, long)]
        template: Option<String>,

        /// Role field
        #[arg(long)]
        role: Option<String>,

        /// Goal field
        #[arg(long)]
        goal: Option<String>,

        /// Context field
        #[arg(long)]
        context: Option<String>,

        /// Inputs field
        #[arg(long)]
        inputs: Option<String>,

        /// Steps field
        #[arg(long)]
        steps: Option<String>,

        /// Tone field
        #[arg(long)]
        tone: Option<String>,

        /// Examples field
        #[arg(long)]
        examples: Option<String>,

        /// Format field
        #[arg(long)]
        format: Option<String>,

        /// Constraints field
        #[arg(long)]
        constraints: Option<String>,

        /// Creativity slider value (0-10)
        #[arg(long)]
        creativity: Option<String>,

        /// Priority field
        #[arg(long)]
        priority: Option<String>,

        /// Copy the composed prompt to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Inspect available templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },

    /// Show promptbuilder logs
    Logs {
        /// Follow log output (like tail -f)
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

/// Template inspection subcommands
#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List resolvable template names
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Show a template's field values
    Show {
        /// Template name
        name: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },
}

/// Result of checking a clipboard helper tool
pub struct ToolCheck {
    pub name: &'static str,
    pub available: bool,
    pub version: Option<String>,
}

impl ToolCheck {
    /// Check if a tool is available and get its version
    pub fn check(name: &'static str, version_args: &[&str]) -> Self {
        debug!(name, ?version_args, "ToolCheck::check: called");
        let result = std::process::Command::new(name).args(version_args).output();

        match result {
            Ok(output) if output.status.success() => {
                debug!(name, "ToolCheck::check: tool available");
                let version_str = String::from_utf8_lossy(&output.stdout);
                let version = parse_version(&version_str);
                Self {
                    name,
                    available: true,
                    version: Some(version),
                }
            }
            _ => {
                debug!(name, "ToolCheck::check: tool not available");
                Self {
                    name,
                    available: false,
                    version: None,
                }
            }
        }
    }
}

/// Parse version from command output (extracts first version-like string)
fn parse_version(output: &str) -> String {
    debug!(%output, "parse_version: called");
    // Look for patterns like "1.2.3" or "v1.2.3"
    for word in output.split_whitespace() {
        let word = word.trim_start_matches('v');
        if word.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            // Take until non-version character
            let version: String = word.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
            if !version.is_empty() {
                debug!(%version, "parse_version: found version");
                return version;
            }
        }
    }
    debug!("parse_version: no version found, returning unknown");
    "unknown".to_string()
}

/// Check the clipboard helper tools for this platform
pub fn check_clipboard_tools() -> Vec<ToolCheck> {
    debug!("check_clipboard_tools: called");
    #[cfg(target_os = "linux")]
    let tools = vec![
        ToolCheck::check("wl-copy", &["--version"]),
        ToolCheck::check("xclip", &["-version"]),
        ToolCheck::check("xsel", &["--version"]),
    ];
    #[cfg(target_os = "macos")]
    let tools = vec![ToolCheck::check("pbcopy", &[])];
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    let tools: Vec<ToolCheck> = Vec::new();
    debug!(count = tools.len(), "check_clipboard_tools: returning tools");
    tools
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptbuilder")
        .join("logs")
        .join("promptbuilder.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with clipboard helper checks
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let tools = check_clipboard_tools();
    let log_path = get_log_path();

    let mut help = String::new();

    // Clipboard helpers section (fallback path when the provider is down)
    help.push_str("Clipboard Helpers:\n");
    for tool in &tools {
        let icon = if tool.available {
            debug!(name = tool.name, "generate_after_help: helper available");
            "\u{2705}"
        } else {
            debug!(name = tool.name, "generate_after_help: helper not available");
            "\u{274C}"
        };
        let version = tool.version.as_deref().unwrap_or("not found");
        help.push_str(&format!("  {} {:<10} {}\n", icon, tool.name, version));
    }
    if tools.is_empty() {
        help.push_str("  (none required on this platform)\n");
    }

    // Log path
    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", log_path.display()));

    debug!("generate_after_help: returning help text");
    help
}

/// Output format for compose/templates commands
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => {
                debug!("OutputFormat::from_str: matched Text");
                Ok(Self::Text)
            }
            "json" => {
                debug!("OutputFormat::from_str: matched Json");
                Ok(Self::Json)
            }
            "table" => {
                debug!("OutputFormat::from_str: matched Table");
                Ok(Self::Table)
            }
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text, json, or table", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        debug!(?self, "OutputFormat::fmt: called");
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}
