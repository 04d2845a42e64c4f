//! PromptBuilder - structured prompt assembly
//!
//! CLI entry point for the interactive TUI and the one-shot compose,
//! template inspection and log commands.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use eyre::{Context, Result};
use tracing::{debug, info};

use promptbuilder::cli::{Cli, Command, OutputFormat, TemplatesCommand, generate_after_help};
use promptbuilder::clipboard;
use promptbuilder::compose::compose;
use promptbuilder::config::Config;
use promptbuilder::form::{FieldId, FormState};
use promptbuilder::templates::TemplateLoader;
use promptbuilder::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptbuilder")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(log_dir.join("promptbuilder.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

use promptbuilder::cli::get_log_path;

#[tokio::main]
async fn main() -> Result<()> {
    // Build command with dynamic after_help that shows clipboard helper checks
    let cmd = Cli::command().after_help(generate_after_help());

    // Parse CLI arguments using the modified command
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "PromptBuilder loaded config: default-template={}",
        config.general.default_template
    );

    // Dispatch command
    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Compose {
            template,
            role,
            goal,
            context,
            inputs,
            steps,
            tone,
            examples,
            format,
            constraints,
            creativity,
            priority,
            copy,
            output,
        }) => {
            debug!(?template, copy, ?output, "main: matched Compose command");
            let overrides = [
                (FieldId::Role, role),
                (FieldId::Goal, goal),
                (FieldId::Context, context),
                (FieldId::Inputs, inputs),
                (FieldId::Steps, steps),
                (FieldId::Tone, tone),
                (FieldId::Examples, examples),
                (FieldId::Format, format),
                (FieldId::Constraints, constraints),
                (FieldId::Creativity, creativity),
                (FieldId::Priority, priority),
            ];
            cmd_compose(&config, template.as_deref(), overrides, copy, output).await
        }
        Some(Command::Templates { command }) => {
            debug!("main: matched Templates command");
            match command {
                TemplatesCommand::List { output } => {
                    debug!(?output, "main: matched TemplatesCommand::List");
                    cmd_templates_list(&config, output).await
                }
                TemplatesCommand::Show { name, output } => {
                    debug!(%name, ?output, "main: matched TemplatesCommand::Show");
                    cmd_templates_show(&config, &name, output).await
                }
            }
        }
        Some(Command::Logs { follow, lines }) => {
            debug!(follow, lines, "main: matched Logs command");
            cmd_logs(follow, lines).await
        }
        None => {
            debug!("main: no command specified, launching TUI");
            cmd_tui(&config).await
        }
    }
}

/// Launch the interactive TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    debug!("cmd_tui: called");
    info!("Launching TUI");
    tui::run(config).await
}

/// Compose a prompt without entering the TUI
async fn cmd_compose(
    config: &Config,
    template: Option<&str>,
    overrides: [(FieldId, Option<String>); 11],
    copy: bool,
    output: OutputFormat,
) -> Result<()> {
    debug!(?template, copy, ?output, "cmd_compose: called");
    let loader = TemplateLoader::new(&config.templates);

    let mut form = FormState::new();
    let name = template.unwrap_or(&config.general.default_template);
    if loader.apply(name, &mut form) {
        debug!(%name, "cmd_compose: applied template");
    } else {
        // Unknown names leave the form untouched
        debug!(%name, "cmd_compose: unknown template, starting from defaults");
    }

    for (id, value) in overrides {
        if let Some(value) = value {
            form.set(id, value);
        }
    }

    let composed = compose(&form);

    if copy {
        debug!("cmd_compose: copying to clipboard");
        clipboard::copy_text(&composed.text, config.clipboard.helper.as_deref())
            .context("Failed to copy to clipboard")?;
        println!("Copied prompt to clipboard ({} words).", composed.word_count);
        return Ok(());
    }

    match output {
        OutputFormat::Json => {
            debug!("cmd_compose: JSON output");
            println!("{}", serde_json::to_string_pretty(&composed)?);
        }
        OutputFormat::Table => {
            debug!("cmd_compose: table output");
            println!("{:<12} VALUE", "FIELD");
            for id in FieldId::ALL {
                let value = form.get(id);
                if !value.trim().is_empty() {
                    println!("{:<12} {}", id.name(), value.lines().next().unwrap_or(""));
                }
            }
            println!();
            println!("Total: {} words", composed.word_count);
        }
        OutputFormat::Text => {
            println!("{}", composed.text);
        }
    }

    Ok(())
}

/// List resolvable templates
async fn cmd_templates_list(config: &Config, output: OutputFormat) -> Result<()> {
    debug!(?output, "cmd_templates_list: called");
    let loader = TemplateLoader::new(&config.templates);
    let names = loader.names();
    debug!(count = names.len(), "cmd_templates_list: found templates");

    if let OutputFormat::Json = output {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if names.is_empty() {
        debug!("cmd_templates_list: no templates found");
        println!("No templates found.");
        println!("Template paths searched:");
        for path in &config.templates.paths {
            println!("  - {}", path);
        }
        return Ok(());
    }

    println!("Available templates:");
    println!();

    for name in &names {
        if let Some(template) = loader.get(name) {
            debug!(%name, "cmd_templates_list: printing template");
            let defined: Vec<&str> = FieldId::ALL
                .into_iter()
                .filter(|id| template.field(*id).is_some())
                .map(|id| id.name())
                .collect();
            println!("  {}", name);
            if defined.is_empty() {
                println!("    Fields: none");
            } else {
                println!("    Fields: {}", defined.join(", "));
            }
            println!();
        }
    }

    Ok(())
}

/// Show a template's field values
async fn cmd_templates_show(config: &Config, name: &str, output: OutputFormat) -> Result<()> {
    debug!(%name, ?output, "cmd_templates_show: called");
    let loader = TemplateLoader::new(&config.templates);

    let Some(template) = loader.get(name) else {
        debug!(%name, "cmd_templates_show: template not found");
        println!("Template not found: {}", name);
        println!("Template paths searched:");
        for dir in loader.search_dirs() {
            println!("  - {}", dir.display());
        }
        println!("  - built-in: blank, analysis, writing, coding");
        return Ok(());
    };

    if let OutputFormat::Json = output {
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    println!("Template: {}", name);
    println!();
    for id in FieldId::ALL {
        if let Some(value) = template.field(id) {
            if value.contains('\n') {
                println!("  {}:", id.name());
                for line in value.lines() {
                    println!("    {}", line);
                }
            } else {
                println!("  {}: {}", id.name(), value);
            }
        }
    }

    Ok(())
}

/// Show promptbuilder logs
async fn cmd_logs(follow: bool, lines: usize) -> Result<()> {
    debug!(follow, lines, "cmd_logs: called");
    let log_path = get_log_path();

    if !log_path.exists() {
        debug!(?log_path, "cmd_logs: log file does not exist");
        println!("No log file found at: {}", log_path.display());
        println!("Run the TUI or a compose command first.");
        return Ok(());
    }

    if follow {
        debug!(?log_path, "cmd_logs: following log file");
        println!("Following log file: {} (Ctrl+C to stop)", log_path.display());
        println!();

        // Use tail -f for following
        let mut child = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&log_path)
            .spawn()
            .context("Failed to run tail -f")?;

        child.wait()?;
    } else {
        debug!(?log_path, lines, "cmd_logs: reading last N lines");
        // Read last N lines
        let file = fs::File::open(&log_path).context("Failed to open log file")?;
        let reader = BufReader::new(file);
        let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

        let start = if all_lines.len() > lines { all_lines.len() - lines } else { 0 };

        for line in &all_lines[start..] {
            println!("{}", line);
        }
    }

    Ok(())
}
