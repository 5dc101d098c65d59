//! Prompt++ - prompt template generator
//!
//! CLI entry point for listing categories, generating prompts and running the
//! interactive session.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use promptplus::catalog::{Catalog, Severity};
use promptplus::cli::{Cli, Command, OutputFormat};
use promptplus::clipboard::{CommandClipboard, CopyAction};
use promptplus::config::{CatalogConfig, Config};
use promptplus::form::FormController;
use promptplus::session::Session;
use promptplus::template::{self, SubstitutionMode};
use promptplus::views;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptplus")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("promptplus.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::List { format }) => {
            let catalog = load_catalog(&config.catalog)?;
            cmd_list(&catalog, format)
        }
        Some(Command::Show { category, format }) => {
            let catalog = load_catalog(&config.catalog)?;
            cmd_show(&catalog, &category, format)
        }
        Some(Command::Generate {
            category,
            set,
            all,
            copy,
            format,
        }) => {
            let catalog = load_catalog(&config.catalog)?;
            let mode = if all { SubstitutionMode::All } else { config.substitution.mode };
            cmd_generate(&config, &catalog, &category, set, mode, copy, format).await
        }
        Some(Command::Check) => {
            // Load leniently so every issue gets reported
            let lenient = CatalogConfig {
                strict: false,
                ..config.catalog.clone()
            };
            let catalog = load_catalog(&lenient)?;
            cmd_check(&catalog)
        }
        Some(Command::Interactive { category }) => {
            let catalog = load_catalog(&config.catalog)?;
            cmd_interactive(&config, &catalog, category).await
        }
        None => {
            debug!("main: no command specified, launching interactive session");
            let catalog = load_catalog(&config.catalog)?;
            cmd_interactive(&config, &catalog, None).await
        }
    }
}

fn load_catalog(config: &CatalogConfig) -> Result<Catalog> {
    Catalog::load(config).context("Failed to load template catalog")
}

fn copy_action(config: &Config) -> CopyAction {
    let clipboard = CommandClipboard::from_config(&config.clipboard);
    CopyAction::new(Arc::new(clipboard), config.clipboard.feedback())
}

/// Print the not-found view; unknown categories are not an error
fn print_not_found(catalog: &Catalog, category: &str, format: OutputFormat) -> Result<()> {
    info!(%category, "Unknown category requested");
    match format {
        OutputFormat::Text => print!("{}", views::not_found(category, catalog.ids())),
        OutputFormat::Json => {
            let body = serde_json::json!({
                "error": "not-found",
                "category": category,
                "available": catalog.ids().collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

/// List categories (home listing)
fn cmd_list(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_list: called");
    let cards = catalog.cards();
    match format {
        OutputFormat::Text => print!("{}", views::home(&cards)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
    }
    Ok(())
}

/// Show one category's form
fn cmd_show(catalog: &Catalog, category: &str, format: OutputFormat) -> Result<()> {
    debug!(%category, ?format, "cmd_show: called");
    let Ok(descriptor) = catalog.lookup(category) else {
        return print_not_found(catalog, category, format);
    };

    match format {
        OutputFormat::Text => print!("{}", views::category(category, descriptor)),
        OutputFormat::Json => {
            let body = serde_json::json!({
                "id": category,
                "descriptor": descriptor,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

/// Fill a template from `--set` values
async fn cmd_generate(
    config: &Config,
    catalog: &Catalog,
    category: &str,
    values: Vec<(String, String)>,
    mode: SubstitutionMode,
    copy: bool,
    format: OutputFormat,
) -> Result<()> {
    debug!(%category, value_count = values.len(), %mode, copy, ?format, "cmd_generate: called");
    let Ok(descriptor) = catalog.lookup(category) else {
        return print_not_found(catalog, category, format);
    };

    let mut form = FormController::new();
    for (name, value) in values {
        form.set_field(&name, value);
    }
    let rendered = form.generate(descriptor, mode).to_string();
    let unfilled = template::unfilled(&rendered);

    let copied = if copy { copy_action(config).copy(&rendered).await } else { false };

    match format {
        OutputFormat::Text => {
            println!("{}", rendered);
            if copied {
                eprintln!("{}", "✓ Copied to clipboard".green());
            }
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "category": category,
                "prompt": rendered,
                "unfilled": unfilled,
                "copied": copied,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

/// Report catalog validation issues
fn cmd_check(catalog: &Catalog) -> Result<()> {
    debug!("cmd_check: called");
    let issues = catalog.validate();
    let errors = issues.iter().filter(|i| i.severity() == Severity::Error).count();

    for issue in &issues {
        let label = match issue.severity() {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow(),
        };
        println!("{}: {}", label, issue);
    }

    if errors > 0 {
        return Err(eyre::eyre!(
            "{} error(s) in {} categories checked",
            errors,
            catalog.len()
        ));
    }

    println!(
        "{} {} categories checked, {} warning(s)",
        "✓".green(),
        catalog.len(),
        issues.len()
    );
    Ok(())
}

/// Run the interactive session
async fn cmd_interactive(config: &Config, catalog: &Catalog, category: Option<String>) -> Result<()> {
    debug!(?category, "cmd_interactive: called");
    let mut session = Session::new(catalog, config.substitution.mode, copy_action(config))?;
    session.run(category).await
}
