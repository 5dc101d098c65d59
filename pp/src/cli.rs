//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Prompt++ - craft smarter prompts, faster
#[derive(Parser, Debug)]
#[command(name = "pp")]
#[command(author, version, about = "Fill-in-the-blanks prompt templates for language models", long_about = None)]
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

    /// Subcommand to execute (interactive session when omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List task categories
    List {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a category's fields and options
    Show {
        /// Category id (e.g. content-creation)
        category: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Fill a category's template and print the prompt
    Generate {
        /// Category id (e.g. writing)
        category: String,

        /// Field value, repeatable
        #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Fill every occurrence of a placeholder, not just the first
        #[arg(short, long)]
        all: bool,

        /// Copy the prompt to the clipboard
        #[arg(long)]
        copy: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Check the catalog for placeholder/field mismatches
    Check,

    /// Start the interactive session
    Interactive {
        /// Category to open directly
        category: Option<String>,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse `name=value`, splitting at the first `=`
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}
