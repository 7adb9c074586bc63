//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// fieldmsg - readable field errors from document-model validation failures
///
/// Reads a raw validation failure (JSON or YAML), normalizes its first failing
/// field and prints the resulting error with a message taken from the
/// configured catalog.
#[derive(Parser, Debug)]
#[command(
    name = "fieldmsg",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file (JSON, YAML or TOML)
    #[arg(short, long, global = true, env = "FIELDMSG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a raw validation failure into a field error
    Transform(TransformArgs),

    /// Show the effective message catalog
    Messages(MessagesArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Error document to read (JSON or YAML); stdin when omitted or `-`
    #[arg(value_name = "ERROR_FILE")]
    pub input: Option<PathBuf>,

    /// Override the template for a kind, e.g. `required={path} is not empty`
    #[arg(short, long = "message", value_name = "KIND=TEMPLATE", value_parser = parse_key_value)]
    pub messages: Vec<(String, String)>,

    /// Surface the framework's own message for this field path
    #[arg(long = "original", value_name = "PATH")]
    pub original_paths: Vec<String>,

    /// Custom template for a field path, e.g. `name=name is invalid`
    #[arg(long = "path-message", value_name = "PATH=TEMPLATE", value_parser = parse_key_value)]
    pub path_messages: Vec<(String, String)>,

    /// Show which rule produced the message
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the messages command
#[derive(Parser, Debug)]
pub struct MessagesArgs {
    /// Only show the template for this kind
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Show the shipped defaults, ignoring configuration
    #[arg(long)]
    pub defaults: bool,
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Parse a format name as written in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "human" => Some(Self::Human),
            "json" => Some(Self::Json),
            "json-pretty" | "json_pretty" => Some(Self::JsonPretty),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var("NO_COLOR").is_err()
    }
}
