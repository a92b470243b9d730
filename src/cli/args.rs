//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default rules file, relative to the current directory
pub const DEFAULT_RULES_FILE: &str = "flags.yaml";

/// Output format for flaggate commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// flaggate CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "flaggate")]
#[command(about = "Evaluate declarative feature flag rules")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Rules file (YAML, or TOML with a .toml extension)
    #[arg(long, global = true, env = "FLAGGATE_RULES", default_value = DEFAULT_RULES_FILE)]
    pub rules: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available flaggate subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter rules file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Parse and validate the rules file
    Check,

    /// List all flags and their targeting
    List,

    /// Evaluate one flag for one user (exit 0 when on, 1 when off)
    Eval {
        /// Flag name
        flag: String,

        /// User id
        #[arg(long = "user")]
        user_id: Option<String>,

        /// Subscription plan (free, pro, enterprise)
        #[arg(long)]
        plan: Option<String>,

        /// Region
        #[arg(long)]
        region: Option<String>,
    },

    /// Evaluate one flag for many users read as JSON Lines
    Batch {
        /// Flag name
        flag: String,

        /// File with one JSON user context per line (reads stdin if omitted)
        #[arg(long)]
        contexts: Option<PathBuf>,
    },
}
