//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Scholar CLI - Look up reputation scores on a Scholar server.
#[derive(Debug, Parser)]
#[command(name = "scholar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SCHOLAR_CONFIG")]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (score only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show your own reputation
    Me,

    /// Show a user's reputation
    User {
        /// User ID
        user_id: String,
    },

    /// Show an institution's reputation
    Institution {
        /// Institution ID
        institution_id: String,
    },

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Create or update a profile
    Add {
        /// Profile name
        name: String,
        /// API base URL (e.g., http://localhost:8080)
        #[arg(short, long)]
        url: String,
        /// Bearer token
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Switch to a different profile
    Use {
        /// Profile name
        name: String,
    },

    /// Delete a profile
    Remove {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
