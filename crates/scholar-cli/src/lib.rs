//! Scholar CLI library.
//!
//! Configuration profiles, the HTTP client for the Scholar API, command
//! execution and output formatting for the `scholar` binary.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use client::{ApiClient, ReputationResponse};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
