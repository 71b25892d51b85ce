//! Scholar CLI - Command-line client for Scholar reputation scores.

use clap::Parser;
use scholar_cli::commands;
use scholar_cli::{ApiClient, Cli, Command, Config, Formatter};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> scholar_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &config_path, &formatter)?;
        }
        Command::Me => {
            commands::execute_me(&api_client(&config)?, &formatter).await?;
        }
        Command::User { user_id } => {
            commands::execute_user(&api_client(&config)?, &user_id, &formatter).await?;
        }
        Command::Institution { institution_id } => {
            commands::execute_institution(&api_client(&config)?, &institution_id, &formatter)
                .await?;
        }
    }

    Ok(())
}

/// Client for the active profile
fn api_client(config: &Config) -> scholar_cli::Result<ApiClient> {
    let profile = config.get_active_profile()?;
    Ok(ApiClient::new(&profile.api_url, profile.token.clone()))
}
