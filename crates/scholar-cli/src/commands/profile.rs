//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the profile command, persisting changes to `config_path`.
pub fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Add { name, url, token } => {
            add_profile(config, config_path, name, url, token, formatter)
        }
        ProfileAction::Use { name } => use_profile(config, config_path, name, formatter),
        ProfileAction::Remove { name } => remove_profile(config, config_path, name, formatter),
    }
}

fn token_status(profile: &Profile) -> &'static str {
    if profile.token.is_some() {
        "set"
    } else {
        "not set"
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        println!("    URL: {}", profile.api_url);
        println!("    Token: {}", token_status(profile));
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  URL: {}", profile.api_url);
    println!("  Token: {}", token_status(profile));

    Ok(())
}

/// Create or update a profile.
fn add_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    url: String,
    token: Option<String>,
    formatter: &Formatter,
) -> Result<()> {
    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), Profile { api_url: url, token });
    config.save_to(config_path)?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );
    Ok(())
}

/// Switch to a different profile.
fn use_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save_to(config_path)?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Delete a profile.
fn remove_profile(
    config: &mut Config,
    config_path: &Path,
    name: String,
    formatter: &Formatter,
) -> Result<()> {
    if config.remove_profile(&name)? {
        config.save_to(config_path)?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}
