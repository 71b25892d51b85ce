//! Scholar API server
//!
//! Serves reputation scores over HTTP.

use scholar_api::{config::ApiConfig, issue_token, start_server, ApiError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ApiError> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let config = match flag_value(&args, "--config") {
        Some(path) => ApiConfig::from_file(path)?,
        None => {
            eprintln!("Warning: No config file specified, using default test configuration");
            eprintln!("Usage: scholar-api --config <path-to-config.toml>");
            eprintln!();
            ApiConfig::default_test_config()
        }
    };

    if let Some(user_id) = flag_value(&args, "--issue-token") {
        println!("{}", issue_token(&config, user_id)?);
        return Ok(());
    }

    start_server(config).await?;

    Ok(())
}

/// Value following `flag`, if both are present
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn print_help() {
    println!("Scholar API - Reputation scores for users and institutions");
    println!();
    println!("USAGE:");
    println!("    scholar-api --config <path-to-config.toml>");
    println!("    scholar-api --config <path-to-config.toml> --issue-token <user-id>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>          Load configuration from TOML file");
    println!("    --issue-token <user-id>  Print a bearer token for the user and exit");
    println!("    --help                   Print this help message");
    println!();
    println!("ROUTES:");
    println!("    GET /reputation/me");
    println!("    GET /reputation/user/:user_id");
    println!("    GET /reputation/institution/:institution_id");
    println!("    GET /health");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - jwt_secret: Secret key for bearer token signing");
    println!("    - token_expiry_secs: Token expiry in seconds (default: 3600)");
    println!("    - database_path: SQLite database file (default: 'scholar.db')");
    println!("    - log_filter: tracing filter when RUST_LOG is unset (default: 'info')");
    println!();
}
