//! Reputation lookup commands.

use crate::client::ApiClient;
use crate::error::Result;
use crate::output::Formatter;

/// Execute `scholar me`.
pub async fn execute_me(client: &ApiClient, formatter: &Formatter) -> Result<()> {
    let reputation = client.my_reputation().await?;
    println!("{}", formatter.format_reputation("you", &reputation)?);
    Ok(())
}

/// Execute `scholar user <USER_ID>`.
pub async fn execute_user(client: &ApiClient, user_id: &str, formatter: &Formatter) -> Result<()> {
    let reputation = client.user_reputation(user_id).await?;
    println!(
        "{}",
        formatter.format_reputation(&format!("user {}", user_id), &reputation)?
    );
    Ok(())
}

/// Execute `scholar institution <INSTITUTION_ID>`.
pub async fn execute_institution(
    client: &ApiClient,
    institution_id: &str,
    formatter: &Formatter,
) -> Result<()> {
    let reputation = client.institution_reputation(institution_id).await?;
    println!(
        "{}",
        formatter.format_reputation(&format!("institution {}", institution_id), &reputation)?
    );
    Ok(())
}
