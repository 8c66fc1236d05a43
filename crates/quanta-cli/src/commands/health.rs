//! Health command implementation.

use anyhow::Result;
use console::style;

use super::common::{ConnectionArgs, create_client};

/// Execute the health command.
pub async fn execute(args: &ConnectionArgs) -> Result<()> {
    let (client, _) = create_client(args)?;
    println!(
        "{} Checking {}",
        style("→").cyan().bold(),
        style(client.base_url()).green()
    );

    let health = client.health().await?;
    let message = health.message.as_deref().unwrap_or("");
    if health.is_ok() {
        println!("{} {} {}", style("✓").green().bold(), health.status, message);
    } else {
        println!("{} {} {}", style("!").yellow().bold(), health.status, message);
    }
    Ok(())
}
