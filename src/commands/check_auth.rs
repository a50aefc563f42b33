//! Verify the configured Reddit credentials

use crate::commands::reddit_client;
use crate::config::Config;
use crate::error::Result;

/// CLI entry point. Returns the authenticated account name.
pub async fn run(config: &Config) -> Result<String> {
    let session = reddit_client(config)?.authenticate().await?;
    let name = session.whoami().await?;
    println!("✓ Authenticated as u/{}", name);
    Ok(name)
}
