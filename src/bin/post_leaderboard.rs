//! Post the leaderboard to Reddit
//!
//! Usage:
//!   cargo run --bin post_leaderboard -- [--config config.yml] [--dry-run]
//!
//! Equivalent to `leaderboard_poster post`.

use clap::Parser;
use std::path::PathBuf;

use leaderboard_poster::commands::post;
use leaderboard_poster::{Config, Result};

#[derive(Parser)]
#[command(name = "post_leaderboard")]
#[command(about = "Post the ContainerQuest leaderboard to Reddit")]
struct Args {
    /// Path to config.yml
    #[arg(short, long, env = "LEADERBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Print the post instead of submitting it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter("leaderboard_poster=info")
        .init();

    let config = Config::load(args.config.as_deref())?;
    post::run(&config, args.dry_run).await
}
