//! Leaderboard poster CLI - main entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use leaderboard_poster::{commands, metrics, Config};
use tracing::warn;

#[derive(Parser)]
#[command(name = "leaderboard_poster")]
#[command(about = "Post the ContainerQuest leaderboard to Reddit", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.yml (defaults to ./config.yml, then ../config.yml)
    #[arg(short, long, env = "LEADERBOARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Write Prometheus metrics to this file when the command finishes
    #[arg(long, env = "METRICS_FILE", global = true)]
    metrics_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the leaderboard command and post its output
    Post {
        /// Print the post instead of submitting it
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Run the leaderboard command and print the post that would be submitted
    Preview,

    /// Authenticate with Reddit and print the account name
    CheckAuth,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Post { .. } => "post",
            Commands::Preview => "preview",
            Commands::CheckAuth => "check_auth",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("leaderboard_poster=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let command_name = cli.command.name();
    let start = Instant::now();

    let result = execute_command(cli.command, &config).await;

    metrics::record_command_result(command_name, start.elapsed(), result.is_ok());
    if let Some(path) = cli.metrics_file.as_deref() {
        if let Err(err) = metrics::write_textfile(path) {
            warn!(path = %path.display(), "Failed to write metrics: {}", err);
        }
    }

    result
}

async fn execute_command(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Post { dry_run } => {
            commands::post::run(config, dry_run).await?;
        }
        Commands::Preview => {
            commands::preview::run(config).await?;
        }
        Commands::CheckAuth => {
            commands::check_auth::run(config).await?;
        }
    }

    Ok(())
}
