//! Post the leaderboard to Reddit

use tracing::info;

use crate::commands::{preview, reddit_client};
use crate::config::Config;
use crate::error::Result;
use crate::lock::RunLock;
use crate::metrics;
use crate::pipeline::run_pipeline;
use crate::publisher::{Publisher, Submission};
use crate::reddit::RedditClient;
use crate::runner::CommandRunner;

/// Authenticate, run the leaderboard command, submit one post.
pub async fn post_with_client(config: &Config, client: &RedditClient) -> Result<Submission> {
    let _lock = RunLock::acquire(&config.lock_file)?;

    let session = client.authenticate().await?;
    let runner = CommandRunner::from_config(&config.command);
    let publisher = Publisher::new(&session, config.title.clone(), config.subreddit.clone());

    let submission = run_pipeline(&runner, &publisher).await?;
    metrics::record_submission();

    println!(
        "✅ Posted to r/{}: {}",
        config.subreddit,
        submission.url.as_deref().unwrap_or("(no url returned)")
    );
    Ok(submission)
}

/// CLI entry point
pub async fn run(config: &Config, dry_run: bool) -> Result<()> {
    if dry_run {
        info!("Dry run: nothing will be submitted");
        preview::run(config).await?;
        return Ok(());
    }

    let client = reddit_client(config)?;
    post_with_client(config, &client).await?;
    Ok(())
}
