//! Fetch-and-publish: run the leaderboard command, post its output.

use tracing::info;

use crate::error::Result;
use crate::publisher::{PostRequest, Publisher, Submission, Submitter};
use crate::runner::CommandRunner;

/// Run the command and publish its output once.
pub async fn run_pipeline<S: Submitter>(
    runner: &CommandRunner,
    publisher: &Publisher<S>,
) -> Result<Submission> {
    let text = runner.run().await?;
    info!(bytes = text.len(), subreddit = %publisher.subreddit(), "Leaderboard captured");
    publisher.publish(&text).await
}

/// Run the command and build the post without submitting it.
pub async fn preview(runner: &CommandRunner, title: &str, subreddit: &str) -> Result<PostRequest> {
    let text = runner.run().await?;
    Ok(PostRequest::new(title, subreddit, &text))
}
