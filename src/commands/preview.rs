//! Show the post that would be submitted

use crate::config::Config;
use crate::error::Result;
use crate::pipeline;
use crate::publisher::PostRequest;
use crate::runner::CommandRunner;

pub fn format_preview(request: &PostRequest) -> String {
    format!(
        "Subreddit: r/{}\nTitle: {}\n\n{}",
        request.subreddit, request.title, request.body
    )
}

/// CLI entry point
pub async fn run(config: &Config) -> Result<PostRequest> {
    let runner = CommandRunner::from_config(&config.command);
    let request = pipeline::preview(&runner, &config.title, &config.subreddit).await?;
    println!("{}", format_preview(&request));
    Ok(request)
}
