//! Publisher: wraps leaderboard text into a post and submits it once.

use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;

/// Placeholder replaced with the local date in post titles.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Wrap text in a fenced code block so Reddit keeps the column layout.
pub fn format_body(text: &str) -> String {
    format!("```\n{}\n```", text)
}

/// Expand `{date}` in a title template.
pub fn render_title(template: &str) -> String {
    if template.contains(DATE_PLACEHOLDER) {
        let today = Local::now().format("%Y-%m-%d").to_string();
        template.replace(DATE_PLACEHOLDER, &today)
    } else {
        template.to_string()
    }
}

/// A self-post ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub title: String,
    pub body: String,
    pub subreddit: String,
}

impl PostRequest {
    pub fn new(title: &str, subreddit: &str, text: &str) -> Self {
        Self {
            title: render_title(title),
            body: format_body(text),
            subreddit: subreddit.to_string(),
        }
    }
}

/// What the forum reported back for a created post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Anything that can create a post: the Reddit session or a test double.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: &PostRequest) -> Result<Submission>;
}

#[async_trait]
impl<'a, T: Submitter + ?Sized> Submitter for &'a T {
    async fn submit(&self, request: &PostRequest) -> Result<Submission> {
        (**self).submit(request).await
    }
}

/// Posts leaderboard text under a fixed title to a fixed subreddit.
pub struct Publisher<S> {
    submitter: S,
    title: String,
    subreddit: String,
}

impl<S: Submitter> Publisher<S> {
    pub fn new<T: Into<String>, R: Into<String>>(submitter: S, title: T, subreddit: R) -> Self {
        Self {
            submitter,
            title: title.into(),
            subreddit: subreddit.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    pub fn request_for(&self, text: &str) -> PostRequest {
        PostRequest::new(&self.title, &self.subreddit, text)
    }

    /// Submit exactly once. Errors propagate unchanged.
    pub async fn publish(&self, text: &str) -> Result<Submission> {
        let request = self.request_for(text);
        let submission = self.submitter.submit(&request).await?;

        info!(
            subreddit = %request.subreddit,
            title = %request.title,
            url = submission.url.as_deref().unwrap_or("-"),
            "Leaderboard posted"
        );
        Ok(submission)
    }
}
