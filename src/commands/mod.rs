//! Command implementations
//!
//! Each module corresponds to a subcommand in the CLI.

pub mod check_auth;
pub mod post;
pub mod preview;

pub use check_auth::run as check_auth_run;
pub use post::{post_with_client, run as post_run};
pub use preview::{format_preview, run as preview_run};

use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::reddit::RedditClient;

/// Build the Reddit client from a loaded config.
pub fn reddit_client(config: &Config) -> Result<RedditClient> {
    RedditClient::new(
        config.credentials.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
}
