//! Leaderboard poster library
//!
//! This library provides tools to:
//! - Run the ContainerQuest game binary and capture its leaderboard
//! - Authenticate against Reddit with script-app credentials
//! - Post the leaderboard as a self-post to a subreddit
//! - Guard against concurrent runs and export run metrics

pub mod config;
pub mod error;
pub mod lock;
pub mod metrics;
pub mod pipeline;
pub mod publisher;
pub mod reddit;
pub mod runner;

// Re-export common types
pub use config::{CommandConfig, Config, Credentials};
pub use error::{Error, Result};
pub use lock::RunLock;
pub use pipeline::run_pipeline;
pub use publisher::{format_body, PostRequest, Publisher, Submission, Submitter};
pub use reddit::{RedditClient, RedditSession};
pub use runner::CommandRunner;

// Commands module uses re-exported types, so it must be declared after the re-exports
pub mod commands;
