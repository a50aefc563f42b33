//! Command runner: executes the game binary and captures the leaderboard text.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::CommandConfig;
use crate::error::{Error, Result};

/// Runs one external command and returns its trimmed stdout.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
    allow_failure: bool,
    timeout: Option<Duration>,
    working_dir: Option<PathBuf>,
}

impl CommandRunner {
    pub fn new<S, I, A>(program: S, args: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            allow_failure: false,
            timeout: None,
            working_dir: None,
        }
    }

    pub fn from_config(config: &CommandConfig) -> Self {
        let mut runner = Self::new(config.program.clone(), config.args.clone())
            .allow_failure(config.allow_failure);
        if let Some(secs) = config.timeout_secs {
            runner = runner.timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = &config.working_dir {
            runner = runner.working_dir(dir.clone());
        }
        runner
    }

    /// When set, a non-zero exit is logged and the captured stdout is still returned.
    pub fn allow_failure(mut self, allow: bool) -> Self {
        self.allow_failure = allow;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Human-readable command line, e.g. `cargo run -- leaderboard`.
    pub fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command to completion.
    pub async fn run(&self) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        info!(command = %self.describe(), "Running leaderboard command");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| Error::CommandTimeout {
                    program: self.program.clone(),
                    timeout: limit,
                })?,
            None => cmd.output().await,
        }
        .map_err(|source| Error::CommandSpawn {
            program: self.program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stderr.is_empty() {
            warn!(stderr = %stderr, "Leaderboard command wrote to stderr");
        }

        if !output.status.success() {
            if !self.allow_failure {
                return Err(Error::CommandFailed {
                    program: self.program.clone(),
                    status: output.status.to_string(),
                    stderr,
                });
            }
            warn!(status = %output.status, "Leaderboard command failed, using captured output");
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            warn!("Leaderboard command produced no output");
        }
        debug!(bytes = text.len(), "Captured leaderboard text");

        Ok(text)
    }
}
