//! Configuration for the Reddit account, the target post and the game command
//!
//! Loads configuration from config.yml file

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default constants (fallback if config.yml not found)
pub const DEFAULT_SUBREDDIT: &str = "ContainerQuest";
pub const DEFAULT_TITLE: &str = "📊 Daily ContainerQuest Leaderboard";
pub const DEFAULT_PROGRAM: &str = "cargo";
pub const DEFAULT_ARGS: [&str; 3] = ["run", "--", "leaderboard"];
pub const LOCK_FILE: &str = "leaderboard_poster.lock";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// YAML config structures
#[derive(Debug, Default, Deserialize)]
struct YamlConfig {
    reddit: Option<RedditConfig>,
    post: Option<PostConfig>,
    command: Option<YamlCommandConfig>,
    lock_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RedditConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
    user_agent: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PostConfig {
    subreddit: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct YamlCommandConfig {
    program: Option<String>,
    args: Option<Vec<String>>,
    allow_failure: Option<bool>,
    timeout_secs: Option<u64>,
    working_dir: Option<PathBuf>,
}

/// Reddit script-app credentials.
#[derive(Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Fail on the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("user_agent", &self.user_agent),
            ("username", &self.username),
            ("password", &self.password),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(Error::MissingCredential(name));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// External command that prints the leaderboard.
#[derive(Debug, Clone)]
pub struct CommandConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Return captured stdout even when the command exits non-zero.
    pub allow_failure: bool,
    pub timeout_secs: Option<u64>,
    pub working_dir: Option<PathBuf>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
            allow_failure: false,
            timeout_secs: None,
            working_dir: None,
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub request_timeout_secs: u64,
    pub subreddit: String,
    pub title: String,
    pub command: CommandConfig,
    pub lock_file: String,
}

/// Files tried, in order, when no explicit config path is given.
pub const CONFIG_SEARCH_PATHS: [&str; 2] = ["config.yml", "../config.yml"];

impl Config {
    /// Load the first config.yml that exists, or defaults if none does.
    /// A file that exists but cannot be read or parsed is an error.
    /// Environment variables take precedence over config.yml values
    pub fn discover() -> Result<Self> {
        for candidate in CONFIG_SEARCH_PATHS {
            if let Some(content) = Self::read_if_present(Path::new(candidate))? {
                return Self::load_from_str(&content);
            }
        }
        Self::load_dotenv();
        Ok(Self::defaults())
    }

    /// Load from an explicit path, or fall back to the default search.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::discover(),
        }
    }

    fn read_if_present(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => {
                Self::load_dotenv();
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> String {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
                return std::env::var(env_key).unwrap_or_default();
            }
        }
        if let Ok(env_val) = std::env::var(env_key) {
            return env_val;
        }
        value.unwrap_or_default()
    }

    /// Load .env file into environment variables using dotenvy
    fn load_dotenv() {
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_filename("../.env");
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_dotenv();

        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn load_from_str(content: &str) -> Result<Self> {
        let yaml: YamlConfig = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(Self::from_yaml(yaml))
    }

    fn from_yaml(yaml: YamlConfig) -> Self {
        let reddit = yaml.reddit.unwrap_or_default();
        let post = yaml.post.unwrap_or_default();
        let command = yaml.command.unwrap_or_default();
        let command_defaults = CommandConfig::default();

        let credentials = Credentials {
            client_id: Self::resolve_env_string(reddit.client_id, "REDDIT_CLIENT_ID"),
            client_secret: Self::resolve_env_string(reddit.client_secret, "REDDIT_CLIENT_SECRET"),
            user_agent: Self::resolve_env_string(reddit.user_agent, "REDDIT_USER_AGENT"),
            username: Self::resolve_env_string(reddit.username, "REDDIT_USERNAME"),
            password: Self::resolve_env_string(reddit.password, "REDDIT_PASSWORD"),
        };

        let subreddit = Self::resolve_env_string(post.subreddit, "REDDIT_SUBREDDIT");
        let subreddit = normalize_subreddit(&subreddit);

        Self {
            credentials,
            request_timeout_secs: reddit
                .timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            subreddit: if subreddit.is_empty() {
                DEFAULT_SUBREDDIT.to_string()
            } else {
                subreddit
            },
            title: post.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            command: CommandConfig {
                program: command.program.unwrap_or(command_defaults.program),
                args: command.args.unwrap_or(command_defaults.args),
                allow_failure: command.allow_failure.unwrap_or(false),
                timeout_secs: command.timeout_secs,
                working_dir: command.working_dir,
            },
            lock_file: yaml.lock_file.unwrap_or_else(|| LOCK_FILE.to_string()),
        }
    }

    /// Defaults with environment overrides applied
    /// User MUST provide credentials via config.yml or env
    fn defaults() -> Self {
        Self::from_yaml(YamlConfig::default())
    }

    /// Fail on the first empty credential field.
    pub fn validate_credentials(&self) -> Result<()> {
        self.credentials.validate()
    }
}

/// Accepts "ContainerQuest", "r/ContainerQuest" and "/r/ContainerQuest".
pub fn normalize_subreddit(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix('/').unwrap_or(name);
    let name = name.strip_prefix("r/").unwrap_or(name);
    name.to_string()
}
