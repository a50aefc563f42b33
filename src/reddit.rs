//! Minimal Reddit client (password-grant OAuth and self-post submission).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::publisher::{PostRequest, Submission, Submitter};
use crate::{Error, Result};

const REDDIT_AUTH_URL: &str = "https://www.reddit.com";
const REDDIT_API_URL: &str = "https://oauth.reddit.com";

/// Unauthenticated client; turns credentials into a [`RedditSession`].
#[derive(Debug, Clone)]
pub struct RedditClient {
    http: Client,
    credentials: Credentials,
    auth_url: String,
    api_url: String,
}

impl RedditClient {
    /// Create client with provided credentials.
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self> {
        credentials.validate()?;

        let http = Client::builder()
            .user_agent(credentials.user_agent.clone())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            credentials,
            auth_url: std::env::var("REDDIT_AUTH_URL")
                .unwrap_or_else(|_| REDDIT_AUTH_URL.to_string()),
            api_url: std::env::var("REDDIT_API_URL")
                .unwrap_or_else(|_| REDDIT_API_URL.to_string()),
        })
    }

    /// Create client with custom base urls (primarily for tests).
    pub fn with_base_urls<S1: Into<String>, S2: Into<String>>(
        credentials: Credentials,
        auth_url: S1,
        api_url: S2,
    ) -> Result<Self> {
        let mut client = Self::new(credentials, Duration::from_secs(10))?;
        client.auth_url = auth_url.into();
        client.api_url = api_url.into();
        Ok(client)
    }

    /// Exchange the script-app credentials for a bearer token.
    pub async fn authenticate(&self) -> Result<RedditSession> {
        let c = &self.credentials;
        let response = self
            .http
            .post(format!("{}/api/v1/access_token", self.auth_url))
            .basic_auth(&c.client_id, Some(&c.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", c.username.as_str()),
                ("password", c.password.as_str()),
            ])
            .send()
            .await?;

        let token: TokenResponse = read_json(response, Error::Auth).await?;

        if let Some(error) = token.error {
            return Err(Error::Auth(describe_value(&error)));
        }

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Auth("Reddit returned no access token".to_string()))?;

        info!(
            username = %c.username,
            expires_in = token.expires_in.unwrap_or_default(),
            "Authenticated with Reddit"
        );

        Ok(RedditSession {
            http: self.http.clone(),
            api_url: self.api_url.clone(),
            access_token,
            scope: token.scope,
        })
    }
}

/// Authenticated handle. Created once per run and passed to the publisher.
#[derive(Clone)]
pub struct RedditSession {
    http: Client,
    api_url: String,
    access_token: String,
    scope: Option<String>,
}

impl fmt::Debug for RedditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditSession")
            .field("api_url", &self.api_url)
            .field("access_token", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

impl RedditSession {
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Create a self-post.
    pub async fn submit_post(&self, request: &PostRequest) -> Result<Submission> {
        debug!(subreddit = %request.subreddit, title = %request.title, "Submitting post");

        let response = self
            .http
            .post(format!("{}/api/submit", self.api_url))
            .bearer_auth(&self.access_token)
            .form(&[
                ("api_type", "json"),
                ("kind", "self"),
                ("sr", request.subreddit.as_str()),
                ("title", request.title.as_str()),
                ("text", request.body.as_str()),
            ])
            .send()
            .await?;

        let envelope: SubmitResponse = read_json(response, Error::Reddit).await?;

        if !envelope.json.errors.is_empty() {
            let message = envelope
                .json
                .errors
                .iter()
                .map(|e| describe_api_error(e))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Reddit(message));
        }

        envelope
            .json
            .data
            .ok_or_else(|| Error::Reddit("Reddit did not confirm the submission".to_string()))
    }

    /// Name of the account the token belongs to.
    pub async fn whoami(&self) -> Result<String> {
        let response = self
            .http
            .get(format!("{}/api/v1/me", self.api_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let me: MeResponse = read_json(response, Error::Reddit).await?;
        Ok(me.name)
    }
}

#[async_trait]
impl Submitter for RedditSession {
    async fn submit(&self, request: &PostRequest) -> Result<Submission> {
        self.submit_post(request).await
    }
}

async fn read_json<D: DeserializeOwned>(
    response: reqwest::Response,
    make_err: fn(String) -> Error,
) -> Result<D> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(make_err(format!("HTTP {}: {}", status.as_u16(), text)));
    }
    if status == StatusCode::NO_CONTENT {
        return Err(make_err("empty response".to_string()));
    }

    serde_json::from_str(&text)
        .map_err(|e| make_err(format!("non-JSON response: {} ({})", text, e)))
}

fn describe_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reddit reports errors as `[CODE, message, field]`.
fn describe_api_error(parts: &[serde_json::Value]) -> String {
    parts
        .iter()
        .take(2)
        .filter(|v| !v.is_null())
        .map(describe_value)
        .collect::<Vec<_>>()
        .join(": ")
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    json: SubmitJson,
}

#[derive(Debug, Deserialize)]
struct SubmitJson {
    #[serde(default)]
    errors: Vec<Vec<serde_json::Value>>,
    data: Option<Submission>,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    name: String,
}
