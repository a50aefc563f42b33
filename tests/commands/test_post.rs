//! Tests for the post command against a mocked Reddit

#![cfg(unix)]

use httpmock::prelude::*;
use leaderboard_poster::commands::post::post_with_client;
use leaderboard_poster::{Config, Error, RedditClient, RunLock};

use super::stub_config;

fn mock_token(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/access_token");
        then.status(200).json_body(serde_json::json!({
            "access_token": "token-abc",
            "token_type": "bearer",
            "expires_in": 86400,
            "scope": "submit identity"
        }));
    });
}

fn mock_client(server: &MockServer, config: &Config) -> RedditClient {
    RedditClient::with_base_urls(
        config.credentials.clone(),
        server.base_url(),
        server.base_url(),
    )
    .expect("client")
}

#[tokio::test]
async fn post_submits_command_output() {
    let server = MockServer::start_async().await;
    mock_token(&server);

    let submit_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/submit")
            .header("authorization", "Bearer token-abc")
            .is_true(|req| {
                let body = String::from_utf8_lossy(req.body().as_ref());
                body.contains("text=%60%60%60%0Arank1%0Arank2%0A%60%60%60")
            });
        then.status(200).json_body(serde_json::json!({
            "json": {
                "errors": [],
                "data": {
                    "url": "https://www.reddit.com/r/ContainerQuest/comments/q1/",
                    "id": "q1",
                    "name": "t3_q1"
                }
            }
        }));
    });

    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), "printf 'rank1\\nrank2\\n'");
    let client = mock_client(&server, &config);

    let submission = post_with_client(&config, &client).await.expect("posted");

    assert_eq!(submission.id.as_deref(), Some("q1"));
    submit_mock.assert_calls(1);
    RunLock::acquire(&config.lock_file).expect("lock released after post");
}

#[tokio::test]
async fn failed_command_does_not_post() {
    let server = MockServer::start_async().await;
    mock_token(&server);

    let submit_mock = server.mock(|when, then| {
        when.method(POST).path("/api/submit");
        then.status(200).json_body(serde_json::json!({ "json": { "errors": [] } }));
    });

    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), "echo 'no save file' >&2; exit 1");
    let client = mock_client(&server, &config);

    let err = post_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(err, Error::CommandFailed { .. }));
    submit_mock.assert_calls(0);
}

#[tokio::test]
async fn auth_failure_stops_before_command() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/access_token");
        then.status(200)
            .json_body(serde_json::json!({ "error": "invalid_grant" }));
    });

    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let script = format!("touch '{}'; echo rank1", marker.display());
    let config = stub_config(dir.path(), &script);
    let client = mock_client(&server, &config);

    let err = post_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert!(!marker.exists());
}

#[tokio::test]
async fn concurrent_run_is_rejected() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let config = stub_config(dir.path(), "echo rank1");
    let client = mock_client(&server, &config);

    let _held = RunLock::acquire(&config.lock_file).unwrap();
    let err = post_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(err, Error::AlreadyRunning));
}
