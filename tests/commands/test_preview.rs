//! Tests for the preview command

#![cfg(unix)]

use leaderboard_poster::commands::{format_preview, preview};

use super::stub_config;

#[test]
fn preview_runs_command_without_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = stub_config(dir.path(), "printf '1. alice 420\\n2. bob 99\\n'");
    config.credentials = Default::default();

    let request = tokio_test::block_on(preview::run(&config)).expect("preview");

    assert_eq!(request.body, "```\n1. alice 420\n2. bob 99\n```");
    assert!(format_preview(&request).starts_with("Subreddit: r/ContainerQuest\n"));
}

#[test]
fn dry_run_post_does_not_need_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = stub_config(dir.path(), "echo rank1");
    config.credentials = Default::default();

    tokio_test::block_on(leaderboard_poster::commands::post::run(&config, true))
        .expect("dry run");
}

#[test]
fn post_without_credentials_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = stub_config(dir.path(), "echo rank1");
    config.credentials.password = String::new();

    let err = tokio_test::block_on(leaderboard_poster::commands::post::run(&config, false))
        .unwrap_err();
    assert!(err.to_string().contains("password"));
}
