mod test_check_auth;
mod test_post;
mod test_preview;

use leaderboard_poster::{CommandConfig, Config, Credentials};
use std::path::Path;

/// Config pointing at a shell stub and a lock file in `dir`.
pub fn stub_config(dir: &Path, script: &str) -> Config {
    Config {
        credentials: Credentials {
            client_id: "app-id".into(),
            client_secret: "app-secret".into(),
            user_agent: "ContainerQuest Bot by u/tester".into(),
            username: "tester".into(),
            password: "hunter2".into(),
        },
        request_timeout_secs: 5,
        subreddit: "ContainerQuest".into(),
        title: "📊 Daily ContainerQuest Leaderboard".into(),
        command: CommandConfig {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            allow_failure: false,
            timeout_secs: Some(10),
            working_dir: None,
        },
        lock_file: dir.join("poster.lock").to_string_lossy().into_owned(),
    }
}
