pub mod mock_tts;

use haltalks::config::Config;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A console session run as a child process with an isolated config
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");

        // No audio hardware and no random alerts in tests
        let config = Config {
            tts_engine: "silent".to_string(),
            alerts_enabled: false,
            drain_grace_secs: 2,
            ..Config::default()
        };
        config.save_to(&config_path).expect("Failed to write config");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Feed `input` to the console binary and collect what it printed
    pub fn run(&self, input: &str) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_haltalks");

        let mut child = Command::new(bin_path)
            .arg("--config")
            .arg(&self.config_path)
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "off")
            .env_remove("HALTALKS_CONFIG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn haltalks");

        {
            let mut stdin = child.stdin.take().expect("stdin");
            stdin
                .write_all(input.as_bytes())
                .expect("Failed to write to stdin");
        }

        child.wait_with_output().expect("Failed to wait for haltalks")
    }
}
