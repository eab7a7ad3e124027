// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub const CHAIN: &str = r#"
[chain]
gateway_url = "http://127.0.0.1:9"
account = "0x00000000000000000000000000000000000000f1"
"#;

pub const KEEPER: &str = r#"
[keeper]
enabled = true
registry = "0x00000000000000000000000000000000000000c1"
funding_token = "0x00000000000000000000000000000000000000c2"
"#;

pub const RELAY: &str = r#"
[relay]
enabled = true
api_key = "spec-key"
"#;

/// `uk` with a clean environment, run outside any project.
pub fn cli() -> Cli {
    let dir = TempDir::new().unwrap();
    let cli = Cli::new(dir.path());
    Cli { _dir: Some(dir), ..cli }
}

/// Temporary working directory holding a `uk.toml`.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn with_config(config: &str) -> Self {
        let project = Self { dir: TempDir::new().unwrap() };
        project.file("uk.toml", config);
        project
    }

    pub fn file(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn uk(&self) -> Cli {
        Cli::new(self.dir.path())
    }
}

pub struct Cli {
    cmd: Command,
    _dir: Option<TempDir>,
}

impl Cli {
    fn new(cwd: &Path) -> Self {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_uk"));
        cmd.current_dir(cwd)
            .env_remove("UK_CONFIG")
            .env_remove("UK_RELAY_API_KEY")
            .env_remove("UK_KEEPER_POLL_MS")
            .env_remove("UK_RELAY_POLL_MS")
            .env("UK_LOG", "warn")
            .env("NO_COLOR", "1")
            .env("XDG_CONFIG_HOME", cwd.join(".config"))
            .env("HOME", cwd);
        Self { cmd, _dir: None }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(self) -> Run {
        self.exits_with(0)
    }

    pub fn exits_with(mut self, code: i32) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            run.stdout,
            run.stderr
        );
        run
    }
}

pub struct Run {
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// `[[job]]` block.
pub fn job(name: &str, gas: u64, frequency: u64, priority: &str) -> String {
    format!(
        r#"
[[job]]
name = "{name}"
target = "0x00000000000000000000000000000000000000aa"
function = "rebalance"
gas_limit = {gas}
frequency_secs = {frequency}
priority = "{priority}"
"#
    )
}
