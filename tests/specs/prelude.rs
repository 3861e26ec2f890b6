//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

pub use sluice_adapters::{TaskKind, TaskState, TaskStatus};

/// Nothing listens on the discard port
pub const DEAD_URL: &str = "http://127.0.0.1:9";

/// Scratch directory for config files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn sluice(&self) -> Cli {
        let mut cmd = Command::cargo_bin("sluice").unwrap();
        cmd.current_dir(self.path())
            .env_remove("SLUICE_SERVICE_URL")
            .env_remove("SLUICE_QUALITY_URL")
            .env_remove("RUST_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .timeout(Duration::from_secs(30));
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Expect exit code 0
    pub fn passes(mut self) -> Output {
        Output(self.cmd.assert().success())
    }

    /// Expect a non-zero exit code
    pub fn fails(mut self) -> Output {
        Output(self.cmd.assert().failure())
    }
}

pub struct Output(assert_cmd::assert::Assert);

impl Output {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self(self.0.stdout(predicate::str::contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(self.0.stderr(predicate::str::contains(expected)))
    }

    pub fn code(self, expected: i32) -> Self {
        Self(self.0.code(expected))
    }
}

/// Fake crawling and quality service for blocking specs.
///
/// Owns the runtime the server runs on, so it lives as long as the spec
/// holds the value.
pub struct Service {
    fake: sluice_adapters::FakeService,
    _runtime: tokio::runtime::Runtime,
}

impl Service {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let fake = runtime
            .block_on(sluice_adapters::FakeService::start())
            .unwrap();
        Self {
            fake,
            _runtime: runtime,
        }
    }

    /// Block until a request with this target arrives
    pub fn wait_for(&self, target: &str) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !self.fake.targets().iter().any(|t| t == target) {
            assert!(
                Instant::now() < deadline,
                "service never saw {target:?}: {:?}",
                self.fake.targets()
            );
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}

impl Deref for Service {
    type Target = sluice_adapters::FakeService;

    fn deref(&self) -> &Self::Target {
        &self.fake
    }
}

/// Settings that poll quickly so full runs finish in well under a second
pub const FAST_POLLING: &str = "[polling]\ninterval = \"50ms\"\n";
