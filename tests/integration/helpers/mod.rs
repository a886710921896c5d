//! Test helper utilities for driving the binary

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated HOME, config directory and working directory for one test.
pub struct CliEnv {
    pub temp: TempDir,
}

impl CliEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp.path().join("home")).unwrap();
        fs::create_dir_all(temp.path().join("work")).unwrap();
        Self { temp }
    }

    pub fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("config.toml")
    }

    pub fn workdir(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    pub fn bashrc(&self) -> PathBuf {
        self.home().join(".bashrc")
    }

    /// `crashcue` with the environment pointed at this sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_crashcue"));
        cmd.current_dir(self.workdir())
            .env("HOME", self.home())
            .env("USERPROFILE", self.home())
            .env("CRASHCUE_CONFIG_DIR", self.config_dir())
            .env("NO_COLOR", "1")
            .env_remove("CRASHCUE_LOG");
        cmd
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()))
    }
}

impl Default for CliEnv {
    fn default() -> Self {
        Self::new()
    }
}
