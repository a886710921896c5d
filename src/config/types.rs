//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Sound configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Silence `run` and `test` without uninstalling anything
    #[serde(default)]
    pub muted: bool,
    /// Custom sound file; empty means the bundled default
    #[serde(default)]
    pub path: String,
}

/// Command runner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Commands (exact text, arguments joined by spaces) that never play
    #[serde(default)]
    pub ignore_commands: Vec<String>,
}

/// Shell integration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Bound on `$PROFILE` queries and `reg` calls
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

pub fn default_probe_timeout_ms() -> u64 {
    5000
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Workspace overlay read from `.crashcue.toml`.
///
/// Every field is optional; set fields replace the user config's values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigOverlay {
    #[serde(default)]
    pub sound: SoundOverlay,
    #[serde(default)]
    pub run: RunOverlay,
    #[serde(default)]
    pub shell: ShellOverlay,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SoundOverlay {
    pub muted: Option<bool>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunOverlay {
    pub ignore_commands: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShellOverlay {
    pub probe_timeout_ms: Option<u64>,
}

impl Config {
    /// Apply a workspace overlay on top of this config.
    pub fn merge(mut self, overlay: ConfigOverlay) -> Self {
        if let Some(muted) = overlay.sound.muted {
            self.sound.muted = muted;
        }
        if let Some(path) = overlay.sound.path {
            self.sound.path = path;
        }
        if let Some(ignore) = overlay.run.ignore_commands {
            self.run.ignore_commands = ignore;
        }
        if let Some(timeout) = overlay.shell.probe_timeout_ms {
            self.shell.probe_timeout_ms = timeout;
        }
        self
    }

    /// Custom sound path, if one is set.
    pub fn custom_sound(&self) -> Option<&str> {
        let path = self.sound.path.trim();
        (!path.is_empty()).then_some(path)
    }

    /// Check if a command line is on the ignore list (exact match)
    pub fn is_ignored(&self, command_line: &str) -> bool {
        self.run.ignore_commands.iter().any(|c| c == command_line)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.shell.probe_timeout_ms)
    }
}
