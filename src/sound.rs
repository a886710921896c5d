//! Direct playback for `crashcue test` and `crashcue run`
//!
//! Playback is delegated to the bundled helper script, the same one the
//! shell hooks call, so every entry point sounds the same.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use tracing::debug;

use crate::assets::{AssetPaths, HelperScript};
use crate::utils::process::wait_with_timeout;

/// Upper bound on one playback; a stuck audio device must not hang `run`.
pub const PLAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while playing the cue.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Failed to prepare helper files: {0}")]
    Assets(#[source] io::Error),

    #[error("{0} not found on PATH")]
    InterpreterNotFound(&'static str),

    #[error("Failed to start sound helper: {0}")]
    Spawn(#[source] io::Error),

    #[error("Sound helper did not finish: {0}")]
    Wait(#[source] io::Error),

    #[error("Sound helper exited with {0}")]
    Failed(ExitStatus),
}

/// Plays a sound file through the platform helper.
#[derive(Debug, Clone)]
pub struct Player {
    assets: AssetPaths,
    timeout: Duration,
}

impl Player {
    pub fn new(assets: AssetPaths) -> Self {
        Self {
            assets,
            timeout: PLAY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the helper invocation for `sound`.
    pub fn command(&self, sound: &Path) -> Result<Command, PlayerError> {
        let script = HelperScript::native();
        let helper = self.assets.helper(script);

        let command = match script {
            HelperScript::PowerShell => {
                let exe = which::which("powershell")
                    .map_err(|_| PlayerError::InterpreterNotFound("powershell"))?;
                let mut cmd = Command::new(exe);
                cmd.args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"])
                    .arg(&helper)
                    .arg("-Path")
                    .arg(sound);
                cmd
            }
            HelperScript::Posix => {
                let exe = which::which("sh").map_err(|_| PlayerError::InterpreterNotFound("sh"))?;
                let mut cmd = Command::new(exe);
                cmd.arg(&helper).arg(sound);
                cmd
            }
        };
        Ok(command)
    }

    /// Play `sound`, waiting at most the configured timeout.
    pub fn play(&self, sound: &Path) -> Result<(), PlayerError> {
        self.assets.ensure_installed().map_err(PlayerError::Assets)?;

        let mut child = self
            .command(sound)?
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(PlayerError::Spawn)?;

        debug!(sound = %sound.display(), "playing cue");
        let output = wait_with_timeout(&mut child, self.timeout).map_err(PlayerError::Wait)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(PlayerError::Failed(output.status))
        }
    }
}
