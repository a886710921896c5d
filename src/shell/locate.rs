//! Profile location per flavor
//!
//! Bash uses a fixed `~/.bashrc`. PowerShell flavors ask the interpreter for
//! `$PROFILE.CurrentUserCurrentHost` so we write exactly the file it will
//! load, never a guess. cmd stores its hook in the registry instead.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::debug;

use super::autorun::{AUTORUN_KEY, AUTORUN_VALUE};
use super::error::ShellError;
use super::flavor::Flavor;
use crate::utils::process::wait_with_timeout;

/// Default bound on the PowerShell profile query.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a flavor keeps its startup hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLocation {
    File(PathBuf),
    AutoRun,
}

impl ProfileLocation {
    pub fn file(&self) -> Option<&Path> {
        match self {
            ProfileLocation::File(path) => Some(path),
            ProfileLocation::AutoRun => None,
        }
    }
}

impl fmt::Display for ProfileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileLocation::File(path) => write!(f, "{}", path.display()),
            ProfileLocation::AutoRun => write!(f, "{}\\{}", AUTORUN_KEY, AUTORUN_VALUE),
        }
    }
}

/// Asks a PowerShell interpreter for its profile path.
pub trait ProfileProbe {
    /// Returns the profile path, or a human-readable reason it is unknown.
    fn query(&self, exe: &str) -> Result<PathBuf, String>;
}

/// Runs the real interpreter with a bounded timeout.
#[derive(Debug, Clone)]
pub struct PowerShellProbe {
    timeout: Duration,
}

impl PowerShellProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for PowerShellProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl ProfileProbe for PowerShellProbe {
    fn query(&self, exe: &str) -> Result<PathBuf, String> {
        let program = which::which(exe).map_err(|_| format!("{exe} not found on PATH"))?;

        let mut child = Command::new(&program)
            .args([
                "-NoLogo",
                "-NoProfile",
                "-NonInteractive",
                "-Command",
                "$PROFILE.CurrentUserCurrentHost",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("failed to start {exe}: {e}"))?;

        let output = wait_with_timeout(&mut child, self.timeout)
            .map_err(|e| format!("{exe} did not answer: {e}"))?;

        if !output.status.success() {
            return Err(format!("{exe} exited with {}", output.status));
        }

        parse_profile_output(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| format!("{exe} reported no profile path"))
    }
}

/// Extract the profile path from interpreter output.
///
/// Tolerates a UTF-8 BOM, CRLF and surrounding blank lines.
pub fn parse_profile_output(stdout: &str) -> Option<PathBuf> {
    stdout
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// Resolve where `flavor` keeps its hook.
pub fn locate(
    flavor: Flavor,
    home: &Path,
    probe: &dyn ProfileProbe,
) -> Result<ProfileLocation, ShellError> {
    match flavor {
        Flavor::Bash => Ok(ProfileLocation::File(home.join(".bashrc"))),
        Flavor::Cmd => Ok(ProfileLocation::AutoRun),
        Flavor::PowerShell | Flavor::Pwsh => {
            let exe = flavor.powershell_exe().unwrap_or("pwsh");
            let path = probe
                .query(exe)
                .map_err(|reason| ShellError::Unavailable { flavor, reason })?;
            debug!(%flavor, profile = %path.display(), "located PowerShell profile");
            Ok(ProfileLocation::File(path))
        }
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ShellError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            debug!(dir = %parent.display(), "creating profile directory");
            fs::create_dir_all(parent).map_err(|e| ShellError::write(parent, e))
        }
        _ => Ok(()),
    }
}
