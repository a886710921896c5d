//! Errors raised by the shell integration engine.

use std::io;
use std::path::PathBuf;

use super::flavor::Flavor;

/// Errors that can occur while locating, rendering or patching a profile.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("{flavor} is not available: {reason}")]
    Unavailable { flavor: Flavor, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Path contains a CrashCue marker and cannot be embedded: {}", .0.display())]
    MarkerInPath(PathBuf),

    #[error("{0} has no marker block (it is stored in the registry)")]
    NoBlock(Flavor),

    #[error("Failed to install helper files: {0}")]
    Assets(#[source] io::Error),

    #[error("Registry command failed: {0}")]
    Registry(String),
}

impl ShellError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ShellError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ShellError::Write {
            path: path.into(),
            source,
        }
    }
}
