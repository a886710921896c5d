//! Injecting and removing the CrashCue block in profile text
//!
//! The pure functions work on strings and never touch the disk; a
//! [`ProfilePatch`] pairs their result with the file it belongs to so the
//! caller can back up, write, or skip.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ShellError;
use super::locate::ensure_parent_dir;
use super::markers::{block_pattern, removal_pattern};
use super::render::InjectionBlock;

/// Whether a profile already carries a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    NotPresent,
    Present,
}

impl BlockState {
    pub fn of(content: &str) -> Self {
        if block_pattern().is_match(content) {
            BlockState::Present
        } else {
            BlockState::NotPresent
        }
    }
}

/// What applying a patch does to the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    Injected,
    Updated,
    Unchanged,
    Removed,
    NothingToRemove,
}

/// Compute the profile text after installing `block`.
///
/// An existing block is replaced in place and any duplicates after it are
/// dropped. Otherwise the block is appended on a line of its own.
pub fn apply_install(content: &str, block: &str) -> (String, PatchAction) {
    let Some(first) = block_pattern().find(content) else {
        let mut out = String::with_capacity(content.len() + block.len() + 2);
        out.push_str(content);
        if !content.is_empty() && !content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(block);
        out.push('\n');
        return (out, PatchAction::Injected);
    };

    // Concatenate instead of Regex::replace: PowerShell's `$` would be read
    // as a capture group reference.
    let rest = &content[first.end()..];
    let rest = removal_pattern().replace_all(rest, "");
    let out = format!("{}{}{}", &content[..first.start()], block, rest);

    let action = if out == content {
        PatchAction::Unchanged
    } else {
        PatchAction::Updated
    };
    (out, action)
}

/// Compute the profile text after removing every block.
pub fn apply_uninstall(content: &str) -> (String, PatchAction) {
    if BlockState::of(content) == BlockState::NotPresent {
        return (content.to_string(), PatchAction::NothingToRemove);
    }
    let out = removal_pattern().replace_all(content, "").into_owned();
    (out, PatchAction::Removed)
}

/// A planned change to one profile file.
#[derive(Debug, Clone)]
pub struct ProfilePatch {
    pub path: PathBuf,
    pub existed: bool,
    pub original: String,
    pub modified: String,
    pub action: PatchAction,
}

impl ProfilePatch {
    pub fn has_changes(&self) -> bool {
        self.original != self.modified
    }

    /// Write the modified content, creating parent directories as needed.
    pub fn apply(&self) -> Result<(), ShellError> {
        if !self.has_changes() {
            return Ok(());
        }
        ensure_parent_dir(&self.path)?;
        fs::write(&self.path, &self.modified).map_err(|e| ShellError::write(&self.path, e))?;
        debug!(profile = %self.path.display(), action = ?self.action, "profile written");
        Ok(())
    }
}

/// Read a profile; a missing file reads as empty.
pub fn read_profile(path: &Path) -> Result<(bool, String), ShellError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok((true, content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok((false, String::new())),
        Err(e) => Err(ShellError::read(path, e)),
    }
}

/// Plan installing `block` into the profile at `path`.
pub fn plan_install(path: &Path, block: &InjectionBlock) -> Result<ProfilePatch, ShellError> {
    let (existed, original) = read_profile(path)?;
    let (modified, action) = apply_install(&original, block.text());
    Ok(ProfilePatch {
        path: path.to_path_buf(),
        existed,
        original,
        modified,
        action,
    })
}

/// Plan removing every block from the profile at `path`.
pub fn plan_uninstall(path: &Path) -> Result<ProfilePatch, ShellError> {
    let (existed, original) = read_profile(path)?;
    let (modified, action) = apply_uninstall(&original);
    Ok(ProfilePatch {
        path: path.to_path_buf(),
        existed,
        original,
        modified,
        action,
    })
}
