//! Backups of shell profiles.
//!
//! Every mutation of an existing profile is preceded by a copy to a
//! timestamped sibling. Backups are never pruned or read back.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

/// Outcome of a backup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupResult {
    /// Copy written to this path.
    Created(PathBuf),
    /// Nothing to back up (the profile does not exist yet).
    Skipped,
    /// Copy failed; the caller proceeds without a backup.
    Failed(String),
}

impl BackupResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            BackupResult::Created(path) => Some(path),
            _ => None,
        }
    }
}

/// Same-second backups tried before giving up.
const MAX_SEQUENCE: u32 = 100;

/// Get the backup path for `path` at time `now`.
///
/// `<profile>.crashcue-<YYYYMMDD-HHMMSS>.bak` next to the profile; a
/// non-zero `seq` becomes `-<seq>` before `.bak` for backups taken within
/// the same second.
pub fn backup_path_for(path: &Path, now: DateTime<Local>, seq: u32) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(format!(".crashcue-{}", now.format("%Y%m%d-%H%M%S")));
    if seq > 0 {
        backup.push(format!("-{seq}"));
    }
    backup.push(".bak");
    PathBuf::from(backup)
}

/// Copy `path` to a timestamped sibling if it exists.
///
/// Existing backups are never overwritten.
pub fn create_backup(path: &Path) -> BackupResult {
    if !path.exists() {
        return BackupResult::Skipped;
    }

    let now = Local::now();
    for seq in 0..MAX_SEQUENCE {
        let backup = backup_path_for(path, now, seq);
        match copy_new(path, &backup) {
            Ok(()) => {
                debug!(profile = %path.display(), backup = %backup.display(), "backed up profile");
                return BackupResult::Created(backup);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return failed(path, &backup, e),
        }
    }

    let backup = backup_path_for(path, now, MAX_SEQUENCE);
    failed(
        path,
        &backup,
        io::Error::new(io::ErrorKind::AlreadyExists, "too many backups this second"),
    )
}

/// Copy `from` into `to`, failing with `AlreadyExists` if `to` is taken.
fn copy_new(from: &Path, to: &Path) -> io::Result<()> {
    let mut source = File::open(from)?;
    let mut target = OpenOptions::new().write(true).create_new(true).open(to)?;
    io::copy(&mut source, &mut target)?;
    Ok(())
}

fn failed(path: &Path, backup: &Path, e: io::Error) -> BackupResult {
    let message = format!("Failed to create backup {}: {}", backup.display(), e);
    warn!(profile = %path.display(), error = %e, "backup failed, continuing without one");
    BackupResult::Failed(message)
}
