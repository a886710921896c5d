//! cmd.exe integration through the per-user AutoRun registry value
//!
//! The value is a `&`-separated command list shared with other tools. We
//! only ever add or remove our own fragment; every other fragment keeps its
//! text and position.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use super::error::ShellError;
use super::inject::PatchAction;
use crate::utils::process::wait_with_timeout;

/// Registry key holding the value.
pub const AUTORUN_KEY: &str = r"HKCU\Software\Microsoft\Command Processor";
/// Name of the value.
pub const AUTORUN_VALUE: &str = "AutoRun";

/// Signature of the current payload.
pub const CURRENT_SIGNATURE: &str = "crashcue.doskey";

/// Signatures of payloads written by older releases, newest first.
pub const LEGACY_SIGNATURES: [&str; 3] = [
    "cmd_macros.doskey",
    "native-windows.ps1",
    "crashcue run-sound",
];

/// Commands wrapped by the doskey macro file.
const WRAPPED_COMMANDS: [&str; 14] = [
    "ls", "dir", "copy", "move", "del", "mkdir", "rmdir", "type", "npm", "npx", "git", "node",
    "cargo", "python",
];

static REG_QUERY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*AutoRun\s+REG_\w+(?:[ \t]+(.*?))?\s*$")
        .expect("AutoRun query pattern is valid")
});

fn is_ours(fragment: &str) -> bool {
    fragment.contains(CURRENT_SIGNATURE) || is_legacy(fragment)
}

fn is_legacy(fragment: &str) -> bool {
    LEGACY_SIGNATURES.iter().any(|sig| fragment.contains(sig))
}

/// Split a value into trimmed, non-empty fragments.
pub fn split_fragments(value: &str) -> Vec<&str> {
    value
        .split('&')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

pub fn join_fragments(fragments: &[&str]) -> String {
    fragments.join(" & ")
}

/// The fragment CrashCue adds to AutoRun.
pub fn payload(macro_file: &Path) -> String {
    format!("doskey /macrofile=\"{}\"", macro_file.display())
}

/// Compute the value after installing `payload`.
///
/// Legacy fragments are stripped. When the current payload is already
/// present the remaining fragments are kept as they are.
pub fn install_value(current: &str, payload: &str) -> (String, PatchAction) {
    let fragments = split_fragments(current);
    let mut kept: Vec<&str> = fragments.iter().copied().filter(|f| !is_legacy(f)).collect();
    let stripped_legacy = kept.len() != fragments.len();

    if kept.iter().any(|f| f.contains(CURRENT_SIGNATURE)) {
        if stripped_legacy {
            return (join_fragments(&kept), PatchAction::Updated);
        }
        return (current.to_string(), PatchAction::Unchanged);
    }

    kept.push(payload);
    let action = if stripped_legacy {
        PatchAction::Updated
    } else {
        PatchAction::Injected
    };
    (join_fragments(&kept), action)
}

/// Compute the value after removing every CrashCue fragment.
///
/// `None` means the value should be deleted.
pub fn uninstall_value(current: &str) -> (Option<String>, PatchAction) {
    let fragments = split_fragments(current);
    let kept: Vec<&str> = fragments.iter().copied().filter(|f| !is_ours(f)).collect();

    if kept.len() == fragments.len() {
        return (Some(current.to_string()), PatchAction::NothingToRemove);
    }
    if kept.is_empty() {
        return (None, PatchAction::Removed);
    }
    (Some(join_fragments(&kept)), PatchAction::Removed)
}

/// Doskey macros that play the cue when a wrapped command fails.
pub fn render_doskey_macros(helper: &Path, sound: &Path) -> String {
    let hook = format!(
        "$T if errorlevel 1 powershell.exe -NoProfile -ExecutionPolicy Bypass -File \"{}\" -Path \"{}\"",
        helper.display(),
        sound.display()
    );
    WRAPPED_COMMANDS
        .iter()
        .map(|cmd| format!("{cmd}={cmd} $* {hook}\r\n"))
        .collect()
}

/// Extract the AutoRun data from `reg query` output.
pub fn parse_reg_query(output: &str) -> Option<String> {
    REG_QUERY_LINE
        .captures(output)
        .map(|caps| caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default())
}

/// Storage for the AutoRun value.
pub trait AutoRunStore {
    /// False where cmd.exe does not exist.
    fn is_available(&self) -> bool;
    /// Current value; `None` when it is not set.
    fn read(&self) -> Result<Option<String>, ShellError>;
    fn write(&mut self, value: &str) -> Result<(), ShellError>;
    fn delete(&mut self) -> Result<(), ShellError>;
}

/// The real registry, driven through `reg.exe`.
#[derive(Debug, Clone)]
pub struct RegAutoRunStore {
    timeout: Duration,
}

impl RegAutoRunStore {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn reg(&self, args: &[&str]) -> Result<std::process::Output, ShellError> {
        let program = which::which("reg").map_err(|e| ShellError::Registry(e.to_string()))?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ShellError::Registry(format!("failed to start reg: {e}")))?;
        wait_with_timeout(&mut child, self.timeout)
            .map_err(|e| ShellError::Registry(format!("reg did not finish: {e}")))
    }

    fn reg_checked(&self, args: &[&str]) -> Result<(), ShellError> {
        let output = self.reg(args)?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ShellError::Registry(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

impl AutoRunStore for RegAutoRunStore {
    fn is_available(&self) -> bool {
        cfg!(windows) && which::which("reg").is_ok()
    }

    fn read(&self) -> Result<Option<String>, ShellError> {
        let output = self.reg(&["query", AUTORUN_KEY, "/v", AUTORUN_VALUE])?;
        // reg exits 1 when the value does not exist
        if !output.status.success() {
            return Ok(None);
        }
        Ok(parse_reg_query(&String::from_utf8_lossy(&output.stdout)))
    }

    fn write(&mut self, value: &str) -> Result<(), ShellError> {
        debug!(value, "writing AutoRun");
        // Passed as one argument; std quotes embedded `"` for reg's parser.
        self.reg_checked(&[
            "add",
            AUTORUN_KEY,
            "/v",
            AUTORUN_VALUE,
            "/t",
            "REG_EXPAND_SZ",
            "/d",
            value,
            "/f",
        ])
    }

    fn delete(&mut self) -> Result<(), ShellError> {
        debug!("deleting AutoRun");
        self.reg_checked(&["delete", AUTORUN_KEY, "/v", AUTORUN_VALUE, "/f"])
    }
}

/// In-memory store for exercising the AutoRun logic without a registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryAutoRunStore {
    pub value: Option<String>,
    pub writes: usize,
}

impl MemoryAutoRunStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            writes: 0,
        }
    }
}

impl AutoRunStore for MemoryAutoRunStore {
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self) -> Result<Option<String>, ShellError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), ShellError> {
        self.value = Some(value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ShellError> {
        self.value = None;
        self.writes += 1;
        Ok(())
    }
}
