//! Status detection and reporting for shell integration
//!
//! Reads a flavor's profile (or AutoRun value) without changing it and
//! reports whether a block is installed, which template version it carries
//! and which helper and sound files it points at.

use std::path::PathBuf;

use serde::Serialize;

use super::autorun::{split_fragments, CURRENT_SIGNATURE, LEGACY_SIGNATURES};
use super::flavor::{Flavor, Syntax};
use super::markers::{block_pattern, MARKER_END, MARKER_START};
use super::render::extract_version;

/// What a flavor's profile currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Installation {
    NotInstalled,
    Installed {
        /// Template version of the first block; `None` when untagged (or cmd)
        version: Option<u32>,
        outdated: bool,
        /// Number of blocks (or AutoRun fragments) found; more than one is a
        /// leftover that the next install collapses
        blocks: usize,
        helper: Option<PathBuf>,
        sound: Option<PathBuf>,
    },
}

/// Status of one flavor.
#[derive(Debug, Clone, Serialize)]
pub struct FlavorStatus {
    pub flavor: Flavor,
    /// Profile path, or the registry location for cmd
    pub location: Option<String>,
    /// Why the flavor could not be inspected
    pub unavailable: Option<String>,
    pub installation: Installation,
}

impl FlavorStatus {
    pub fn is_installed(&self) -> bool {
        matches!(self.installation, Installation::Installed { .. })
    }

    pub fn is_outdated(&self) -> bool {
        matches!(
            self.installation,
            Installation::Installed { outdated: true, .. }
        )
    }

    /// Returns a human-readable one-line summary of the status
    pub fn summary(&self) -> String {
        if let Some(ref reason) = self.unavailable {
            return format!("{}: not available ({})", self.flavor, reason);
        }

        let location = self.location.as_deref().unwrap_or("-");
        match &self.installation {
            Installation::NotInstalled => format!("{}: not installed ({})", self.flavor, location),
            Installation::Installed {
                version, outdated, ..
            } => {
                let version = version.map(|v| format!(" v{v}")).unwrap_or_default();
                let state = if *outdated { "outdated" } else { "installed" };
                format!("{}: {}{} in {}", self.flavor, state, version, location)
            }
        }
    }
}

/// Inspect profile text for a PowerShell or Bash flavor.
pub fn inspect_profile(flavor: Flavor, content: &str, current_version: u32) -> Installation {
    let blocks: Vec<&str> = block_pattern()
        .find_iter(content)
        .map(|m| m.as_str())
        .collect();
    let Some(first) = blocks.first() else {
        return Installation::NotInstalled;
    };

    let version = extract_version(first);
    let (helper_var, sound_var) = match flavor.syntax() {
        Syntax::PowerShell => ("$global:CrashCueHelper", "$global:CrashCueSound"),
        _ => ("CRASHCUE_HELPER", "CRASHCUE_SOUND"),
    };

    Installation::Installed {
        version,
        outdated: version != Some(current_version),
        blocks: blocks.len(),
        helper: extract_bound_path(first, helper_var),
        sound: extract_bound_path(first, sound_var),
    }
}

/// Inspect an AutoRun value for the cmd flavor.
pub fn inspect_autorun(value: &str) -> Installation {
    let fragments = split_fragments(value);
    let current = fragments
        .iter()
        .filter(|f| f.contains(CURRENT_SIGNATURE))
        .count();
    let legacy = fragments
        .iter()
        .filter(|f| LEGACY_SIGNATURES.iter().any(|sig| f.contains(sig)))
        .count();

    if current + legacy == 0 {
        return Installation::NotInstalled;
    }
    Installation::Installed {
        version: None,
        outdated: current == 0 || legacy > 0,
        blocks: current + legacy,
        helper: None,
        sound: None,
    }
}

/// Extract a path bound to `var` inside an installed block.
///
/// Only unindented assignment lines between the markers count, so the hook
/// body's references to the variable are never mistaken for the binding.
pub fn extract_bound_path(block: &str, var: &str) -> Option<PathBuf> {
    let prefix = format!("{var} = ");
    let bash_prefix = format!("{var}=");

    let line = block
        .lines()
        .skip_while(|line| !line.contains(MARKER_START))
        .take_while(|line| !line.contains(MARKER_END))
        .find(|line| line.starts_with(&prefix) || line.starts_with(&bash_prefix))?;

    let value = line
        .strip_prefix(&prefix)
        .or_else(|| line.strip_prefix(&bash_prefix))?
        .trim();

    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        return Some(PathBuf::from(inner.replace("''", "'")));
    }
    if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' && matches!(chars.peek(), Some('"' | '$' | '`')) {
                continue;
            }
            out.push(c);
        }
        return Some(PathBuf::from(out));
    }
    None
}
