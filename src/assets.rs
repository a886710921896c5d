//! Bundled helper scripts and the default sound
//!
//! Everything here is embedded at compile time and written under the
//! CrashCue config directory, so the shell blocks can point at stable
//! absolute paths.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// PowerShell playback helper (PowerShell flavors and cmd macros)
pub const PLAY_SOUND_PS1: &str = include_str!("../assets/play-sound.ps1");

/// POSIX sh playback helper (Bash flavor)
pub const PLAY_SOUND_SH: &str = include_str!("../assets/play-sound.sh");

/// Default crash sound
pub const DEFAULT_SOUND: &[u8] = include_bytes!("../assets/crashcue.wav");

const DEFAULT_SOUND_FILE: &str = "crashcue.wav";
const DOSKEY_MACRO_FILE: &str = "crashcue.doskey";

/// Which playback helper a shell invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperScript {
    PowerShell,
    Posix,
}

impl HelperScript {
    pub fn file_name(&self) -> &'static str {
        match self {
            HelperScript::PowerShell => "play-sound.ps1",
            HelperScript::Posix => "play-sound.sh",
        }
    }

    pub fn content(&self) -> &'static str {
        match self {
            HelperScript::PowerShell => PLAY_SOUND_PS1,
            HelperScript::Posix => PLAY_SOUND_SH,
        }
    }

    /// The helper this platform uses for direct playback (`crashcue test`, `run`).
    pub fn native() -> Self {
        if cfg!(windows) {
            HelperScript::PowerShell
        } else {
            HelperScript::Posix
        }
    }
}

/// Locations of CrashCue-owned files under the config directory.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<config>/helpers/<script>`
    pub fn helper(&self, script: HelperScript) -> PathBuf {
        self.root.join("helpers").join(script.file_name())
    }

    /// `<config>/sounds/crashcue.wav`
    pub fn default_sound(&self) -> PathBuf {
        self.root.join("sounds").join(DEFAULT_SOUND_FILE)
    }

    /// `<config>/cmd/crashcue.doskey`
    pub fn doskey_macros(&self) -> PathBuf {
        self.root.join("cmd").join(DOSKEY_MACRO_FILE)
    }

    /// Write both helpers and the default sound.
    ///
    /// Helpers are always rewritten so an upgrade ships the new scripts.
    /// The sound is only written when missing.
    pub fn install(&self) -> io::Result<()> {
        for script in [HelperScript::PowerShell, HelperScript::Posix] {
            write_file(&self.helper(script), script.content().as_bytes())?;
        }

        let sound = self.default_sound();
        if !sound.exists() {
            write_file(&sound, DEFAULT_SOUND)?;
        }
        Ok(())
    }

    /// Install assets only when something is missing.
    pub fn ensure_installed(&self) -> io::Result<()> {
        let complete = self.helper(HelperScript::PowerShell).exists()
            && self.helper(HelperScript::Posix).exists()
            && self.default_sound().exists();
        if complete {
            return Ok(());
        }
        self.install()
    }

    /// Resolve the sound to play.
    ///
    /// A custom path wins only if it points at an existing file; anything
    /// else (unset, empty, missing, a directory) falls back to the default.
    pub fn resolve_sound(&self, custom: Option<&str>) -> PathBuf {
        let Some(custom) = custom.map(str::trim).filter(|c| !c.is_empty()) else {
            return self.default_sound();
        };

        let candidate = absolute(&expand_home(custom));
        if candidate.is_file() {
            candidate
        } else {
            debug!(path = %candidate.display(), "custom sound not usable, using default");
            self.default_sound()
        }
    }
}

fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if path.extension().is_some_and(|ext| ext == "sh") {
            fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
        }
    }

    Ok(())
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
