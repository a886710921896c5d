//! Supported shell flavors

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::assets::HelperScript;

/// A shell integration target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Windows PowerShell 5.x (`powershell`)
    #[value(name = "powershell")]
    PowerShell,
    /// PowerShell 7+ (`pwsh`)
    Pwsh,
    /// Bash, including Git Bash on Windows
    Bash,
    /// cmd.exe via the per-user AutoRun registry value
    Cmd,
}

/// How a flavor's block is written into its profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    PowerShell,
    Bash,
    AutoRun,
}

impl Flavor {
    /// Every flavor, in the order install/uninstall walk them.
    pub const ALL: [Flavor; 4] = [Flavor::PowerShell, Flavor::Pwsh, Flavor::Bash, Flavor::Cmd];

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Flavor::PowerShell => "powershell",
            Flavor::Pwsh => "pwsh",
            Flavor::Bash => "bash",
            Flavor::Cmd => "cmd",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Flavor::PowerShell => "Windows PowerShell",
            Flavor::Pwsh => "PowerShell 7",
            Flavor::Bash => "Bash",
            Flavor::Cmd => "cmd.exe",
        }
    }

    pub fn syntax(&self) -> Syntax {
        match self {
            Flavor::PowerShell | Flavor::Pwsh => Syntax::PowerShell,
            Flavor::Bash => Syntax::Bash,
            Flavor::Cmd => Syntax::AutoRun,
        }
    }

    /// Interpreter asked for its own profile path.
    pub fn powershell_exe(&self) -> Option<&'static str> {
        match self {
            Flavor::PowerShell => Some("powershell"),
            Flavor::Pwsh => Some("pwsh"),
            Flavor::Bash | Flavor::Cmd => None,
        }
    }

    /// Playback helper the rendered shell code invokes.
    pub fn helper(&self) -> HelperScript {
        match self.syntax() {
            Syntax::Bash => HelperScript::Posix,
            Syntax::PowerShell | Syntax::AutoRun => HelperScript::PowerShell,
        }
    }

    /// Resolve `None` (no flavor given on the command line) to all flavors.
    pub fn selected(flavor: Option<Flavor>) -> Vec<Flavor> {
        match flavor {
            Some(flavor) => vec![flavor],
            None => Flavor::ALL.to_vec(),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
