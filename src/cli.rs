//! CLI definitions for CrashCue
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::shell::Flavor;

/// Build clap styles matching the CLI output colors.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "crashcue")]
#[command(about = "Play a sound whenever a shell command fails")]
#[command(
    long_about = "CrashCue - hear it when a command fails.

Wrap a single command with `crashcue run`, or install the hook into your
shells so every failing command in an interactive session plays the cue.

QUICK START:
    crashcue run -- npm test        Play the cue if the tests fail
    crashcue install                Hook into every available shell
    crashcue status                 Show settings and hook state

SUPPORTED SHELLS:
    powershell   Windows PowerShell profile
    pwsh         PowerShell 7 profile
    bash         ~/.bashrc (including Git Bash)
    cmd          cmd.exe AutoRun (Windows only)"
)]
#[command(version = crate::VERSION)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Enable debug logging (same as CRASHCUE_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a command and play the cue if it fails
    #[command(long_about = "Run a command and play the cue if it exits non-zero.

The exit code of the command is passed through. A command that cannot be
started plays the cue and exits 1. Nothing plays while muted or when the
command line is on the ignore list.

EXAMPLES:
    crashcue run -- cargo test
    crashcue run -- npm run build --watch")]
    Run {
        /// Command and arguments to run
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,
    },

    /// Play the configured sound once
    Test,

    /// Silence the cue for `run` and `test`
    Mute,

    /// Re-enable the cue
    Unmute,

    /// Install the hook into shell profiles
    #[command(long_about = "Install the CrashCue hook into shell startup files.

Without a flavor every supported shell is tried; shells that are not
available are skipped. Running install again is safe: an existing block is
replaced in place, never duplicated. Profiles are backed up before they
change.

EXAMPLES:
    crashcue install              All shells
    crashcue install pwsh         Only PowerShell 7")]
    Install {
        /// Shell to install into (default: all)
        #[arg(value_enum)]
        flavor: Option<Flavor>,
    },

    /// Remove the hook from shell profiles
    #[command(long_about = "Remove the CrashCue hook from shell startup files.

Only the CrashCue block is removed; everything else in the profile is left
as it was. Profiles are backed up before they change.

EXAMPLES:
    crashcue uninstall
    crashcue uninstall bash")]
    Uninstall {
        /// Shell to remove from (default: all)
        #[arg(value_enum)]
        flavor: Option<Flavor>,
    },

    /// Show settings and per-shell hook state
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose the installation
    #[command(long_about = "Check that every piece CrashCue relies on is in place.

Reports interpreter availability, profile locations, whether each hook is
installed and current, and whether the helper scripts and sound exist.
Exits non-zero when a problem is found.

EXAMPLES:
    crashcue doctor
    crashcue doctor --json")]
    Doctor {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Use a custom sound file
    #[command(long_about = "Use a custom sound file for the cue.

The path must point at an existing file. Installed shell hooks keep the
sound they were installed with; run `crashcue install` again to switch
them over.

EXAMPLE:
    crashcue config set-sound ~/sounds/fail.wav")]
    SetSound {
        /// Path to the sound file
        path: String,
    },

    /// Print the sound that will be played
    GetSound,

    /// Restore the default configuration
    Reset,

    /// Manage commands that never play the cue
    #[command(subcommand)]
    Ignore(IgnoreCommands),
}

#[derive(Subcommand)]
pub enum IgnoreCommands {
    /// Add a command line to the ignore list
    Add {
        /// Command line, matched exactly
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Remove a command line from the ignore list
    Remove {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// List ignored command lines
    List,
}
