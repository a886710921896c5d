//! Command handlers for the CrashCue CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod doctor;
pub mod install;
pub mod run;
pub mod sound;
pub mod status;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crashcue::shell::{FlavorOutcome, FlavorReport};
use crashcue::theme::Theme;
use crashcue::{Config, ShellRegistry};

/// Directory whose `.crashcue.toml` overlays the user config.
pub fn workspace_dir() -> Result<PathBuf> {
    env::current_dir().context("Could not determine current directory")
}

/// Shell registry wired to the user's home, config directory and sound.
pub fn shell_registry(config: &Config) -> Result<ShellRegistry> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let assets = Config::assets()?;
    let sound = assets.resolve_sound(config.custom_sound());
    Ok(ShellRegistry::new(home, assets, sound).with_timeout(config.probe_timeout()))
}

/// Format one report line: `<flavor>: <outcome>`.
pub fn format_report(report: &FlavorReport, theme: &Theme) -> String {
    let summary = report.outcome.summary();
    let colored = match report.outcome {
        FlavorOutcome::Injected { .. }
        | FlavorOutcome::Updated { .. }
        | FlavorOutcome::Removed { .. } => theme.success_text(&summary),
        FlavorOutcome::Unchanged { .. } | FlavorOutcome::NothingToRemove { .. } => {
            theme.primary_text(&summary)
        }
        FlavorOutcome::Skipped { .. } => theme.secondary_text(&summary),
        FlavorOutcome::Failed { .. } => theme.error_text(&summary),
    };
    format!("{}: {}", report.flavor, colored)
}
