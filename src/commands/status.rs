//! Status command handler

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crashcue::shell::FlavorStatus;
use crashcue::theme::Theme;
use crashcue::{Config, Flavor};

/// Settings plus per-flavor hook state.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub config_path: PathBuf,
    pub muted: bool,
    pub sound: PathBuf,
    pub custom_sound: Option<String>,
    pub ignore_commands: Vec<String>,
    pub shells: Vec<FlavorStatus>,
}

/// Show settings and shell integration status.
#[cfg(not(tarpaulin_include))]
pub fn handle(json: bool) -> Result<()> {
    let config = Config::load_effective(&super::workspace_dir()?)?;
    let registry = super::shell_registry(&config)?;
    let assets = Config::assets()?;

    let report = StatusReport {
        config_path: Config::config_path()?,
        muted: config.sound.muted,
        sound: assets.resolve_sound(config.custom_sound()),
        custom_sound: config.custom_sound().map(str::to_string),
        ignore_commands: config.run.ignore_commands.clone(),
        shells: registry.inspect(&Flavor::ALL),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render(&report, &Theme::detect()));
    }
    Ok(())
}

/// Human-readable status text.
pub fn render(report: &StatusReport, theme: &Theme) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Config: {}", report.config_path.display()));
    lines.push(format!(
        "Sound: {}",
        if report.muted {
            theme.warning_text("muted")
        } else {
            theme.success_text("on")
        }
    ));
    lines.push(format!("Sound file: {}", report.sound.display()));
    if !report.ignore_commands.is_empty() {
        lines.push(format!("Ignored: {}", report.ignore_commands.join(", ")));
    }

    lines.push(String::new());
    lines.push("Shells:".to_string());
    for status in &report.shells {
        let summary = status.summary();
        let line = if status.unavailable.is_some() {
            theme.secondary_text(&summary)
        } else if status.is_outdated() {
            theme.warning_text(&summary)
        } else if status.is_installed() {
            theme.success_text(&summary)
        } else {
            theme.primary_text(&summary)
        };
        lines.push(format!("  {}", line));
    }

    lines.join("\n")
}
