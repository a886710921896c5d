//! Config subcommands handler

use anyhow::{bail, Result};
use std::path::Path;

use crashcue::assets::expand_home;
use crashcue::config::{ConfigEdit, WORKSPACE_FILE};
use crashcue::theme::Theme;
use crashcue::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let workspace = super::workspace_dir()?;
    let config = Config::load_effective(&workspace)?;
    let theme = Theme::detect();

    println!(
        "{}",
        theme.secondary_text(&format!("# {}", Config::config_path()?.display()))
    );
    let overlay = workspace.join(WORKSPACE_FILE);
    if overlay.is_file() {
        println!(
            "{}",
            theme.secondary_text(&format!("# overlaid by {}", overlay.display()))
        );
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Store a custom sound path after checking it exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_set_sound(path: &str) -> Result<()> {
    let stored = validate_sound_path(path)?;
    Config::update(&ConfigEdit::SetSound(stored.clone()))?;
    println!("Sound set to {}", stored);
    println!("Run `crashcue install` to use it in installed shell hooks.");
    Ok(())
}

/// Print the sound file that would be played.
#[cfg(not(tarpaulin_include))]
pub fn handle_get_sound() -> Result<()> {
    let config = Config::load_effective(&super::workspace_dir()?)?;
    let assets = Config::assets()?;
    let resolved = assets.resolve_sound(config.custom_sound());
    println!("{}", resolved.display());

    if let Some(custom) = config.custom_sound() {
        if resolved == assets.default_sound() {
            let theme = Theme::detect();
            eprintln!(
                "{}",
                theme.warning_text(&format!(
                    "Configured sound {} is missing; using the default.",
                    custom
                ))
            );
        }
    }
    Ok(())
}

/// Overwrite the config file with defaults.
#[cfg(not(tarpaulin_include))]
pub fn handle_reset() -> Result<()> {
    Config::default().save()?;
    println!("Configuration reset to defaults.");
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_ignore_add(command: &[String]) -> Result<()> {
    let line = command.join(" ");
    if Config::update(&ConfigEdit::AddIgnore(line.clone()))? {
        println!("Ignoring: {}", line);
    } else {
        println!("Already ignored: {}", line);
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_ignore_remove(command: &[String]) -> Result<()> {
    let line = command.join(" ");
    if Config::update(&ConfigEdit::RemoveIgnore(line.clone()))? {
        println!("No longer ignoring: {}", line);
    } else {
        println!("Not on the ignore list: {}", line);
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_ignore_list() -> Result<()> {
    let config = Config::load_effective(&super::workspace_dir()?)?;
    if config.run.ignore_commands.is_empty() {
        println!("No ignored commands.");
    }
    for command in &config.run.ignore_commands {
        println!("{}", command);
    }
    Ok(())
}

/// Resolve `path` to the absolute form stored in the config.
pub fn validate_sound_path(path: &str) -> Result<String> {
    let expanded = expand_home(path.trim());
    let absolute = std::path::absolute(&expanded).unwrap_or(expanded);
    if !Path::new(&absolute).is_file() {
        bail!("Sound file not found: {}", absolute.display());
    }
    Ok(absolute.display().to_string())
}
