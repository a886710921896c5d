//! Configuration I/O operations

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Config, ConfigOverlay};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "CRASHCUE_CONFIG_DIR";

/// Workspace overlay file name, looked up in the current directory
pub const WORKSPACE_FILE: &str = ".crashcue.toml";

/// Get the config directory path (~/.config/crashcue)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("crashcue"))
}

/// Get the config file path (~/.config/crashcue/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from `path`, or return defaults if not found
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Load the overlay in `dir`, if there is one
pub fn load_overlay(dir: &Path) -> Result<Option<ConfigOverlay>> {
    let path = dir.join(WORKSPACE_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read workspace config: {:?}", path))?;
    let overlay = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse workspace config: {:?}", path))?;
    Ok(Some(overlay))
}

/// Save configuration to `path`
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    write_atomic(path, &contents)
}

/// Read the raw config text; a missing file reads as empty
pub fn read_raw(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read config file: {:?}", path))
}

/// Write `contents` to `path` via a temp file and rename
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let temp_path = path.with_extension("toml.tmp");
    fs::write(&temp_path, contents)
        .with_context(|| format!("Failed to write config file: {:?}", temp_path))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to write config file: {:?}", path));
    }
    Ok(())
}
