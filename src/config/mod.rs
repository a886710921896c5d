//! Configuration management for CrashCue

mod edit;
mod io;
mod types;

pub use edit::{apply_edit, ConfigEdit};
pub use io::{CONFIG_DIR_ENV, WORKSPACE_FILE};
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::assets::AssetPaths;

impl Config {
    /// Get the config file path (~/.config/crashcue/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/crashcue)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load the user configuration, or defaults if there is no file
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load the user configuration with the overlay from `workspace` applied
    pub fn load_effective(workspace: &Path) -> Result<Self> {
        let config = Self::load()?;
        Ok(match io::load_overlay(workspace)? {
            Some(overlay) => config.merge(overlay),
            None => config,
        })
    }

    /// Overwrite the config file with this configuration
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Apply `edit` to the config file in place
    ///
    /// Returns whether the file changed.
    pub fn update(edit: &ConfigEdit) -> Result<bool> {
        let path = io::config_path()?;
        let content = io::read_raw(&path)?;
        let (updated, changed) = apply_edit(&content, edit)?;
        if changed {
            io::write_atomic(&path, &updated)?;
        }
        Ok(changed)
    }

    /// Helper and sound locations under the config directory
    pub fn assets() -> Result<AssetPaths> {
        Ok(AssetPaths::new(io::config_dir()?))
    }
}
