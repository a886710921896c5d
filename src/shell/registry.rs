//! Per-flavor dispatch for install, uninstall and inspection
//!
//! Each flavor runs locate, backup, render and patch on its own. A failure
//! in one flavor becomes that flavor's outcome; the others still run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::autorun::{
    install_value, payload, render_doskey_macros, uninstall_value, AutoRunStore, RegAutoRunStore,
};
use super::error::ShellError;
use super::flavor::{Flavor, Syntax};
use super::inject::{plan_install, plan_uninstall, read_profile, PatchAction};
use super::locate::{locate, PowerShellProbe, ProfileLocation, ProfileProbe, DEFAULT_PROBE_TIMEOUT};
use super::render::{render, TEMPLATE_VERSION};
use super::status::{inspect_autorun, inspect_profile, FlavorStatus, Installation};
use crate::assets::{AssetPaths, HelperScript};
use crate::files::backup::create_backup;

const CMD_UNAVAILABLE: &str = "cmd.exe integration is only available on Windows";

/// Result of installing or uninstalling one flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlavorOutcome {
    Injected {
        profile: String,
        backup: Option<PathBuf>,
    },
    Updated {
        profile: String,
        backup: Option<PathBuf>,
    },
    Unchanged {
        profile: String,
    },
    Removed {
        profile: String,
        backup: Option<PathBuf>,
    },
    NothingToRemove {
        profile: String,
    },
    Skipped {
        reason: String,
    },
    Failed {
        error: String,
    },
}

impl FlavorOutcome {
    fn from_action(action: PatchAction, profile: String, backup: Option<PathBuf>) -> Self {
        match action {
            PatchAction::Injected => FlavorOutcome::Injected { profile, backup },
            PatchAction::Updated => FlavorOutcome::Updated { profile, backup },
            PatchAction::Unchanged => FlavorOutcome::Unchanged { profile },
            PatchAction::Removed => FlavorOutcome::Removed { profile, backup },
            PatchAction::NothingToRemove => FlavorOutcome::NothingToRemove { profile },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FlavorOutcome::Failed { .. })
    }

    /// Returns a human-readable summary of the outcome
    pub fn summary(&self) -> String {
        let with_backup = |text: String, backup: &Option<PathBuf>| match backup {
            Some(b) => format!("{text} (backup: {})", b.display()),
            None => text,
        };
        match self {
            FlavorOutcome::Injected { profile, backup } => {
                with_backup(format!("installed in {profile}"), backup)
            }
            FlavorOutcome::Updated { profile, backup } => {
                with_backup(format!("updated in {profile}"), backup)
            }
            FlavorOutcome::Unchanged { profile } => format!("already up to date in {profile}"),
            FlavorOutcome::Removed { profile, backup } => {
                with_backup(format!("removed from {profile}"), backup)
            }
            FlavorOutcome::NothingToRemove { profile } => {
                format!("nothing to remove in {profile}")
            }
            FlavorOutcome::Skipped { reason } => format!("skipped ({reason})"),
            FlavorOutcome::Failed { error } => format!("failed: {error}"),
        }
    }
}

/// Outcome for one flavor, as reported to the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct FlavorReport {
    pub flavor: Flavor,
    #[serde(flatten)]
    pub outcome: FlavorOutcome,
}

/// Runs shell integration operations across flavors.
pub struct ShellRegistry {
    home: PathBuf,
    assets: AssetPaths,
    sound: PathBuf,
    template_version: u32,
    probe: Box<dyn ProfileProbe>,
    autorun: Box<dyn AutoRunStore>,
}

impl ShellRegistry {
    /// Registry backed by the real interpreters and registry.
    ///
    /// `sound` is the resolved sound baked into rendered blocks.
    pub fn new(home: impl Into<PathBuf>, assets: AssetPaths, sound: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            assets,
            sound: sound.into(),
            template_version: TEMPLATE_VERSION,
            probe: Box::new(PowerShellProbe::default()),
            autorun: Box::new(RegAutoRunStore::new(DEFAULT_PROBE_TIMEOUT)),
        }
    }

    /// Bound every external query (profile probe and `reg`) by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.probe = Box::new(PowerShellProbe::new(timeout));
        self.autorun = Box::new(RegAutoRunStore::new(timeout));
        self
    }

    pub fn with_probe(mut self, probe: Box<dyn ProfileProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_autorun(mut self, store: Box<dyn AutoRunStore>) -> Self {
        self.autorun = store;
        self
    }

    pub fn with_template_version(mut self, version: u32) -> Self {
        self.template_version = version;
        self
    }

    pub fn template_version(&self) -> u32 {
        self.template_version
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    /// Install into every flavor in `flavors`.
    ///
    /// Helper files are written once up front; if that fails every flavor
    /// fails with the same error since no block could work without them.
    pub fn install(&mut self, flavors: &[Flavor]) -> Vec<FlavorReport> {
        if let Err(e) = self.assets.install() {
            let error = ShellError::Assets(e).to_string();
            warn!(%error, "helper installation failed");
            return flavors
                .iter()
                .map(|&flavor| FlavorReport {
                    flavor,
                    outcome: FlavorOutcome::Failed {
                        error: error.clone(),
                    },
                })
                .collect();
        }

        flavors
            .iter()
            .map(|&flavor| FlavorReport {
                flavor,
                outcome: self.run(flavor, Self::install_one),
            })
            .collect()
    }

    /// Remove from every flavor in `flavors`.
    pub fn uninstall(&mut self, flavors: &[Flavor]) -> Vec<FlavorReport> {
        flavors
            .iter()
            .map(|&flavor| FlavorReport {
                flavor,
                outcome: self.run(flavor, Self::uninstall_one),
            })
            .collect()
    }

    /// Inspect every flavor in `flavors` without changing anything.
    pub fn inspect(&self, flavors: &[Flavor]) -> Vec<FlavorStatus> {
        flavors.iter().map(|&flavor| self.inspect_one(flavor)).collect()
    }

    fn run(
        &mut self,
        flavor: Flavor,
        op: fn(&mut Self, Flavor) -> Result<FlavorOutcome, ShellError>,
    ) -> FlavorOutcome {
        match op(self, flavor) {
            Ok(outcome) => outcome,
            Err(ShellError::Unavailable { reason, .. }) => {
                debug!(%flavor, %reason, "flavor skipped");
                FlavorOutcome::Skipped { reason }
            }
            Err(e) => {
                warn!(%flavor, error = %e, "shell integration failed");
                FlavorOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    fn profile_path(&self, flavor: Flavor) -> Result<PathBuf, ShellError> {
        match locate(flavor, &self.home, self.probe.as_ref())? {
            ProfileLocation::File(path) => Ok(path),
            ProfileLocation::AutoRun => Err(ShellError::NoBlock(flavor)),
        }
    }

    fn install_one(&mut self, flavor: Flavor) -> Result<FlavorOutcome, ShellError> {
        if flavor.syntax() == Syntax::AutoRun {
            return self.install_autorun();
        }

        let path = self.profile_path(flavor)?;
        let helper = self.assets.helper(flavor.helper());
        let block = render(flavor, &helper, &self.sound, self.template_version)?;
        let patch = plan_install(&path, &block)?;

        let backup = backup_before_write(&path, patch.has_changes());
        patch.apply()?;
        Ok(FlavorOutcome::from_action(
            patch.action,
            path.display().to_string(),
            backup,
        ))
    }

    fn uninstall_one(&mut self, flavor: Flavor) -> Result<FlavorOutcome, ShellError> {
        if flavor.syntax() == Syntax::AutoRun {
            return self.uninstall_autorun();
        }

        let path = self.profile_path(flavor)?;
        let patch = plan_uninstall(&path)?;

        let backup = backup_before_write(&path, patch.has_changes());
        patch.apply()?;
        Ok(FlavorOutcome::from_action(
            patch.action,
            path.display().to_string(),
            backup,
        ))
    }

    fn install_autorun(&mut self) -> Result<FlavorOutcome, ShellError> {
        if !self.autorun.is_available() {
            return Err(ShellError::Unavailable {
                flavor: Flavor::Cmd,
                reason: CMD_UNAVAILABLE.to_string(),
            });
        }

        let macro_file = self.assets.doskey_macros();
        let macros = render_doskey_macros(&self.assets.helper(HelperScript::PowerShell), &self.sound);
        write_macro_file(&macro_file, &macros)?;

        let current = self.autorun.read()?.unwrap_or_default();
        let (value, action) = install_value(&current, &payload(&macro_file));
        if action != PatchAction::Unchanged {
            self.autorun.write(&value)?;
        }
        Ok(FlavorOutcome::from_action(
            action,
            ProfileLocation::AutoRun.to_string(),
            None,
        ))
    }

    fn uninstall_autorun(&mut self) -> Result<FlavorOutcome, ShellError> {
        if !self.autorun.is_available() {
            return Err(ShellError::Unavailable {
                flavor: Flavor::Cmd,
                reason: CMD_UNAVAILABLE.to_string(),
            });
        }

        let current = self.autorun.read()?.unwrap_or_default();
        let (value, action) = uninstall_value(&current);
        match (&value, action) {
            (_, PatchAction::NothingToRemove) => {}
            (None, _) => self.autorun.delete()?,
            (Some(value), _) => self.autorun.write(value)?,
        }

        let macro_file = self.assets.doskey_macros();
        if macro_file.exists() {
            if let Err(e) = fs::remove_file(&macro_file) {
                debug!(path = %macro_file.display(), error = %e, "could not remove doskey macros");
            }
        }

        Ok(FlavorOutcome::from_action(
            action,
            ProfileLocation::AutoRun.to_string(),
            None,
        ))
    }

    fn inspect_one(&self, flavor: Flavor) -> FlavorStatus {
        let unavailable = |reason: String, location: Option<String>| FlavorStatus {
            flavor,
            location,
            unavailable: Some(reason),
            installation: Installation::NotInstalled,
        };

        if flavor.syntax() == Syntax::AutoRun {
            let location = Some(ProfileLocation::AutoRun.to_string());
            if !self.autorun.is_available() {
                return unavailable(CMD_UNAVAILABLE.to_string(), location);
            }
            return match self.autorun.read() {
                Ok(value) => FlavorStatus {
                    flavor,
                    location,
                    unavailable: None,
                    installation: inspect_autorun(&value.unwrap_or_default()),
                },
                Err(e) => unavailable(e.to_string(), location),
            };
        }

        let path = match self.profile_path(flavor) {
            Ok(path) => path,
            Err(ShellError::Unavailable { reason, .. }) => return unavailable(reason, None),
            Err(e) => return unavailable(e.to_string(), None),
        };
        let location = Some(path.display().to_string());

        match read_profile(&path) {
            Ok((_, content)) => FlavorStatus {
                flavor,
                location,
                unavailable: None,
                installation: inspect_profile(flavor, &content, self.template_version),
            },
            Err(e) => unavailable(e.to_string(), location),
        }
    }
}

/// Back up `path` when a write is about to change it.
///
/// A failed backup is logged by the backup helper and the write goes ahead.
fn backup_before_write(path: &Path, changes: bool) -> Option<PathBuf> {
    if !changes {
        return None;
    }
    create_backup(path).path().map(Path::to_path_buf)
}

fn write_macro_file(path: &Path, content: &str) -> Result<(), ShellError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ShellError::write(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ShellError::write(path, e))
}
