//! Test helper utilities

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crashcue::shell::autorun::AutoRunStore;
use crashcue::shell::{ProfileProbe, ShellError};
use crashcue::{AssetPaths, ShellRegistry};
use tempfile::TempDir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Probe that reports `<home>/Documents/<exe>/profile.ps1` for every interpreter.
pub struct HomeProbe {
    pub home: PathBuf,
}

impl ProfileProbe for HomeProbe {
    fn query(&self, exe: &str) -> Result<PathBuf, String> {
        Ok(self.home.join("Documents").join(exe).join("profile.ps1"))
    }
}

/// Probe for a machine without PowerShell.
pub struct MissingProbe;

impl ProfileProbe for MissingProbe {
    fn query(&self, exe: &str) -> Result<PathBuf, String> {
        Err(format!("{exe} not found on PATH"))
    }
}

/// AutoRun store whose value stays observable after the registry takes it.
#[derive(Clone, Default)]
pub struct SharedAutoRun {
    pub value: Rc<RefCell<Option<String>>>,
    pub deleted: Rc<RefCell<bool>>,
}

impl SharedAutoRun {
    pub fn with_value(value: &str) -> Self {
        let store = Self::default();
        *store.value.borrow_mut() = Some(value.to_string());
        store
    }

    pub fn get(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl AutoRunStore for SharedAutoRun {
    fn is_available(&self) -> bool {
        true
    }

    fn read(&self) -> Result<Option<String>, ShellError> {
        Ok(self.value.borrow().clone())
    }

    fn write(&mut self, value: &str) -> Result<(), ShellError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ShellError> {
        *self.value.borrow_mut() = None;
        *self.deleted.borrow_mut() = true;
        Ok(())
    }
}

/// A fake home and config directory for registry tests.
pub struct TestHome {
    pub temp: TempDir,
    pub autorun: SharedAutoRun,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
            autorun: SharedAutoRun::default(),
        }
    }

    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join(".config").join("crashcue")
    }

    pub fn bashrc(&self) -> PathBuf {
        self.home().join(".bashrc")
    }

    pub fn pwsh_profile(&self) -> PathBuf {
        self.home().join("Documents").join("pwsh").join("profile.ps1")
    }

    /// Registry wired to this home, the probe above and the shared AutoRun.
    pub fn registry(&self) -> ShellRegistry {
        let assets = AssetPaths::new(self.config_dir());
        let sound = assets.default_sound();
        ShellRegistry::new(self.home(), assets, sound)
            .with_probe(Box::new(HomeProbe {
                home: self.home().to_path_buf(),
            }))
            .with_autorun(Box::new(self.autorun.clone()))
    }

    /// Backup files created next to `profile`.
    pub fn backups_of(&self, profile: &Path) -> Vec<PathBuf> {
        let name = profile.file_name().unwrap().to_string_lossy().to_string();
        let dir = profile.parent().unwrap();
        let mut found: Vec<PathBuf> = fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| {
                        let file = p.file_name().unwrap().to_string_lossy();
                        file.starts_with(&format!("{name}.crashcue-")) && file.ends_with(".bak")
                    })
                    .collect()
            })
            .unwrap_or_default();
        found.sort();
        found
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}
