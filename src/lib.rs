//! CrashCue Library
//!
//! Plays an audible cue when a shell command fails, either by wrapping the
//! command or through hooks injected into shell startup files.

pub mod assets;
pub mod cli;
pub mod config;
pub mod files;
pub mod shell;
pub mod sound;
pub mod theme;
pub mod utils;

pub use assets::AssetPaths;
pub use config::Config;
pub use shell::{Flavor, FlavorOutcome, ShellRegistry};
pub use sound::Player;

/// Version string shown by `--version`
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string shown by `--version`, tagged with the git commit
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");
