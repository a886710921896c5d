//! Shell integration management for CrashCue
//!
//! Installs and removes a marker-delimited hook block in PowerShell
//! profiles and `~/.bashrc`, and a doskey payload in cmd.exe's AutoRun
//! value, so failing commands in interactive shells play the cue.

pub mod autorun;
pub mod error;
pub mod flavor;
pub mod inject;
pub mod locate;
pub mod markers;
pub mod registry;
pub mod render;
pub mod status;

pub use error::ShellError;
pub use flavor::Flavor;
pub use inject::{apply_install, apply_uninstall, BlockState, PatchAction, ProfilePatch};
pub use locate::{PowerShellProbe, ProfileLocation, ProfileProbe, DEFAULT_PROBE_TIMEOUT};
pub use markers::{MARKER_END, MARKER_START};
pub use registry::{FlavorOutcome, FlavorReport, ShellRegistry};
pub use render::{render, InjectionBlock, TEMPLATE_VERSION};
pub use status::{FlavorStatus, Installation};
