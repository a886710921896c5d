//! Run command handler

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::{debug, warn};

use crashcue::utils::ProcessGuard;
use crashcue::{Config, Player};

/// Run `command`, play the cue on failure and return the exit code to use.
#[cfg(not(tarpaulin_include))]
pub fn handle(command: &[String]) -> Result<i32> {
    let config = load_config();
    let (program, args) = command.split_first().context("No command given")?;
    let command_line = command.join(" ");

    let guard = ProcessGuard::new();
    guard.register_signal_handlers();

    let spawned = Command::new(resolve_program(program)).args(args).spawn();
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            eprintln!("crashcue: failed to start {}: {}", program, e);
            cue(&config, &command_line)?;
            return Ok(1);
        }
    };

    let exit = guard
        .wait(&mut child)
        .with_context(|| format!("Failed to wait for {}", program))?;
    let code = exit_code(exit.status);
    debug!(code, interrupted = exit.interrupted, "command finished");

    if code != 0 && !exit.interrupted {
        cue(&config, &command_line)?;
    }
    Ok(code)
}

/// Effective config, or defaults when it cannot be read.
///
/// A broken config file must never keep the wrapped command from running.
fn load_config() -> Config {
    let loaded = super::workspace_dir().and_then(|dir| Config::load_effective(&dir));
    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "ignoring unreadable config, using defaults");
            Config::default()
        }
    }
}

/// Look the program up on PATH so Windows `.cmd`/`.bat` shims resolve too.
fn resolve_program(program: &str) -> PathBuf {
    which::which(program).unwrap_or_else(|_| PathBuf::from(program))
}

/// Exit code to forward; a child killed by a signal counts as 1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// Whether a failed `command_line` should play the cue.
pub fn should_play(config: &Config, command_line: &str) -> bool {
    !config.sound.muted && !config.is_ignored(command_line)
}

fn cue(config: &Config, command_line: &str) -> Result<()> {
    if !should_play(config, command_line) {
        debug!(command_line, "cue suppressed");
        return Ok(());
    }
    let assets = Config::assets()?;
    let sound = assets.resolve_sound(config.custom_sound());
    if let Err(e) = Player::new(assets).play(&sound) {
        warn!(error = %e, "could not play cue");
    }
    Ok(())
}
