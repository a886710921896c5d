//! Test, mute and unmute handlers

use anyhow::{Context, Result};

use crashcue::config::ConfigEdit;
use crashcue::theme::Theme;
use crashcue::{Config, Player};

/// Play the configured sound once.
#[cfg(not(tarpaulin_include))]
pub fn handle_test() -> Result<()> {
    let config = Config::load_effective(&super::workspace_dir()?)?;
    let theme = Theme::detect();

    if config.sound.muted {
        println!(
            "{}",
            theme.warning_text("CrashCue is muted. Run `crashcue unmute` to hear the cue.")
        );
        return Ok(());
    }

    let assets = Config::assets()?;
    let sound = assets.resolve_sound(config.custom_sound());
    println!("Playing {}", sound.display());
    Player::new(assets)
        .play(&sound)
        .context("Failed to play sound")?;
    Ok(())
}

/// Set or clear the mute flag.
#[cfg(not(tarpaulin_include))]
pub fn handle_mute(muted: bool) -> Result<()> {
    let changed = Config::update(&ConfigEdit::SetMuted(muted))?;
    let state = if muted { "muted" } else { "unmuted" };
    if changed {
        println!("CrashCue {}.", state);
    } else {
        println!("CrashCue is already {}.", state);
    }
    Ok(())
}
