//! Unit tests for block rendering and injection on realistic profiles

use std::path::Path;

use crashcue::shell::markers::start_marker_count;
use crashcue::shell::render::extract_version;
use crashcue::shell::status::inspect_profile;
use crashcue::shell::{
    apply_install, apply_uninstall, render, Flavor, Installation, PatchAction, TEMPLATE_VERSION,
};

use super::helpers::load_fixture;

fn powershell_block() -> String {
    render(
        Flavor::Pwsh,
        Path::new(r"C:\Users\dev\.config\crashcue\play-sound.ps1"),
        Path::new(r"C:\Users\dev\.config\crashcue\sounds\crashcue.wav"),
        TEMPLATE_VERSION,
    )
    .unwrap()
    .text()
    .to_string()
}

fn bash_block() -> String {
    render(
        Flavor::Bash,
        Path::new("/home/dev/.config/crashcue/play-sound.sh"),
        Path::new("/home/dev/.config/crashcue/sounds/crashcue.wav"),
        TEMPLATE_VERSION,
    )
    .unwrap()
    .text()
    .to_string()
}

#[test]
fn install_into_user_bashrc_keeps_user_lines() {
    let original = load_fixture("bashrc_user.sh");
    let block = bash_block();

    let (installed, action) = apply_install(&original, &block);

    assert_eq!(action, PatchAction::Injected);
    assert!(installed.starts_with(&original));
    assert!(installed.ends_with(&format!("{block}\n")));
    assert_eq!(start_marker_count(&installed), 1);
}

#[test]
fn reinstall_is_byte_identical() {
    let original = load_fixture("bashrc_user.sh");
    let block = bash_block();

    let (first, _) = apply_install(&original, &block);
    let (second, action) = apply_install(&first, &block);

    assert_eq!(action, PatchAction::Unchanged);
    assert_eq!(first, second);
}

#[test]
fn uninstall_after_install_restores_user_content() {
    let original = load_fixture("bashrc_user.sh");
    let (installed, _) = apply_install(&original, &bash_block());

    let (removed, action) = apply_uninstall(&installed);

    assert_eq!(action, PatchAction::Removed);
    assert_eq!(removed, original);
}

#[test]
fn legacy_block_is_upgraded_in_place() {
    let original = load_fixture("profile_legacy.ps1");
    assert_eq!(
        inspect_profile(Flavor::Pwsh, &original, TEMPLATE_VERSION),
        Installation::Installed {
            version: Some(1),
            outdated: true,
            blocks: 1,
            helper: Some(r"C:\Users\dev\.config\crashcue\play-sound.ps1".into()),
            sound: None,
        }
    );

    let block = powershell_block();
    let (upgraded, action) = apply_install(&original, &block);

    assert_eq!(action, PatchAction::Updated);
    assert_eq!(start_marker_count(&upgraded), 1);
    assert_eq!(extract_version(&upgraded), Some(TEMPLATE_VERSION));
    // Surrounding lines keep their position around the block.
    let before = upgraded.find("$env:EDITOR").unwrap();
    let marker = upgraded.find("# <crashcue-start>").unwrap();
    let after = upgraded.find("Import-Module posh-git").unwrap();
    assert!(before < marker && marker < after);
}

#[test]
fn powershell_text_with_dollar_signs_is_written_verbatim() {
    let block = powershell_block();
    let (installed, _) = apply_install(&load_fixture("profile_legacy.ps1"), &block);

    assert!(installed.contains(&block));
    assert!(installed.contains("$global:CrashCueLastErrorCount = $Error.Count"));
    assert!(installed.contains("$($executionContext.SessionState.Path.CurrentLocation)"));
}

#[test]
fn duplicate_blocks_collapse_into_one() {
    let original = load_fixture("profile_duplicates.ps1");
    assert_eq!(start_marker_count(&original), 2);

    let (installed, action) = apply_install(&original, &powershell_block());

    assert_eq!(action, PatchAction::Updated);
    assert_eq!(start_marker_count(&installed), 1);
    assert!(installed.contains("Write-Host \"between\""));
    assert!(!installed.contains(r"C:\older"));
}

#[test]
fn uninstall_removes_every_block() {
    let (removed, action) = apply_uninstall(&load_fixture("profile_duplicates.ps1"));

    assert_eq!(action, PatchAction::Removed);
    assert_eq!(removed, "Write-Host \"between\"\n");
}

#[test]
fn uninstall_on_profile_without_block_is_noop() {
    let original = load_fixture("bashrc_user.sh");
    let (removed, action) = apply_uninstall(&original);

    assert_eq!(action, PatchAction::NothingToRemove);
    assert_eq!(removed, original);
}

#[test]
fn constant_patterns_build() {
    use crashcue::shell::autorun::parse_reg_query;
    use crashcue::shell::markers::{block_pattern, removal_pattern};

    assert!(!block_pattern().is_match(""));
    assert!(!removal_pattern().is_match(""));
    assert_eq!(extract_version(""), None);
    assert_eq!(parse_reg_query(""), None);
}
