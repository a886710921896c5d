//! Unit tests for cmd.exe AutoRun handling

use std::path::Path;

use crashcue::shell::autorun::{install_value, payload, uninstall_value};
use crashcue::shell::status::inspect_autorun;
use crashcue::shell::{Installation, PatchAction};

fn current_payload() -> String {
    payload(Path::new(r"C:\Users\dev\.config\crashcue\cmd\crashcue.doskey"))
}

#[test]
fn install_appends_to_foreign_fragments() {
    let (value, action) = install_value("chcp 65001>nul", &current_payload());

    assert_eq!(action, PatchAction::Injected);
    assert_eq!(value, format!("chcp 65001>nul & {}", current_payload()));
}

#[test]
fn install_replaces_legacy_fragment_and_normalizes() {
    let current = r#"chcp 65001>nul &  & doskey /macrofile="C:\old\cmd_macros.doskey""#;

    let (value, action) = install_value(current, &current_payload());

    assert_eq!(action, PatchAction::Updated);
    assert_eq!(value, format!("chcp 65001>nul & {}", current_payload()));
}

#[test]
fn install_twice_leaves_value_alone() {
    let (first, _) = install_value("", &current_payload());
    let (second, action) = install_value(&first, &current_payload());

    assert_eq!(action, PatchAction::Unchanged);
    assert_eq!(first, second);
}

#[test]
fn uninstall_keeps_foreign_fragments() {
    let current = format!("chcp 65001>nul & {} & prompt $P$G", current_payload());

    let (value, action) = uninstall_value(&current);

    assert_eq!(action, PatchAction::Removed);
    assert_eq!(value.as_deref(), Some("chcp 65001>nul & prompt $P$G"));
}

#[test]
fn uninstall_of_only_fragment_deletes_value() {
    let (value, action) = uninstall_value(&current_payload());

    assert_eq!(action, PatchAction::Removed);
    assert_eq!(value, None);
}

#[test]
fn inspect_flags_legacy_values_as_outdated() {
    let legacy = r#"powershell -File "C:\x\native-windows.ps1""#;
    assert!(matches!(
        inspect_autorun(legacy),
        Installation::Installed { outdated: true, blocks: 1, .. }
    ));
    assert!(matches!(
        inspect_autorun(&current_payload()),
        Installation::Installed { outdated: false, .. }
    ));
    assert_eq!(inspect_autorun("chcp 65001>nul"), Installation::NotInstalled);
}

#[test]
fn install_replaces_run_sound_fragment_after_user_command() {
    let current = "npm run build & if errorlevel 1 call crashcue run-sound";

    let (value, action) = install_value(current, &current_payload());

    assert_eq!(action, PatchAction::Updated);
    assert_eq!(value, format!("npm run build & {}", current_payload()));
}
