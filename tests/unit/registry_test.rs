//! Unit tests for multi-flavor install, uninstall and inspection

use std::fs;

use crashcue::shell::markers::start_marker_count;
use crashcue::shell::{Flavor, FlavorOutcome, Installation, TEMPLATE_VERSION};

use super::helpers::{load_fixture, MissingProbe, SharedAutoRun, TestHome};

#[test]
fn install_all_writes_helpers_and_every_flavor() {
    let home = TestHome::new();
    let mut registry = home.registry();

    let reports = registry.install(&Flavor::ALL);

    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| matches!(r.outcome, FlavorOutcome::Injected { .. })));
    assert!(home.config_dir().join("helpers").join("play-sound.ps1").is_file());
    assert!(home.config_dir().join("helpers").join("play-sound.sh").is_file());
    assert_eq!(start_marker_count(&fs::read_to_string(home.bashrc()).unwrap()), 1);
    assert_eq!(start_marker_count(&fs::read_to_string(home.pwsh_profile()).unwrap()), 1);
    assert!(home.autorun.get().unwrap().contains("crashcue.doskey"));
    assert!(home.config_dir().join("cmd").join("crashcue.doskey").is_file());
}

#[test]
fn second_install_reports_unchanged_and_takes_no_backup() {
    let home = TestHome::new();
    fs::write(home.bashrc(), load_fixture("bashrc_user.sh")).unwrap();
    let mut registry = home.registry();

    registry.install(&[Flavor::Bash]);
    let first = fs::read_to_string(home.bashrc()).unwrap();
    let backups = home.backups_of(&home.bashrc());
    let reports = registry.install(&[Flavor::Bash]);

    assert!(matches!(reports[0].outcome, FlavorOutcome::Unchanged { .. }));
    assert_eq!(fs::read_to_string(home.bashrc()).unwrap(), first);
    assert_eq!(home.backups_of(&home.bashrc()), backups);
}

#[test]
fn install_backs_up_existing_profile() {
    let home = TestHome::new();
    let original = load_fixture("bashrc_user.sh");
    fs::write(home.bashrc(), &original).unwrap();

    let reports = home.registry().install(&[Flavor::Bash]);

    let FlavorOutcome::Injected { backup: Some(ref backup), .. } = reports[0].outcome else {
        panic!("expected an injected outcome with a backup: {:?}", reports[0].outcome);
    };
    assert_eq!(fs::read_to_string(backup).unwrap(), original);
}

#[test]
fn missing_profile_directory_is_created() {
    let home = TestHome::new();
    assert!(!home.pwsh_profile().parent().unwrap().exists());

    let reports = home.registry().install(&[Flavor::Pwsh]);

    assert!(matches!(
        reports[0].outcome,
        FlavorOutcome::Injected { backup: None, .. }
    ));
    assert!(home.pwsh_profile().is_file());
}

#[test]
fn unavailable_powershell_is_skipped_while_bash_installs() {
    let home = TestHome::new();
    let mut registry = home.registry().with_probe(Box::new(MissingProbe));

    let reports = registry.install(&[Flavor::PowerShell, Flavor::Bash]);

    assert!(matches!(reports[0].outcome, FlavorOutcome::Skipped { .. }));
    assert!(matches!(reports[1].outcome, FlavorOutcome::Injected { .. }));
    assert!(reports.iter().all(|r| !r.outcome.is_failure()));
}

#[test]
fn outdated_install_is_reported_then_upgraded() {
    let home = TestHome::new();
    home.registry()
        .with_template_version(TEMPLATE_VERSION - 1)
        .install(&[Flavor::Bash]);

    let registry = home.registry();
    let before = registry.inspect(&[Flavor::Bash]);
    assert!(before[0].is_outdated());

    let mut registry = registry;
    let reports = registry.install(&[Flavor::Bash]);
    assert!(matches!(reports[0].outcome, FlavorOutcome::Updated { .. }));

    let after = registry.inspect(&[Flavor::Bash]);
    assert!(matches!(
        after[0].installation,
        Installation::Installed { version: Some(v), outdated: false, blocks: 1, .. } if v == TEMPLATE_VERSION
    ));
}

#[test]
fn uninstall_restores_profiles_and_autorun() {
    let home = TestHome {
        autorun: SharedAutoRun::with_value("chcp 65001>nul"),
        ..TestHome::new()
    };
    let original = load_fixture("bashrc_user.sh");
    fs::write(home.bashrc(), &original).unwrap();
    let mut registry = home.registry();

    registry.install(&[Flavor::Bash, Flavor::Cmd]);
    let reports = registry.uninstall(&[Flavor::Bash, Flavor::Cmd]);

    assert!(reports.iter().all(|r| matches!(r.outcome, FlavorOutcome::Removed { .. })));
    assert_eq!(fs::read_to_string(home.bashrc()).unwrap(), original);
    assert_eq!(home.autorun.get().as_deref(), Some("chcp 65001>nul"));
    assert!(!*home.autorun.deleted.borrow());
    assert!(!home.config_dir().join("cmd").join("crashcue.doskey").exists());
}

#[test]
fn uninstall_without_install_changes_nothing() {
    let home = TestHome::new();
    let reports = home.registry().uninstall(&[Flavor::Bash, Flavor::Cmd]);

    assert!(reports
        .iter()
        .all(|r| matches!(r.outcome, FlavorOutcome::NothingToRemove { .. })));
    assert!(!home.bashrc().exists());
    assert_eq!(home.autorun.get(), None);
}
