//! Top-level CLI behavior: help, version, completions, status, doctor

use predicates::prelude::*;

use super::helpers::CliEnv;

#[test]
fn help_lists_every_command() {
    let env = CliEnv::new();
    let assert = env.cmd().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    for command in [
        "run", "test", "mute", "unmute", "install", "uninstall", "status", "doctor", "config",
    ] {
        assert!(
            stdout.lines().any(|l| l.trim_start().starts_with(command)),
            "help is missing `{command}`:\n{stdout}"
        );
    }
}

#[test]
fn version_starts_with_package_version() {
    CliEnv::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "crashcue {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn unknown_flavor_is_rejected() {
    CliEnv::new()
        .cmd()
        .args(["install", "fish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'fish'"));
}

#[test]
fn completions_generate_for_bash() {
    CliEnv::new()
        .cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_crashcue()"));
}

#[test]
fn status_json_reports_fresh_environment() {
    let env = CliEnv::new();
    let assert = env.cmd().args(["status", "--json"]).assert().success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(report["muted"], false);
    assert_eq!(report["custom_sound"], serde_json::Value::Null);
    let shells = report["shells"].as_array().unwrap();
    assert_eq!(shells.len(), 4);
    let bash = shells.iter().find(|s| s["flavor"] == "bash").unwrap();
    assert_eq!(bash["installation"]["state"], "not_installed");
    assert_eq!(
        bash["location"].as_str().unwrap(),
        env.bashrc().display().to_string()
    );
}

#[test]
fn doctor_passes_after_bash_install() {
    let env = CliEnv::new();
    env.cmd().args(["install", "bash"]).assert().success();

    let assert = env.cmd().args(["doctor", "--json"]).assert().success();
    let checks: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let bash = checks
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "bash")
        .unwrap();
    assert_eq!(bash["severity"], "ok");
}

#[test]
fn doctor_fails_on_outdated_hook() {
    let env = CliEnv::new();
    std::fs::write(
        env.bashrc(),
        "# <crashcue-start>\n# crashcue-template: v1\n# <crashcue-end>\n",
    )
    .unwrap();

    env.cmd()
        .arg("doctor")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[fail] bash: outdated hook (v1"));
}
