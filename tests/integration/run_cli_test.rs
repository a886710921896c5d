//! crashcue run: exit code passthrough and cue suppression

#![cfg(unix)]

use predicates::prelude::*;

use super::helpers::CliEnv;

fn muted_env() -> CliEnv {
    let env = CliEnv::new();
    env.cmd().arg("mute").assert().success();
    env
}

#[test]
fn success_passes_through() {
    muted_env().cmd().args(["run", "--", "true"]).assert().code(0);
}

#[test]
fn failure_code_passes_through() {
    muted_env()
        .cmd()
        .args(["run", "--", "sh", "-c", "exit 3"])
        .assert()
        .code(3);
}

#[test]
fn child_output_is_not_captured() {
    muted_env()
        .cmd()
        .args(["run", "--", "sh", "-c", "echo building; echo broken >&2; exit 2"])
        .assert()
        .code(2)
        .stdout("building\n")
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn hyphen_arguments_reach_the_child() {
    muted_env()
        .cmd()
        .args(["run", "sh", "-c", "test \"$1\" = --flag", "sh", "--flag"])
        .assert()
        .code(0);
}

#[test]
fn missing_program_exits_one() {
    muted_env()
        .cmd()
        .args(["run", "--", "crashcue-no-such-program"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to start crashcue-no-such-program"));
}

#[test]
fn ignored_command_skips_cue_but_keeps_code() {
    let env = CliEnv::new();
    env.cmd()
        .args(["config", "ignore", "add", "sh", "-c", "exit 4"])
        .assert()
        .success();

    env.cmd()
        .args(["run", "--", "sh", "-c", "exit 4"])
        .assert()
        .code(4);
    assert!(!env.config_dir().join("sounds").exists());
}

#[test]
fn run_requires_a_command() {
    CliEnv::new().cmd().arg("run").assert().failure();
}

#[test]
fn malformed_workspace_config_still_runs_command() {
    let env = CliEnv::new();
    std::fs::write(env.workdir().join(".crashcue.toml"), "[sound\nmuted = tru").unwrap();

    env.cmd()
        .args(["run", "--", "sh", "-c", "echo RAN; exit 0"])
        .assert()
        .code(0)
        .stdout("RAN\n")
        .stderr(predicate::str::contains("ignoring unreadable config"));
}

#[test]
fn malformed_user_config_still_runs_command() {
    let env = CliEnv::new();
    std::fs::create_dir_all(env.config_dir()).unwrap();
    std::fs::write(env.config_file(), "muted = = true").unwrap();

    env.cmd()
        .args(["run", "--", "sh", "-c", "echo RAN; exit 0"])
        .assert()
        .code(0)
        .stdout("RAN\n");
}
