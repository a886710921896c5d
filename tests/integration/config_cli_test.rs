//! mute / unmute and the config subcommands

use predicates::prelude::*;

use super::helpers::CliEnv;

#[test]
fn mute_then_unmute_round_trip() {
    let env = CliEnv::new();

    env.cmd()
        .arg("mute")
        .assert()
        .success()
        .stdout("CrashCue muted.\n");
    assert!(env.read(&env.config_file()).contains("muted = true"));

    env.cmd()
        .arg("mute")
        .assert()
        .success()
        .stdout("CrashCue is already muted.\n");

    env.cmd()
        .arg("unmute")
        .assert()
        .success()
        .stdout("CrashCue unmuted.\n");
    assert!(env.read(&env.config_file()).contains("muted = false"));
}

#[test]
fn mute_keeps_user_comments() {
    let env = CliEnv::new();
    std::fs::create_dir_all(env.config_dir()).unwrap();
    std::fs::write(
        env.config_file(),
        "# my settings\n[run]\nignore_commands = [\"make watch\"] # noisy\n",
    )
    .unwrap();

    env.cmd().arg("mute").assert().success();

    let text = env.read(&env.config_file());
    assert!(text.starts_with("# my settings\n"));
    assert!(text.contains("ignore_commands = [\"make watch\"] # noisy"));
    assert!(text.contains("muted = true"));
}

#[test]
fn test_command_is_silent_while_muted() {
    let env = CliEnv::new();
    env.cmd().arg("mute").assert().success();

    env.cmd()
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("CrashCue is muted"));
}

#[test]
fn set_sound_stores_absolute_path() {
    let env = CliEnv::new();
    let sound = env.workdir().join("boom.wav");
    std::fs::write(&sound, b"RIFF").unwrap();

    env.cmd()
        .args(["config", "set-sound", "boom.wav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crashcue install"));

    env.cmd()
        .args(["config", "get-sound"])
        .assert()
        .success()
        .stdout(format!("{}\n", sound.display()));
}

#[test]
fn set_sound_rejects_missing_file() {
    let env = CliEnv::new();

    env.cmd()
        .args(["config", "set-sound", "nope.wav"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sound file not found"));

    assert!(!env.config_file().exists());
}

#[test]
fn get_sound_defaults_to_bundled_file() {
    let env = CliEnv::new();

    env.cmd()
        .args(["config", "get-sound"])
        .assert()
        .success()
        .stdout(format!(
            "{}\n",
            env.config_dir().join("sounds").join("crashcue.wav").display()
        ));
}

#[test]
fn ignore_add_list_remove() {
    let env = CliEnv::new();

    env.cmd()
        .args(["config", "ignore", "add", "cargo", "watch"])
        .assert()
        .success()
        .stdout("Ignoring: cargo watch\n");
    env.cmd()
        .args(["config", "ignore", "add", "cargo", "watch"])
        .assert()
        .success()
        .stdout("Already ignored: cargo watch\n");
    env.cmd()
        .args(["config", "ignore", "list"])
        .assert()
        .success()
        .stdout("cargo watch\n");
    env.cmd()
        .args(["config", "ignore", "remove", "cargo", "watch"])
        .assert()
        .success()
        .stdout("No longer ignoring: cargo watch\n");
    env.cmd()
        .args(["config", "ignore", "list"])
        .assert()
        .success()
        .stdout("No ignored commands.\n");
}

#[test]
fn workspace_overlay_applies_to_show() {
    let env = CliEnv::new();
    std::fs::write(
        env.workdir().join(".crashcue.toml"),
        "[sound]\nmuted = true\n",
    )
    .unwrap();

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# overlaid by"))
        .stdout(predicate::str::contains("muted = true"));
}

#[test]
fn reset_writes_defaults() {
    let env = CliEnv::new();
    env.cmd().arg("mute").assert().success();

    env.cmd().args(["config", "reset"]).assert().success();

    let config: crashcue::Config = toml::from_str(&env.read(&env.config_file())).unwrap();
    assert_eq!(config, crashcue::Config::default());
}
