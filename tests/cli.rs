// ABOUTME: Integration tests for the mapdeploy CLI commands.
// ABOUTME: Validates --help output, init and preflight behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn mapdeploy_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mapdeploy"));
    cmd.env_remove("RENDER_API_KEY")
        .env_remove("SUPABASE_ACCESS_TOKEN")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_shows_commands() {
    mapdeploy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("preflight"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("mapdeploy.yml");

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "mapdeploy.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("service_id: srv-clq0e5tni6pcf3d7vtpg"));
    assert!(content.contains("interval: 5s"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("mapdeploy.yml");

    fs::write(&config_path, "existing: config").unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("mapdeploy.yml");

    fs::write(&config_path, "existing: config").unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("marker: NeuralMap"));
}

#[test]
fn preflight_reports_missing_tokens() {
    let temp_dir = tempfile::tempdir().unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("preflight")
        .assert()
        .success()
        .stdout(predicate::str::contains("Preflight passed"))
        .stdout(predicate::str::contains("RENDER_API_KEY: [empty]"))
        .stdout(predicate::str::contains("SUPABASE_ACCESS_TOKEN: [empty]"));
}

#[test]
fn preflight_masks_tokens() {
    let temp_dir = tempfile::tempdir().unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .env("RENDER_API_KEY", "rnd_0123456789abcdef")
        .arg("preflight")
        .assert()
        .success()
        .stdout(predicate::str::contains("RENDER_API_KEY: rnd_01...cdef"))
        .stdout(predicate::str::contains("0123456789").not());
}

#[test]
fn preflight_rejects_invalid_url() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("mapdeploy.yml"),
        "frontend:\n  url: not-a-url\n",
    )
    .unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .arg("preflight")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frontend.url"));
}

#[test]
fn explicit_config_must_exist() {
    let temp_dir = tempfile::tempdir().unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .args(["--config", "missing.yml", "preflight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn invalid_config_fails_deploy_before_any_step() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("mapdeploy.yml"),
        "health_poll:\n  attempts: 0\n",
    )
    .unwrap();

    mapdeploy_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("attempts"))
        .stdout(predicate::str::contains("STEP 1").not());
}
