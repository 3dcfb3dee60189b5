//! Tests for general CLI behavior and failure reporting.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();
    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    for command in ["create", "create-weak", "import", "export", "delete", "list"] {
        assert_stdout_contains(&output, command);
    }
}

#[test]
fn test_version() {
    let t = Test::new();
    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vrfkey");
}

#[test]
fn test_missing_public_key_argument() {
    let t = Test::new();
    let output = t.cmd().args(["export", "--file", "x.json"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "--public-key");
}

#[test]
fn test_empty_public_key() {
    let t = Test::new();
    let output = t.export("", "x.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "must specify public key");
}

#[test]
fn test_corrupt_store_is_reported() {
    let t = Test::new();
    std::fs::write(t.store_path(), "{ nope").unwrap();
    let output = t.cmd().arg("list").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "is corrupt");
}

#[test]
fn test_invalid_config_is_reported() {
    let t = Test::new();
    std::fs::write(t.home.path().join("config.toml"), "[kdf\n").unwrap();
    let output = t.cmd().arg("list").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_config_shows_kdf() {
    let t = Test::new();
    let output = t.cmd().arg("config").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "memory_kib");
    assert_stdout_contains(&output, "keys.json");
}

#[test]
fn test_config_init_writes_defaults() {
    let t = Test::new();
    std::fs::remove_file(t.home.path().join("config.toml")).unwrap();
    let output = t.cmd().args(["config", "--init"]).output().unwrap();
    assert_success(&output);
    let written = std::fs::read_to_string(t.home.path().join("config.toml")).unwrap();
    assert!(written.contains("[kdf]"));
}

#[test]
fn test_home_flag_overrides_env() {
    let t = Test::new();
    let other = tempfile::TempDir::new().unwrap();
    std::fs::write(other.path().join("config.toml"), FAST_CONFIG).unwrap();

    let output = t
        .cmd()
        .arg("--home")
        .arg(other.path())
        .args(["create", "--password", PASSWORD_FILE])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(other.path().join("keys.json").exists());
    assert!(!t.store_path().exists());
}

#[test]
fn test_completions_bash() {
    let t = Test::new();
    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vrfkey");
}

#[test]
fn test_unknown_command_fails() {
    use predicates::prelude::*;

    let t = Test::new();
    t.cmd()
        .arg("rotate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_list_exit_status_and_output() {
    use predicates::prelude::*;

    let t = Test::new();
    let key = t.create_key();
    t.cmd()
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains(key).and(predicate::str::contains("Deleted")));
}
