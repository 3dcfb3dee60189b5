//! Tests for `vrfkey export`.

use crate::support::*;

#[test]
fn test_export_writes_key_file() {
    let t = Test::new();
    let key = t.create_key();

    let output = t.export(&key, "backup.json");
    assert_success(&output);
    assert_stdout_contains(&output, &format!("exported {}", key));

    let file: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(t.path("backup.json")).unwrap()).unwrap();
    assert_eq!(file["public_key"], key.as_str());
    assert_eq!(file["crypto"]["cipher"], "xchacha20poly1305");
}

#[cfg(unix)]
#[test]
fn test_exported_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::new();
    let key = t.create_key();
    assert_success(&t.export(&key, "backup.json"));
    let mode = std::fs::metadata(t.path("backup.json"))
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_export_refuses_to_overwrite() {
    let t = Test::new();
    let key = t.create_key();
    assert_success(&t.export(&key, "backup.json"));
    let before = std::fs::read(t.path("backup.json")).unwrap();

    let output = t.export(&key, "backup.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "refusing to overwrite existing file");
    assert_stderr_contains(&output, "Please move it or change the save path");
    assert_eq!(std::fs::read(t.path("backup.json")).unwrap(), before);
}

#[test]
fn test_export_unknown_key() {
    let t = Test::new();
    let output = t.export(UNKNOWN_KEY, "backup.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "no entry for this key");
    let all = combined(&output);
    assert!(all.contains("is not in the store"));
    assert!(!all.contains("already no entry"));
    assert!(!t.path("backup.json").exists());
}

#[test]
fn test_export_malformed_key() {
    let t = Test::new();
    let output = t.export(MALFORMED_KEY, "backup.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse public key");
    assert!(!t.path("backup.json").exists());
}

#[test]
fn test_export_accepts_pk_alias() {
    let t = Test::new();
    let key = t.create_key();
    let output = t
        .cmd()
        .args(["export", "--pk", &key, "--file", "alias.json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.path("alias.json").exists());
}

#[test]
fn test_export_archived_key_still_works() {
    let t = Test::new();
    let key = t.create_key();
    assert_success(&t.delete(&key, false));
    assert_success(&t.export(&key, "archived.json"));
}
