//! Tests for `vrfkey create` and `vrfkey create-weak`.

use crate::support::*;

#[test]
fn test_create_prints_guidance() {
    let t = Test::new();
    let output = t.create();
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.starts_with("Created keypair."), "got: {}", out);
    assert!(out.contains("Uncompressed public key"));
    assert!(out.contains("Hash of public key"));

    let key = created_key(&out);
    assert!(key.starts_with("0x"));
    assert_eq!(key.len(), 2 + 66);
    assert!(out.contains(&format!(
        "vrfkey export --file <save_path> --public-key {}",
        key
    )));
}

#[test]
fn test_create_persists_to_store() {
    let t = Test::new();
    let key = t.create_key();
    assert!(t.store_path().exists());

    let keys = t.list_json();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0]["compressed"], key.as_str());
}

#[test]
fn test_create_twice_gives_distinct_keys() {
    let t = Test::new();
    let first = t.create_key();
    let second = t.create_key();
    assert_ne!(first, second);
    assert_eq!(t.list_json().len(), 2);
}

#[test]
fn test_create_without_password_is_rejected() {
    let t = Test::new();
    let output = t.cmd().arg("create").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "must specify password");
    assert!(!t.store_path().exists());
}

#[test]
fn test_create_weak_writes_file_only() {
    let t = Test::new();
    let output = t.create_weak("weak.json");
    assert_success(&output);
    assert_stdout_contains(&output, "Don't use this key for anything sensitive!");
    assert_stdout_contains(&output, "wrote 0x");

    let file: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(t.path("weak.json")).unwrap()).unwrap();
    assert_eq!(file["crypto"]["kdfparams"]["memory_kib"], 8);
    assert!(t.list_json().is_empty());
}

#[test]
fn test_create_weak_requires_file() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["create-weak", "--password", PASSWORD_FILE])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "must specify");
}

#[test]
fn test_create_weak_refuses_existing_file() {
    let t = Test::new();
    t.write_file("taken.json", "keep me");
    let output = t.create_weak("taken.json");
    assert_failure(&output);
    assert_stderr_contains(&output, "refusing to overwrite");
    assert_eq!(
        std::fs::read_to_string(t.path("taken.json")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_created_weak_key_can_be_imported() {
    let t = Test::new();
    assert_success(&t.create_weak("weak.json"));
    let output = t.import("weak.json");
    assert_success(&output);
    assert_stdout_contains(&output, "imported 0x");
    assert_eq!(t.list_json().len(), 1);
}
