//! End-to-end key lifecycle through the binary.

use crate::support::*;

#[test]
fn test_full_lifecycle() {
    let t = Test::new();

    let key = t.create_key();
    let keys = t.list_json();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0]["compressed"], key.as_str());

    assert_success(&t.export(&key, "key.json"));
    let again = t.export(&key, "key.json");
    assert_failure(&again);
    assert_stderr_contains(&again, "refusing to overwrite");

    assert_success(&t.delete(&key, false));
    assert!(t.list_json().is_empty());

    assert_success(&t.delete(&key, true));
    assert!(t.list_all_json().is_empty());

    let gone = t.delete(&key, true);
    assert_failure(&gone);
    assert_stderr_contains(&gone, "no entry for this key");

    // The exported file brings the key back.
    assert_success(&t.import("key.json"));
    assert_eq!(t.list_json().len(), 1);
}

#[test]
fn test_key_moves_between_stores() {
    let source = Test::new();
    let target = Test::new();

    let key = source.create_key();
    assert_success(&source.export(&key, "key.json"));
    std::fs::copy(source.path("key.json"), target.path("key.json")).unwrap();

    assert_success(&target.import("key.json"));
    let keys = target.list_json();
    assert_eq!(keys[0]["compressed"], key.as_str());
    assert_eq!(
        keys[0]["hash"],
        source.list_json()[0]["hash"],
        "hash is a function of the key alone"
    );
}
