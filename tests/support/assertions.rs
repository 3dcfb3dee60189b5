//! Test assertion helpers.

use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Pull the compressed key out of `create` output.
///
/// It is the line following the "Compressed public key" label.
pub fn created_key(out: &str) -> String {
    let mut lines = out.lines();
    while let Some(line) = lines.next() {
        if line.starts_with("Compressed public key") {
            return lines
                .next()
                .expect("no key after label")
                .trim()
                .to_string();
        }
    }
    panic!("no compressed key in output: {}", out);
}

/// stdout and stderr together, for messages whose stream doesn't matter.
pub fn combined(output: &Output) -> String {
    format!("{}{}", stdout(output), stderr(output))
}
