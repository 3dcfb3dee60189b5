//! Test support utilities for vrfkey integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own vrfkey home and working directory. Child
/// processes receive the home through `VRFKEY_HOME` so tests can run in
/// parallel.
pub struct Test {
    /// Working directory for exported files and password files
    pub dir: TempDir,
    /// vrfkey home (config.toml, keys.json)
    pub home: TempDir,
}

impl Test {
    /// Create a new environment with cheap KDF parameters configured.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        std::fs::write(home.path().join("config.toml"), FAST_CONFIG)
            .expect("failed to write config");

        let t = Self { dir, home };
        t.write_file(PASSWORD_FILE, &format!("{}\n", PASSWORD));
        t
    }

    /// Absolute path of a file in the working directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Path of the records file.
    pub fn store_path(&self) -> PathBuf {
        self.home.path().join("keys.json")
    }

    /// Write a file into the working directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("failed to write test file");
        path
    }

    /// Create a key and return its compressed public key.
    pub fn create_key(&self) -> String {
        let output = self.create();
        assert_success(&output);
        created_key(&stdout(&output))
    }
}
