//! Command helper methods for Test.

use super::{Test, PASSWORD_FILE};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a vrfkey command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - VRFKEY_HOME set to the temporary home directory
    /// - VRFKEY_LOG cleared
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vrfkey").expect("failed to find vrfkey binary");
        cmd.env("VRFKEY_HOME", self.home.path());
        cmd.env_remove("VRFKEY_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `vrfkey create`.
    pub fn create(&self) -> Output {
        self.cmd()
            .args(["create", "--password", PASSWORD_FILE])
            .output()
            .expect("failed to run vrfkey create")
    }

    /// Shortcut for `vrfkey create-weak --file <file>`.
    pub fn create_weak(&self, file: &str) -> Output {
        self.cmd()
            .args(["create-weak", "--file", file, "--password", PASSWORD_FILE])
            .output()
            .expect("failed to run vrfkey create-weak")
    }

    /// Shortcut for `vrfkey export`.
    pub fn export(&self, key: &str, file: &str) -> Output {
        self.cmd()
            .args(["export", "--public-key", key, "--file", file])
            .output()
            .expect("failed to run vrfkey export")
    }

    /// Shortcut for `vrfkey import` with the standard password file.
    pub fn import(&self, file: &str) -> Output {
        self.import_with(file, PASSWORD_FILE)
    }

    /// Shortcut for `vrfkey import` with a chosen password file.
    pub fn import_with(&self, file: &str, password_file: &str) -> Output {
        self.cmd()
            .args(["import", "--file", file, "--password", password_file])
            .output()
            .expect("failed to run vrfkey import")
    }

    /// Shortcut for `vrfkey delete --yes`, optionally `--hard`.
    pub fn delete(&self, key: &str, hard: bool) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["delete", "--public-key", key, "--yes"]);
        if hard {
            cmd.arg("--hard");
        }
        cmd.output().expect("failed to run vrfkey delete")
    }

    /// Shortcut for `vrfkey list --json`, parsed.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        self.list_json_args(&[])
    }

    /// Shortcut for `vrfkey list --json --all`, parsed.
    pub fn list_all_json(&self) -> Vec<serde_json::Value> {
        self.list_json_args(&["--all"])
    }

    fn list_json_args(&self, extra: &[&str]) -> Vec<serde_json::Value> {
        let output = self
            .cmd()
            .args(["list", "--json"])
            .args(extra)
            .output()
            .expect("failed to run vrfkey list --json");
        super::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("list --json output is not JSON")
    }
}
