//! Command helper methods for Test.

use super::{Test, VARIABLES};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an edgeprint command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - Blueprint variables, EDGEPRINT_DIR and EDGEPRINT_LOG removed
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("edgeprint").expect("failed to find edgeprint binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("EDGEPRINT_DIR");
        cmd.env_remove("EDGEPRINT_LOG");
        for var in VARIABLES {
            cmd.env_remove(var);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `edgeprint compile`.
    pub fn compile(&self) -> Output {
        self.cmd()
            .arg("compile")
            .output()
            .expect("failed to run edgeprint compile")
    }

    /// Shortcut for `edgeprint compile` with a process environment variable.
    pub fn compile_with_env(&self, key: &str, value: &str) -> Output {
        self.cmd()
            .env(key, value)
            .arg("compile")
            .output()
            .expect("failed to run edgeprint compile")
    }

    /// Shortcut for `edgeprint env --json`.
    pub fn env_json(&self) -> Output {
        self.cmd()
            .args(["env", "--json"])
            .output()
            .expect("failed to run edgeprint env --json")
    }

    /// Shortcut for `edgeprint check`.
    pub fn check(&self) -> Output {
        self.cmd()
            .arg("check")
            .output()
            .expect("failed to run edgeprint check")
    }
}
