//! Test support utilities for edgeprint integration tests.
//!
//! Provides an isolated blueprint project and helper commands.

#![allow(dead_code)]

pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and home dir. No process-global state
/// is mutated; child processes get `.current_dir()` and `HOME` instead, so
/// tests can safely run in parallel.
pub struct Test {
    /// Blueprint project directory
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create an empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a complete project: scripts, provider spec and every secret.
    pub fn project() -> Self {
        let t = Self::new();
        for script in SCRIPTS {
            t.write(&format!("scripts/{}.sh", script), &format!("echo {}\n", script));
        }
        t.write("ahv_spec.yaml", AHV_SPEC);
        for (name, value) in SECRETS {
            t.secret(name, value);
        }
        t
    }

    /// Write a file relative to the project directory.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, contents).expect("failed to write file");
        path
    }

    /// Remove a file relative to the project directory.
    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.dir.path().join(relative)).expect("failed to remove file");
    }

    /// Write a secret into the project's `.local/`.
    pub fn secret(&self, name: &str, value: &str) -> PathBuf {
        self.write(&format!(".local/{}", name), value)
    }

    /// Write the project's `.env`.
    pub fn env(&self, contents: &str) -> PathBuf {
        self.write(".env", contents)
    }

    /// Write `~/.edgeprint/config.toml` in the temp home.
    pub fn user_config(&self, contents: &str) -> PathBuf {
        let path = self.home.path().join(".edgeprint/config.toml");
        fs::create_dir_all(path.parent().unwrap()).expect("failed to create config dir");
        fs::write(&path, contents).expect("failed to write user config");
        path
    }
}
