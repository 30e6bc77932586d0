//! Error paths and exit codes.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_secret_fails() {
    let t = Test::project();
    t.remove(".local/passwd");

    let output = t.compile();
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "secret not found: passwd");
    assert_stderr_contains(&output, "create .local/passwd");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_secret_lists_searched_dirs() {
    let t = Test::project();
    t.remove(".local/centos_pub");
    t.user_config("[local]\ndir = \"edge-secrets\"\n");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, ".local");
    assert_stderr_contains(&output, "edge-secrets");
}

#[test]
fn test_binary_secret_fails() {
    let t = Test::project();
    std::fs::write(t.dir.path().join(".local/centos"), [0x30u8, 0x82, 0xff, 0xfe]).unwrap();

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "secret centos is not valid UTF-8");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_script_fails() {
    let t = Test::project();
    t.remove("scripts/StartSlaveServices.sh");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "script not found");
    assert_stderr_contains(&output, "StartSlaveServices.sh");
}

#[test]
fn test_missing_provider_spec_fails() {
    let t = Test::project();
    t.remove("ahv_spec.yaml");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "provider spec not found");
    assert_stderr_contains(&output, "add ahv_spec.yaml");
}

#[test]
fn test_malformed_provider_spec_fails() {
    let t = Test::project();
    t.write("ahv_spec.yaml", "resources: [unclosed\n");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse provider spec");
}

#[test]
fn test_invalid_memory_fails() {
    let t = Test::project();
    t.env("AHV_MEM=lots\n");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid value");
}

#[test]
fn test_missing_project_dir_fails() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--dir", "does-not-exist", "compile"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "project directory not found");
    assert_stderr_contains(&output, "--dir");
}

#[test]
fn test_absolute_env_file_rejected() {
    let t = Test::project();
    let output = t
        .cmd()
        .args(["--env-file", "/etc/passwd", "env"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "must be relative");
}

#[test]
fn test_malformed_user_config_fails() {
    let t = Test::project();
    t.user_config("[local\n");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse");
}

#[test]
fn test_secret_name_with_separator_rejected() {
    let t = Test::project();
    t.env("DEFAULT_PASSWORD_NAME=../passwd\n");

    let output = t.compile();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret name");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    t.cmd()
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_generate() {
    let t = Test::new();
    for shell in ["bash", "zsh", "fish", "powershell"] {
        t.cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("edgeprint"));
    }
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_edgeprint()"));
}
