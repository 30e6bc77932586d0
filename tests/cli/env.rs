//! Tests for `edgeprint env`.

use crate::support::*;

#[test]
fn test_env_lists_defaults() {
    let t = Test::new();
    let output = t.cmd().arg("env").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Variables");
    assert_stdout_contains(&output, "AHV_MEM");
    assert_stdout_contains(&output, "4 (default)");
}

#[test]
fn test_env_json_reports_sources() {
    let t = Test::new();
    t.env("CENTOS_USER=opsuser\n");

    let output = t
        .cmd()
        .env("CENTOS_USER", "root")
        .env("KAFKA_URL", "https://mirror.example/kafka.tgz")
        .args(["env", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let vars = stdout_json(&output);
    assert_eq!(vars["CENTOS_USER"]["value"], "opsuser");
    assert_eq!(vars["CENTOS_USER"]["source"], "file");
    assert_eq!(vars["KAFKA_URL"]["value"], "https://mirror.example/kafka.tgz");
    assert_eq!(vars["KAFKA_URL"]["source"], "process");
    assert_eq!(vars["AHV_MEM"]["value"], "4");
    assert_eq!(vars["AHV_MEM"]["source"], "default");
}

#[test]
fn test_env_covers_every_variable() {
    let t = Test::new();
    let vars = stdout_json(&t.env_json());
    let map = vars.as_object().unwrap();

    assert_eq!(map.len(), VARIABLES.len());
    for var in VARIABLES {
        assert!(map.contains_key(*var), "missing {}", var);
    }
}

#[test]
fn test_env_needs_no_secrets() {
    let t = Test::new();
    assert_success(&t.env_json());
}

#[test]
fn test_env_quoted_values() {
    let t = Test::new();
    t.env("export KAFKA_LOG_DIRS=\"/data/kafka logs\"\n# comment\nNUMBER_OF_NODES='3'\n");

    let vars = stdout_json(&t.env_json());
    assert_eq!(vars["KAFKA_LOG_DIRS"]["value"], "/data/kafka logs");
    assert_eq!(vars["NUMBER_OF_NODES"]["value"], "3");
}
