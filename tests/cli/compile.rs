//! Tests for `edgeprint compile`.

use crate::support::*;

#[test]
fn test_compile_emits_blueprint() {
    let t = Test::project();
    let output = t.compile();
    assert_success(&output);

    let doc = stdout_json(&output);
    assert_eq!(doc["name"], "HadoopDslBlueprint");
    assert_eq!(doc["default_credential"]["name"], "default cred");
    assert_eq!(doc["services"].as_array().unwrap().len(), 2);
    assert_eq!(doc["profiles"][0]["name"], "Nutanix");
}

#[test]
fn test_compile_declares_credentials() {
    let t = Test::project();
    let doc = stdout_json(&t.compile());

    let credentials = doc["credentials"].as_array().unwrap();
    assert_eq!(credentials.len(), 2);

    let default = credentials
        .iter()
        .find(|c| c["name"] == "default cred")
        .expect("default credential present");
    assert_eq!(default["type"], "PASSWORD");
    assert_eq!(default["default"], true);
    assert_eq!(default["username"], "centos");
    assert_eq!(default["secret"]["value"], "nutanix/4u");

    let key = credentials
        .iter()
        .find(|c| c["name"] == "Centos")
        .expect("key credential present");
    assert_eq!(key["type"], "KEY");
    assert_eq!(key["default"], false);
}

#[test]
fn test_compile_env_file_beats_process_env() {
    let t = Test::project();
    t.env("CENTOS_USER=opsuser\n");

    let output = t.compile_with_env("CENTOS_USER", "root");
    assert_success(&output);

    let doc = stdout_json(&output);
    for credential in doc["credentials"].as_array().unwrap() {
        assert_eq!(credential["username"], "opsuser");
    }
}

#[test]
fn test_compile_process_env_beats_default() {
    let t = Test::project();
    let output = t.compile_with_env("AHV_MEM", "8");
    assert_success(&output);

    let doc = stdout_json(&output);
    let spec = &doc["substrates"][0]["provider_spec"];
    assert_eq!(spec["resources"]["memory_size_mib"], 8192);
}

#[test]
fn test_compile_default_memory_is_four_gib() {
    let t = Test::project();
    let doc = stdout_json(&t.compile());

    for substrate in doc["substrates"].as_array().unwrap() {
        assert_eq!(substrate["provider_spec"]["resources"]["memory_size_mib"], 4096);
    }
}

#[test]
fn test_compile_sets_nic_subnet() {
    let t = Test::project();
    t.env("AHV_NIC_NAME=vlan.42\n");
    let doc = stdout_json(&t.compile());

    let nic = &doc["substrates"][0]["provider_spec"]["resources"]["nic_list"][0];
    assert_eq!(nic["subnet_reference"]["name"], "vlan.42");
}

#[test]
fn test_compile_embeds_scripts() {
    let t = Test::project();
    t.write("scripts/ConfigureMaster.sh", "#!/bin/bash\nhdfs namenode -format\n");

    let output = t.compile();
    assert_success(&output);
    assert_stdout_contains(&output, "hdfs namenode -format");
}

#[test]
fn test_compile_public_key_becomes_profile_variable() {
    let t = Test::project();
    let doc = stdout_json(&t.compile());

    let variables = doc["profiles"][0]["variables"].as_array().unwrap();
    let key = variables
        .iter()
        .find(|v| v["name"] == "CENTOS_PUBLIC_KEY")
        .expect("public key variable");
    assert_eq!(key["type"], "secret");
    assert_eq!(key["runtime"], false);
    assert_eq!(key["value"], "ssh-rsa AAAAB3NzaC1yc2E centos@edge");
}

#[test]
fn test_compile_redact_hides_secrets() {
    let t = Test::project();
    let output = t
        .cmd()
        .args(["compile", "--redact"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_excludes(&output, "nutanix/4u");
    assert_stdout_excludes(&output, "BEGIN RSA PRIVATE KEY");
    assert_stdout_excludes(&output, "ssh-rsa AAAAB3NzaC1yc2E");
    assert_stdout_contains(&output, "********");
}

#[test]
fn test_compile_compact_is_one_line() {
    let t = Test::project();
    let output = t
        .cmd()
        .args(["compile", "--compact"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end().lines().count(), 1);
}

#[test]
fn test_compile_writes_output_file() {
    let t = Test::project();
    let output = t
        .cmd()
        .args(["compile", "-o", "blueprint.json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(stdout(&output).is_empty());
    assert_stderr_contains(&output, "wrote HadoopDslBlueprint");

    let written = std::fs::read_to_string(t.dir.path().join("blueprint.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["name"], "HadoopDslBlueprint");
}

#[cfg(unix)]
#[test]
fn test_compile_output_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::project();
    let output = t
        .cmd()
        .args(["compile", "-o", "blueprint.json"])
        .output()
        .unwrap();
    assert_success(&output);

    let path = t.dir.path().join("blueprint.json");
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert!(std::fs::read_to_string(&path).unwrap().contains("nutanix/4u"));
}

#[cfg(unix)]
#[test]
fn test_compile_output_tightens_existing_file() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::project();
    let path = t.write("blueprint.json", "stale\n");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let output = t
        .cmd()
        .args(["compile", "-o", "blueprint.json"])
        .output()
        .unwrap();
    assert_success(&output);

    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert!(!std::fs::read_to_string(&path).unwrap().contains("stale"));
}

#[test]
fn test_compile_with_dir_flag() {
    let t = Test::project();
    let elsewhere = tempfile::TempDir::new().unwrap();

    let output = t
        .cmd()
        .current_dir(elsewhere.path())
        .arg("--dir")
        .arg(t.dir.path())
        .arg("compile")
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_compile_with_custom_env_file() {
    let t = Test::project();
    t.write("envs/prod.env", "CENTOS_USER=produser\n");
    t.env("CENTOS_USER=devuser\n");

    let output = t
        .cmd()
        .args(["--env-file", "envs/prod.env", "compile"])
        .output()
        .unwrap();
    assert_success(&output);

    let doc = stdout_json(&output);
    assert_eq!(doc["credentials"][0]["username"], "produser");
}

#[test]
fn test_compile_reads_secrets_from_global_dir() {
    let t = Test::project();
    t.remove(".local/passwd");

    let global = t.home.path().join("edge-secrets");
    std::fs::create_dir_all(&global).unwrap();
    std::fs::write(global.join("passwd"), "from-global\n").unwrap();
    t.user_config("[local]\ndir = \"edge-secrets\"\n");

    let output = t.compile();
    assert_success(&output);
    assert_stdout_contains(&output, "from-global");
}

#[test]
fn test_compile_local_secret_shadows_global() {
    let t = Test::project();

    let global = t.home.path().join("edge-secrets");
    std::fs::create_dir_all(&global).unwrap();
    std::fs::write(global.join("passwd"), "from-global\n").unwrap();
    t.user_config("[local]\ndir = \"edge-secrets\"\n");

    let output = t.compile();
    assert_success(&output);
    assert_stdout_contains(&output, "nutanix/4u");
    assert_stdout_excludes(&output, "from-global");
}

#[test]
fn test_compile_renamed_password_secret() {
    let t = Test::project();
    t.remove(".local/passwd");
    t.secret("lab_password", "lab-pass");
    t.env("DEFAULT_PASSWORD_NAME=lab_password\n");

    let output = t.compile();
    assert_success(&output);
    assert_stdout_contains(&output, "lab-pass");
}
