//! Constants used throughout edgeprint.
//!
//! Centralizes file names, directory conventions and variable defaults.

/// Environment variables file name, relative to the project directory.
pub const ENV_FILE: &str = ".env";

/// Local secrets directory, relative to the project directory.
pub const LOCAL_DIR: &str = ".local";

/// User-level configuration file, relative to HOME.
pub const USER_CONFIG_FILE: &str = ".edgeprint/config.toml";

/// Provider spec shared by both substrates.
pub const PROVIDER_SPEC_FILE: &str = "ahv_spec.yaml";

/// Placeholder written in place of secret values by `compile --redact`.
pub const REDACTED: &str = "********";

/// Variables the blueprint reads, with their defaults.
///
/// Resolution order is env file, then process environment, then this table.
pub const VARIABLE_DEFAULTS: &[(&str, &str)] = &[
    ("CENTOS_USER", "centos"),
    (
        "CENTOS_IMAGE_SOURCE",
        "http://download.nutanix.com/calm/CentOS-7-x86_64-1810.qcow2",
    ),
    ("CENTOS_SSH_PRIVATE_KEY_NAME", "centos"),
    ("CENTOS_SSH_PUBLIC_KEY_NAME", "centos_pub"),
    ("AHV_NIC_NAME", "vlan.0"),
    ("AHV_MEM", "4"),
    (
        "KAFKA_URL",
        "http://www-us.apache.org/dist/kafka/2.5.0/kafka_2.12-2.5.0.tgz",
    ),
    ("ZOOKEEPER_DATA_DIR", "/home/centos/zookeepeer/data/"),
    ("KAFKA_LOG_DIRS", "/var/log/kafka-logs"),
    ("NUMBER_OF_PARTITION", "2"),
    ("NUMBER_OF_NODES", "3"),
    ("DEFAULT_PASSWORD_NAME", "passwd"),
];
