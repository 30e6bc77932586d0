//! Error types for edgeprint.
//!
//! Each stage of assembly has its own error enum; [`Error`] wraps them so
//! callers can propagate with `?` and `main` can match on the cause.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to render blueprint: {0}")]
    Render(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// User-level and project configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("project directory not found: {0}")]
    ProjectNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid env file path '{0}': must be relative to the project directory")]
    InvalidEnvPath(PathBuf),
}

/// Environment file errors.
///
/// A missing env file is not an error; these only cover files that exist
/// but cannot be read.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("failed to read env file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Secret loading errors.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("secret not found: {name} (searched {})", display_paths(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("failed to read secret {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("secret {name} is not valid UTF-8; store binary keys PEM or base64 encoded")]
    NotUtf8 { name: String },
}

/// Credential registry errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credential '{0}' is defined twice with different values")]
    Conflict(String),

    #[error("no default credential defined")]
    NoDefault,

    #[error("more than one default credential: {}", .0.join(", "))]
    MultipleDefaults(Vec<String>),
}

/// Provider spec errors.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("provider spec not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read provider spec {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse provider spec {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("provider spec {0} must be a mapping at the top level")]
    NotAMapping(PathBuf),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Task script errors.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("script not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read script {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Topology graph errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("{from} references unknown {kind} '{name}'")]
    UnresolvedReference {
        from: String,
        kind: &'static str,
        name: String,
    },

    #[error("duplicate {kind} '{name}'")]
    DuplicateNode { kind: &'static str, name: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
