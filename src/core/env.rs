//! Environment resolution.
//!
//! Reads a dotenv-style file from the project directory and layers it over the
//! process environment. Requested variables that neither source defines fall
//! back to caller-supplied defaults, so a lookup never fails.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{EnvError, Result};

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl EnvFile {
    /// Load an env file, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::ReadFile` if the file exists but cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no env file, using process environment");
                return Ok(None);
            }
            Err(source) => {
                return Err(EnvError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        let file = Self::parse(&contents, path);
        debug!(path = %path.display(), entries = file.len(), "env file loaded");
        Ok(Some(file))
    }

    /// Parse env file contents.
    ///
    /// Skips empty lines, comments and lines without `=`. Accepts an optional
    /// `export ` prefix. Supports values with or without quotes.
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Self {
        let mut entries = Vec::new();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            match line.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    if key.is_empty() {
                        debug!(line = lineno + 1, "skipping env line with empty key");
                        continue;
                    }
                    entries.push((key.to_string(), parse_env_value(value.trim())));
                }
                None => debug!(line = lineno + 1, "skipping env line without '='"),
            }
        }

        Self {
            entries,
            path: path.into(),
        }
    }

    /// Get a value by key. A later duplicate overrides an earlier one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries as key-value pairs, in file order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    File,
    Process,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::File => "file",
            Source::Process => "process",
            Source::Default => "default",
        };
        f.write_str(s)
    }
}

/// A single resolved variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub value: String,
    pub source: Source,
}

/// The two layered sources: env file over process environment.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    file: Option<EnvFile>,
    process: BTreeMap<String, String>,
}

impl Environment {
    /// Read the env file at `path` and capture the current process environment.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::ReadFile` if the file exists but cannot be read.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let file = EnvFile::load(path)?;
        let process = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Ok(Self::new(file, process))
    }

    /// Build from explicit sources.
    pub fn new(file: Option<EnvFile>, process: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            file,
            process: process.into_iter().collect(),
        }
    }

    /// The env file, if one was found.
    pub fn file(&self) -> Option<&EnvFile> {
        self.file.as_ref()
    }

    /// Look up one variable: file, then process, then `default`.
    pub fn lookup(&self, key: &str, default: &str) -> Resolved {
        if let Some(value) = self.file.as_ref().and_then(|f| f.get(key)) {
            return Resolved {
                value: value.to_string(),
                source: Source::File,
            };
        }

        if let Some(value) = self.process.get(key) {
            return Resolved {
                value: value.clone(),
                source: Source::Process,
            };
        }

        Resolved {
            value: default.to_string(),
            source: Source::Default,
        }
    }

    /// Resolve every requested `(name, default)` pair.
    pub fn resolve(&self, requests: &[(&str, &str)]) -> EnvironmentMap {
        let entries = requests
            .iter()
            .map(|(key, default)| (key.to_string(), self.lookup(key, default)))
            .collect::<BTreeMap<_, _>>();

        debug!(
            requested = requests.len(),
            from_file = entries.values().filter(|r| r.source == Source::File).count(),
            from_process = entries.values().filter(|r| r.source == Source::Process).count(),
            "environment resolved"
        );

        EnvironmentMap { entries }
    }
}

/// Flat, resolved mapping consumed by the rest of the blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvironmentMap {
    entries: BTreeMap<String, Resolved>,
}

impl EnvironmentMap {
    /// Value of a resolved variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|r| r.value.as_str())
    }

    /// Value of a variable known to be in the request table.
    ///
    /// Unrequested keys read as the empty string.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Where a resolved variable came from.
    pub fn source(&self, key: &str) -> Option<Source> {
        self.entries.get(key).map(|r| r.source)
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
