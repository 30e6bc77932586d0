//! Secret loading.
//!
//! Secrets are plain files named after the secret, read from the project's
//! `.local/` directory first and the user's global directory second. There is
//! no default for a secret: if no file exists the load fails.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Result, SecretError};

/// A resolved secret value with its name
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    name: String,
    value: Zeroizing<String>,
}

impl Secret {
    /// Create a secret from a name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Zeroizing::new(value.into()),
        }
    }

    /// Secret's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Secret value
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Reads secrets by name from an ordered list of directories.
#[derive(Debug, Clone)]
pub struct SecretLoader {
    dirs: Vec<PathBuf>,
}

impl SecretLoader {
    /// Search `local` first, then `global` if configured.
    pub fn new(local: impl Into<PathBuf>, global: Option<PathBuf>) -> Self {
        let mut dirs = vec![local.into()];
        dirs.extend(global);
        Self { dirs }
    }

    /// Directories searched, in order
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Read a secret by name.
    ///
    /// One trailing newline is trimmed; the rest of the content is kept as is.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::InvalidName` for names that are not plain file
    /// names, `SecretError::NotFound` when no directory holds the file, or
    /// `SecretError::ReadFile` when the file exists but cannot be read, or
    /// `SecretError::NotUtf8` when its content is not text.
    pub fn read(&self, name: &str) -> Result<Secret> {
        validate_name(name)?;

        for dir in &self.dirs {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }

            debug!(secret = name, path = %path.display(), "reading secret");
            let bytes = std::fs::read(&path).map_err(|source| SecretError::ReadFile {
                name: name.to_string(),
                source,
            })?;
            let contents = String::from_utf8(bytes).map_err(|e| {
                // zeroed on drop
                drop(Zeroizing::new(e.into_bytes()));
                SecretError::NotUtf8 {
                    name: name.to_string(),
                }
            })?;

            return Ok(Secret::new(name, trim_newline(contents)));
        }

        Err(SecretError::NotFound {
            name: name.to_string(),
            searched: self.dirs.iter().map(|d| d.join(name)).collect(),
        }
        .into())
    }
}

fn trim_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

/// Secret names map straight onto file names, so they cannot carry paths.
fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "cannot be empty"
    } else if name == "." || name == ".." {
        "cannot be a relative directory"
    } else if name.contains('/') || name.contains('\\') {
        "cannot contain path separators"
    } else {
        return Ok(());
    };

    Err(SecretError::InvalidName {
        name: name.to_string(),
        reason,
    }
    .into())
}
