//! Configuration management.
//!
//! Two layers: the user-level `~/.edgeprint/config.toml`, which names the
//! global secrets directory, and the [`Project`] the blueprint is assembled
//! from, whose paths come from the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// User-level configuration stored in `~/.edgeprint/config.toml`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Local secrets settings
    #[serde(default)]
    pub local: LocalSection,
}

/// `[local]` section of the user configuration
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LocalSection {
    /// Fallback directory for secrets not found in the project's `.local/`.
    ///
    /// Relative paths are taken relative to HOME.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl UserConfig {
    /// Path to the user configuration file, if HOME can be determined
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(constants::USER_CONFIG_FILE))
    }

    /// Load the user configuration from its default location.
    ///
    /// A missing file (or unknown HOME) yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse` if the file
    /// exists but cannot be read or is malformed.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("home directory unknown, skipping user config");
                Ok(Self::default())
            }
        }
    }

    /// Load the user configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`UserConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading user config");

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(config)
    }

    /// Global secrets directory, resolved against HOME when relative.
    pub fn global_local_dir(&self) -> Option<PathBuf> {
        let dir = self.local.dir.as_ref()?;
        if dir.is_absolute() {
            return Some(dir.clone());
        }
        dirs::home_dir().map(|home| home.join(dir))
    }
}

/// The blueprint project directory and the files read from it.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    env_file: PathBuf,
}

impl Project {
    /// Open a project rooted at `root`.
    ///
    /// `env_file` is relative to `root` and defaults to `.env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ProjectNotFound` if `root` is not a directory,
    /// or `ConfigError::InvalidEnvPath` if `env_file` is absolute.
    pub fn open(root: impl Into<PathBuf>, env_file: Option<&Path>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ConfigError::ProjectNotFound(root).into());
        }

        let env_file = env_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(constants::ENV_FILE));
        if env_file.is_absolute() {
            return Err(ConfigError::InvalidEnvPath(env_file).into());
        }

        debug!(root = %root.display(), env_file = %env_file.display(), "project opened");
        Ok(Self { root, env_file })
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the env file
    pub fn env_path(&self) -> PathBuf {
        self.root.join(&self.env_file)
    }

    /// Project-local secrets directory (`<root>/.local`)
    pub fn local_dir(&self) -> PathBuf {
        self.root.join(constants::LOCAL_DIR)
    }

    /// Resolve a path relative to the project root
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
