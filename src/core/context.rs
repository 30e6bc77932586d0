//! Assembly context.
//!
//! Everything the blueprint declaration reads from the outside world is
//! gathered here once, by [`Context::init`], and handed to the declaration by
//! reference: resolved variables, the secret loader and the project files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::{Project, UserConfig};
use crate::core::constants;
use crate::core::env::{Environment, EnvironmentMap};
use crate::core::provider::ProviderSpec;
use crate::core::secrets::{Secret, SecretLoader};
use crate::error::{Result, ScriptError};

/// Inputs that locate the project
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Project root directory
    pub dir: PathBuf,
    /// Env file relative to `dir`; `.env` when unset
    pub env_file: Option<PathBuf>,
}

impl Options {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            env_file: None,
        }
    }

    pub fn env_file(mut self, relpath: impl Into<PathBuf>) -> Self {
        self.env_file = Some(relpath.into());
        self
    }
}

/// Resolved configuration for one assembly run
#[derive(Debug, Clone)]
pub struct Context {
    project: Project,
    vars: EnvironmentMap,
    secrets: SecretLoader,
}

impl Context {
    /// Open the project, resolve variables and set up the secret loader.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a bad project directory or a malformed user
    /// config, and an `EnvError` if the env file exists but is unreadable.
    pub fn init(options: &Options) -> Result<Self> {
        let project = Project::open(&options.dir, options.env_file.as_deref())?;
        let user = UserConfig::load()?;

        let environment = Environment::read(project.env_path())?;
        let vars = environment.resolve(constants::VARIABLE_DEFAULTS);

        let secrets = SecretLoader::new(project.local_dir(), user.global_local_dir());
        debug!(secret_dirs = ?secrets.dirs(), "context initialized");

        Ok(Self::from_parts(project, vars, secrets))
    }

    /// Build from already-resolved parts
    pub fn from_parts(project: Project, vars: EnvironmentMap, secrets: SecretLoader) -> Self {
        Self {
            project,
            vars,
            secrets,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// All resolved variables
    pub fn vars(&self) -> &EnvironmentMap {
        &self.vars
    }

    /// A resolved variable from the defaults table
    pub fn var(&self, key: &str) -> &str {
        self.vars.value(key)
    }

    /// Read a secret by name
    ///
    /// # Errors
    ///
    /// See [`SecretLoader::read`].
    pub fn secret(&self, name: &str) -> Result<Secret> {
        self.secrets.read(name)
    }

    /// Read a task script relative to the project root.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::NotFound` or `ScriptError::ReadFile`.
    pub fn script(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.project.path(relative);

        match std::fs::read_to_string(&path) {
            Ok(script) => Ok(script),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ScriptError::NotFound(path).into())
            }
            Err(source) => Err(ScriptError::ReadFile { path, source }.into()),
        }
    }

    /// Read a provider spec relative to the project root
    ///
    /// # Errors
    ///
    /// See [`ProviderSpec::read`].
    pub fn provider_spec(&self, relative: impl AsRef<Path>) -> Result<ProviderSpec> {
        ProviderSpec::read(self.project.path(relative))
    }
}
