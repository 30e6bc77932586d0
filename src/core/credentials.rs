//! Credential registry.
//!
//! Wraps resolved secrets into named credential records. Several credentials
//! may share one secret; one name may only ever carry one definition.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::core::secrets::Secret;
use crate::error::{CredentialError, Result};

/// How the secret authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CredentialKind {
    /// SSH private key
    Key,
    /// Password
    Password,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::Key => f.write_str("KEY"),
            CredentialKind::Password => f.write_str("PASSWORD"),
        }
    }
}

/// A named username + secret pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    name: String,
    username: String,
    secret: Secret,
    kind: CredentialKind,
    is_default: bool,
}

impl Credential {
    /// Create a non-default credential
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        secret: Secret,
        kind: CredentialKind,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            secret,
            kind,
            is_default: false,
        }
    }

    /// Mark this credential as the blueprint default
    pub fn default_for_blueprint(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Credentials in declaration order, unique by name
#[derive(Debug, Clone, Default)]
pub struct CredentialRegistry {
    entries: Vec<Credential>,
}

impl CredentialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential.
    ///
    /// Registering the same definition twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Conflict` if the name is already registered
    /// with a different username, secret, kind or default flag.
    pub fn register(&mut self, credential: Credential) -> Result<()> {
        if let Some(existing) = self.get(credential.name()) {
            if *existing == credential {
                debug!(credential = credential.name(), "duplicate credential, identical");
                return Ok(());
            }
            return Err(CredentialError::Conflict(credential.name).into());
        }

        debug!(
            credential = credential.name(),
            kind = %credential.kind(),
            default = credential.is_default(),
            "credential registered"
        );
        self.entries.push(credential);
        Ok(())
    }

    /// Look up a credential by name
    pub fn get(&self, name: &str) -> Option<&Credential> {
        self.entries.iter().find(|c| c.name == name)
    }

    /// The single default credential.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::NoDefault` or `CredentialError::MultipleDefaults`.
    pub fn default_credential(&self) -> Result<&Credential> {
        let defaults: Vec<&Credential> = self.entries.iter().filter(|c| c.is_default).collect();

        match defaults.as_slice() {
            [] => Err(CredentialError::NoDefault.into()),
            [only] => Ok(only),
            many => Err(CredentialError::MultipleDefaults(
                many.iter().map(|c| c.name.clone()).collect(),
            )
            .into()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
