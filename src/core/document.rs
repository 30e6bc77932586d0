//! Blueprint document rendering.
//!
//! Lists keep declaration order and maps are sorted, so the same inputs always
//! render to the same bytes.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::constants;
use crate::core::credentials::{Credential, CredentialKind};
use crate::core::topology::{Blueprint, Package, Profile, Ref, Service, Substrate};
use crate::error::Result;

/// Rendering options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Single-line JSON instead of pretty-printed
    pub compact: bool,
    /// Replace secret values with a placeholder
    pub redact: bool,
}

#[derive(Serialize)]
struct Document<'a> {
    name: &'a str,
    description: &'a str,
    default_credential: &'a Ref,
    credentials: Vec<CredentialDoc<'a>>,
    services: &'a [Service],
    packages: &'a [Package],
    substrates: &'a [Substrate],
    profiles: Cow<'a, [Profile]>,
}

#[derive(Serialize)]
struct CredentialDoc<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: CredentialKind,
    username: &'a str,
    secret: SecretDoc<'a>,
    default: bool,
}

#[derive(Serialize)]
struct SecretDoc<'a> {
    attrs: SecretAttrs,
    value: &'a str,
}

#[derive(Serialize)]
struct SecretAttrs {
    is_secret_modified: bool,
}

impl<'a> CredentialDoc<'a> {
    fn new(credential: &'a Credential, redact: bool) -> Self {
        let value = if redact {
            constants::REDACTED
        } else {
            credential.secret().expose()
        };

        Self {
            name: credential.name(),
            kind: credential.kind(),
            username: credential.username(),
            secret: SecretDoc {
                attrs: SecretAttrs {
                    is_secret_modified: true,
                },
                value,
            },
            default: credential.is_default(),
        }
    }
}

/// Render a resolved blueprint to JSON, with a trailing newline.
///
/// # Errors
///
/// Returns `Error::Render` if serialization fails.
pub fn render(blueprint: &Blueprint, options: RenderOptions) -> Result<String> {
    let document = Document {
        name: blueprint.name(),
        description: blueprint.description(),
        default_credential: blueprint.default_credential(),
        credentials: blueprint
            .credentials()
            .map(|c| CredentialDoc::new(c, options.redact))
            .collect(),
        services: blueprint.services(),
        packages: blueprint.packages(),
        substrates: blueprint.substrates(),
        profiles: if options.redact {
            Cow::Owned(blueprint.profiles().iter().map(redact_profile).collect())
        } else {
            Cow::Borrowed(blueprint.profiles())
        },
    };

    let mut out = if options.compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };
    out.push('\n');

    debug!(
        bytes = out.len(),
        compact = options.compact,
        redact = options.redact,
        "blueprint rendered"
    );
    Ok(out)
}

/// Write a rendered document to `path`, readable by the owner only.
///
/// The document carries credential secrets in plain text, so the file is
/// created with mode `0o600` and an existing file is narrowed to it.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be written.
pub fn write(path: &Path, rendered: &str) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        // mode() only applies on creation
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(rendered.as_bytes())?;
        file.flush()?;
    }

    #[cfg(not(unix))]
    {
        let mut file = std::fs::File::create(path)?;
        file.write_all(rendered.as_bytes())?;
        file.flush()?;
    }

    debug!(path = %path.display(), "blueprint written");
    Ok(())
}

/// Copy of `profile` with every secret variable value masked
fn redact_profile(profile: &Profile) -> Profile {
    let mut profile = profile.clone();
    let actions = profile.actions.iter_mut().flat_map(|a| a.variables.iter_mut());
    for variable in profile.variables.iter_mut().chain(actions) {
        if variable.is_secret() {
            variable.value = constants::REDACTED.to_string();
        }
    }
    profile
}

/// Lowercase hex SHA-256 of a rendered document
pub fn digest(rendered: &str) -> String {
    let hash = Sha256::digest(rendered.as_bytes());
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}
