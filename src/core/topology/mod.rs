//! Topology graph.
//!
//! Nodes refer to each other through [`Ref`]s (kind + name) rather than
//! direct links, so declaration order does not matter. [`Topology::resolve`]
//! registers every declared name first and checks every reference second,
//! producing a [`Blueprint`] whose references are known to resolve.

pub mod action;
pub mod node;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::core::credentials::{Credential, CredentialRegistry};
use crate::error::{GraphError, Result};

pub use action::{Action, Task, Variable};
pub use node::{Deployment, Package, PackageKind, Profile, ReadinessProbe, Service, Substrate};

/// Node kinds a reference can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Kind {
    #[serde(rename = "app_credential")]
    Credential,
    #[serde(rename = "app_service")]
    Service,
    #[serde(rename = "app_package")]
    Package,
    #[serde(rename = "app_substrate")]
    Substrate,
    #[serde(rename = "app_blueprint_deployment")]
    Deployment,
    #[serde(rename = "app_profile")]
    Profile,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Credential => "credential",
            Kind::Service => "service",
            Kind::Package => "package",
            Kind::Substrate => "substrate",
            Kind::Deployment => "deployment",
            Kind::Profile => "profile",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbolic reference to a node by kind and name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ref {
    pub kind: Kind,
    pub name: String,
}

impl Ref {
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn credential(name: impl Into<String>) -> Self {
        Self::new(Kind::Credential, name)
    }

    pub fn service(name: impl Into<String>) -> Self {
        Self::new(Kind::Service, name)
    }

    pub fn package(name: impl Into<String>) -> Self {
        Self::new(Kind::Package, name)
    }

    pub fn substrate(name: impl Into<String>) -> Self {
        Self::new(Kind::Substrate, name)
    }

    pub fn deployment(name: impl Into<String>) -> Self {
        Self::new(Kind::Deployment, name)
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// Declared names, per kind
#[derive(Debug, Default)]
pub struct Registry {
    names: BTreeMap<Kind, BTreeSet<String>>,
}

impl Registry {
    /// Declare a node name.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::DuplicateNode` if the name is already declared
    /// for that kind.
    pub fn declare(&mut self, kind: Kind, name: &str) -> std::result::Result<(), GraphError> {
        if !self.names.entry(kind).or_default().insert(name.to_string()) {
            return Err(GraphError::DuplicateNode {
                kind: kind.as_str(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn contains(&self, reference: &Ref) -> bool {
        self.names
            .get(&reference.kind)
            .is_some_and(|names| names.contains(&reference.name))
    }

    /// Check that `reference`, made by `from`, points at a declared node.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::UnresolvedReference` otherwise.
    pub fn check(&self, from: &str, reference: &Ref) -> std::result::Result<(), GraphError> {
        if self.contains(reference) {
            return Ok(());
        }
        Err(GraphError::UnresolvedReference {
            from: from.to_string(),
            kind: reference.kind.as_str(),
            name: reference.name.clone(),
        })
    }
}

/// The declared, unresolved graph
#[derive(Debug, Clone)]
pub struct Topology {
    pub name: String,
    pub description: String,
    pub credentials: CredentialRegistry,
    pub services: Vec<Service>,
    pub packages: Vec<Package>,
    pub substrates: Vec<Substrate>,
    pub profiles: Vec<Profile>,
}

impl Topology {
    pub fn new(name: impl Into<String>, credentials: CredentialRegistry) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            credentials,
            services: Vec::new(),
            packages: Vec::new(),
            substrates: Vec::new(),
            profiles: Vec::new(),
        }
    }

    /// Register every node, then check every reference.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::DuplicateNode` or `GraphError::UnresolvedReference`
    /// for a malformed graph, or a `CredentialError` when the credential set
    /// does not have exactly one default.
    pub fn resolve(self) -> Result<Blueprint> {
        let registry = self.register()?;

        for package in &self.packages {
            let from = format!("package '{}'", package.name);
            for service in package.services() {
                registry.check(&from, service)?;
            }
            for action in package.actions() {
                check_action(&registry, &from, action)?;
            }
        }

        for service in &self.services {
            let from = format!("service '{}'", service.name);
            for action in &service.actions {
                check_action(&registry, &from, action)?;
            }
        }

        for substrate in &self.substrates {
            let from = format!("substrate '{}'", substrate.name);
            registry.check(&from, &substrate.readiness_probe.credential)?;
        }

        for profile in &self.profiles {
            for deployment in &profile.deployments {
                let from = format!("deployment '{}'", deployment.name);
                for package in &deployment.packages {
                    registry.check(&from, package)?;
                }
                registry.check(&from, &deployment.substrate)?;
            }

            let from = format!("profile '{}'", profile.name);
            for action in &profile.actions {
                check_action(&registry, &from, action)?;
            }
        }

        let default = self.credentials.default_credential()?.name().to_string();
        debug!(
            blueprint = %self.name,
            services = self.services.len(),
            packages = self.packages.len(),
            substrates = self.substrates.len(),
            profiles = self.profiles.len(),
            "topology resolved"
        );

        Ok(Blueprint {
            topology: self,
            default_credential: Ref::credential(default),
        })
    }

    fn register(&self) -> std::result::Result<Registry, GraphError> {
        let mut registry = Registry::default();

        for credential in self.credentials.iter() {
            registry.declare(Kind::Credential, credential.name())?;
        }
        for service in &self.services {
            registry.declare(Kind::Service, &service.name)?;
        }
        for package in &self.packages {
            registry.declare(Kind::Package, &package.name)?;
        }
        for substrate in &self.substrates {
            registry.declare(Kind::Substrate, &substrate.name)?;
        }
        for profile in &self.profiles {
            registry.declare(Kind::Profile, &profile.name)?;
            for deployment in &profile.deployments {
                registry.declare(Kind::Deployment, &deployment.name)?;
            }
        }

        Ok(registry)
    }
}

fn check_action(
    registry: &Registry,
    from: &str,
    action: &Action,
) -> std::result::Result<(), GraphError> {
    let from = format!("{} action '{}'", from, action.name);
    for reference in action.refs() {
        registry.check(&from, reference)?;
    }
    Ok(())
}

/// A topology whose references all resolve
#[derive(Debug, Clone)]
pub struct Blueprint {
    topology: Topology,
    default_credential: Ref,
}

impl Blueprint {
    pub fn name(&self) -> &str {
        &self.topology.name
    }

    pub fn description(&self) -> &str {
        &self.topology.description
    }

    pub fn default_credential(&self) -> &Ref {
        &self.default_credential
    }

    pub fn credentials(&self) -> impl Iterator<Item = &Credential> {
        self.topology.credentials.iter()
    }

    pub fn services(&self) -> &[Service] {
        &self.topology.services
    }

    pub fn packages(&self) -> &[Package] {
        &self.topology.packages
    }

    pub fn substrates(&self) -> &[Substrate] {
        &self.topology.substrates
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.topology.profiles
    }

    /// All deployments across profiles
    pub fn deployments(&self) -> impl Iterator<Item = &Deployment> {
        self.topology
            .profiles
            .iter()
            .flat_map(|p| p.deployments.iter())
    }
}
