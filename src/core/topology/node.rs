//! Graph node types.

use serde::Serialize;

use super::action::{Action, Variable};
use super::Ref;
use crate::core::provider::ProviderSpec;

/// A service: the software role run on a substrate instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub name: String,
    pub description: String,
    pub actions: Vec<Action>,
}

/// Package contents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PackageKind {
    /// Installs one or more services through its `__install__` action
    #[serde(rename = "CUSTOM")]
    Custom {
        services: Vec<Ref>,
        actions: Vec<Action>,
    },
    /// A downloadable disk image
    #[serde(rename = "SUBSTRATE_IMAGE")]
    Image { image: ImageSource },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: PackageKind,
}

impl Package {
    /// Services this package installs
    pub fn services(&self) -> &[Ref] {
        match &self.kind {
            PackageKind::Custom { services, .. } => services,
            PackageKind::Image { .. } => &[],
        }
    }

    pub fn actions(&self) -> &[Action] {
        match &self.kind {
            PackageKind::Custom { actions, .. } => actions,
            PackageKind::Image { .. } => &[],
        }
    }
}

/// Check the runtime performs before treating an instance as usable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessProbe {
    pub disabled: bool,
    pub delay_secs: String,
    pub connection_type: String,
    pub connection_port: u16,
    pub credential: Ref,
}

impl ReadinessProbe {
    /// SSH on port 22 with no delay
    pub fn ssh(credential: Ref) -> Self {
        Self {
            disabled: false,
            delay_secs: "0".to_string(),
            connection_type: "SSH".to_string(),
            connection_port: 22,
            credential,
        }
    }
}

/// The VM definition backing a deployment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substrate {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub provider_spec: ProviderSpec,
    pub readiness_probe: ReadinessProbe,
}

/// A scalable group of packages on one substrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub name: String,
    pub description: String,
    /// Kept as declared; bounds are interpreted by the runtime
    pub min_replicas: String,
    pub max_replicas: String,
    pub packages: Vec<Ref>,
    pub substrate: Ref,
}

/// Deployments plus the actions an operator can run against them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub description: String,
    pub variables: Vec<Variable>,
    pub deployments: Vec<Deployment>,
    pub actions: Vec<Action>,
}
