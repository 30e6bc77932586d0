//! Blueprint lints.
//!
//! Resolution only guarantees that references point somewhere. These checks
//! catch things the runtime would reject or that are probably mistakes, and
//! are reported as warnings rather than errors.

use std::collections::BTreeSet;
use std::fmt;

use crate::core::topology::Blueprint;

/// A single lint finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Node the finding is about, e.g. `deployment 'Hadoop_Slave_Deployment'`
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

fn warning(subject: String, message: impl Into<String>) -> Warning {
    Warning {
        subject,
        message: message.into(),
    }
}

/// Run every lint over a resolved blueprint.
pub fn lint(blueprint: &Blueprint) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for deployment in blueprint.deployments() {
        let subject = format!("deployment '{}'", deployment.name);

        let min = parse_replicas(&deployment.min_replicas);
        let max = parse_replicas(&deployment.max_replicas);
        if min.is_none() {
            warnings.push(warning(
                subject.clone(),
                format!("min_replicas '{}' is not a whole number", deployment.min_replicas),
            ));
        }
        if max.is_none() {
            warnings.push(warning(
                subject.clone(),
                format!("max_replicas '{}' is not a whole number", deployment.max_replicas),
            ));
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                warnings.push(warning(
                    subject.clone(),
                    format!("min_replicas {} exceeds max_replicas {}", min, max),
                ));
            }
        }

        if deployment.packages.is_empty() {
            warnings.push(warning(subject, "has no packages"));
        }
    }

    let installed: BTreeSet<&str> = blueprint
        .packages()
        .iter()
        .flat_map(|p| p.services())
        .map(|r| r.name.as_str())
        .collect();
    for service in blueprint.services() {
        if !installed.contains(service.name.as_str()) {
            warnings.push(warning(
                format!("service '{}'", service.name),
                "is not installed by any package",
            ));
        }
    }

    warnings
}

fn parse_replicas(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}
