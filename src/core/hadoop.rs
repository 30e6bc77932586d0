//! The Hadoop master/slave blueprint.
//!
//! Straight-line declaration of the topology: one master deployment, a
//! scalable slave deployment, both on AHV VMs built from `ahv_spec.yaml`, with
//! operator actions to scale the slaves in and out.

use tracing::debug;

use crate::core::constants;
use crate::core::context::Context;
use crate::core::credentials::{Credential, CredentialKind, CredentialRegistry};
use crate::core::topology::action::{Action, ScalingDirection, Task, Variable};
use crate::core::topology::node::ImageSource;
use crate::core::topology::{
    Blueprint, Deployment, Package, PackageKind, Profile, ReadinessProbe, Ref, Service,
    Substrate, Topology,
};
use crate::error::Result;

pub const BLUEPRINT_NAME: &str = "HadoopDslBlueprint";
pub const DEFAULT_CREDENTIAL: &str = "default cred";
pub const KEY_CREDENTIAL: &str = "Centos";

const MASTER: &str = "Hadoop_Master";
const SLAVE: &str = "Hadoop_Slave";
const SLAVE_DEPLOYMENT: &str = "Hadoop_Slave_Deployment";
const IMAGE_PACKAGE: &str = "centos_disk";

const DESCRIPTION: &str = "* [Hadoop Master Name Node Dashboard](http://@@{Hadoop_Master.address}@@:50070)
* [Hadoop Master Data Node Dashboard](http://@@{Hadoop_Master.address}@@:8088)
";

/// Profile variables passed straight through from the environment
const PROFILE_VARIABLES: &[&str] = &[
    "KAFKA_URL",
    "ZOOKEEPER_DATA_DIR",
    "KAFKA_LOG_DIRS",
    "NUMBER_OF_PARTITION",
    "NUMBER_OF_NODES",
];

/// Declare and resolve the blueprint.
///
/// # Errors
///
/// Fails on the first missing secret, script or provider spec, and on any
/// graph or credential inconsistency found while resolving.
pub fn assemble(ctx: &Context) -> Result<Blueprint> {
    declare(ctx)?.resolve()
}

/// Declare the topology without resolving references.
///
/// # Errors
///
/// Fails on the first missing secret, script or provider spec.
pub fn declare(ctx: &Context) -> Result<Topology> {
    let mut topology = Topology::new(BLUEPRINT_NAME, credentials(ctx)?);
    topology.description = DESCRIPTION.to_string();

    topology.services = vec![
        service(ctx, MASTER, "Hadoop_Master service", "ConfigureMaster", "StartMasterServices")?,
        service(ctx, SLAVE, "Hadoop_Slave service", "ConfigureSlave", "StartSlaveServices")?,
    ];

    topology.packages = vec![
        install_package(ctx, MASTER, "Hadoop Master package", "master")?,
        install_package(ctx, SLAVE, "Hadoop Slave package", "slave")?,
        Package {
            name: IMAGE_PACKAGE.to_string(),
            description: "CentOS disk image".to_string(),
            kind: PackageKind::Image {
                image: ImageSource {
                    source: ctx.var("CENTOS_IMAGE_SOURCE").to_string(),
                },
            },
        },
    ];

    topology.substrates = vec![
        substrate(ctx, MASTER, "Hadoop Master Substrate")?,
        substrate(ctx, SLAVE, "Hadoop Slave Substrate")?,
    ];

    topology.profiles = vec![profile(ctx)?];

    debug!(blueprint = BLUEPRINT_NAME, "topology declared");
    Ok(topology)
}

/// The blueprint's credentials.
///
/// `default cred` authenticates the readiness probe; `Centos` carries the
/// SSH private key.
///
/// # Errors
///
/// Fails if either secret is missing.
pub fn credentials(ctx: &Context) -> Result<CredentialRegistry> {
    let user = ctx.var("CENTOS_USER");
    let password = ctx.secret(ctx.var("DEFAULT_PASSWORD_NAME"))?;
    let private_key = ctx.secret(ctx.var("CENTOS_SSH_PRIVATE_KEY_NAME"))?;

    let mut registry = CredentialRegistry::new();
    registry.register(
        Credential::new(DEFAULT_CREDENTIAL, user, password, CredentialKind::Password)
            .default_for_blueprint(),
    )?;
    registry.register(Credential::new(
        KEY_CREDENTIAL,
        user,
        private_key,
        CredentialKind::Key,
    ))?;

    Ok(registry)
}

fn service(
    ctx: &Context,
    name: &str,
    description: &str,
    configure: &str,
    start: &str,
) -> Result<Service> {
    let target = Ref::service(name);
    Ok(Service {
        name: name.to_string(),
        description: description.to_string(),
        actions: vec![
            Action::new("__create__").task(ssh(ctx, configure, target.clone())?),
            Action::new("__start__").task(ssh(ctx, start, target)?),
        ],
    })
}

/// `scripts/<task>.sh` run over SSH
fn ssh(ctx: &Context, task: &str, target: Ref) -> Result<Task> {
    let filename = format!("scripts/{}.sh", task);
    let script = ctx.script(&filename)?;
    Ok(Task::ssh(task, filename, script, target))
}

fn install_package(ctx: &Context, service: &str, description: &str, role: &str) -> Result<Package> {
    let filename = format!("scripts/{}_PackageInstallTask.sh", role);
    let script = ctx.script(&filename)?;

    Ok(Package {
        name: format!("{}_Package", service),
        description: description.to_string(),
        kind: PackageKind::Custom {
            services: vec![Ref::service(service)],
            actions: vec![Action::new("__install__").task(Task::ssh(
                "PackageInstallTask",
                filename,
                script,
                Ref::service(service),
            ))],
        },
    })
}

fn substrate(ctx: &Context, service: &str, description: &str) -> Result<Substrate> {
    let mut spec = ctx.provider_spec(constants::PROVIDER_SPEC_FILE)?;
    spec.set_name(&format!("{}-@@{{calm_array_index}}@@-@@{{calm_time}}@@", service));
    spec.set_memory_gib(ctx.var("AHV_MEM"))?;
    spec.set_nic_subnet(ctx.var("AHV_NIC_NAME"));

    Ok(Substrate {
        name: format!("{}_AHV", service),
        description: description.to_string(),
        provider_type: "AHV_VM".to_string(),
        provider_spec: spec,
        readiness_probe: ReadinessProbe::ssh(Ref::credential(DEFAULT_CREDENTIAL)),
    })
}

fn profile(ctx: &Context) -> Result<Profile> {
    let mut variables: Vec<Variable> = PROFILE_VARIABLES
        .iter()
        .map(|name| Variable::string(*name, ctx.var(name)))
        .collect();

    let public_key = ctx.secret(ctx.var("CENTOS_SSH_PUBLIC_KEY_NAME"))?;
    variables.push(Variable::secret("CENTOS_PUBLIC_KEY", public_key.expose()));

    Ok(Profile {
        name: "Nutanix".to_string(),
        description: "Hadoop Profile".to_string(),
        variables,
        deployments: vec![
            Deployment {
                name: format!("{}_Deployment", MASTER),
                description: "Hadoop Master Deployment".to_string(),
                min_replicas: "1".to_string(),
                max_replicas: "1".to_string(),
                packages: vec![Ref::package(format!("{}_Package", MASTER))],
                substrate: Ref::substrate(format!("{}_AHV", MASTER)),
            },
            Deployment {
                name: SLAVE_DEPLOYMENT.to_string(),
                description: "Hadoop Slave Deployment".to_string(),
                min_replicas: "2".to_string(),
                max_replicas: "5".to_string(),
                packages: vec![Ref::package(format!("{}_Package", SLAVE))],
                substrate: Ref::substrate(format!("{}_AHV", SLAVE)),
            },
        ],
        actions: vec![
            scaling_action("ScaleOutSlaves", ScalingDirection::ScaleOut),
            scaling_action("ScaleInSlaves", ScalingDirection::ScaleIn),
        ],
    })
}

fn scaling_action(name: &str, direction: ScalingDirection) -> Action {
    Action::new(name)
        .variable(Variable::int("COUNT", "1").mandatory().runtime())
        .task(Task::scaling(
            name,
            direction,
            "@@{COUNT}@@",
            Ref::deployment(SLAVE_DEPLOYMENT),
        ))
}
