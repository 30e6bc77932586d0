//! Check command - assemble, lint and fingerprint the blueprint.

use crate::cli::output;
use crate::core::context::{Context, Options};
use crate::core::document::{self, RenderOptions};
use crate::core::{hadoop, validation};
use crate::error::Result;

/// Assemble the blueprint and report a summary, warnings and digest.
///
/// Lint warnings do not fail the command; assembly errors do.
pub fn execute(options: &Options) -> Result<()> {
    let ctx = Context::init(options)?;
    let blueprint = hadoop::assemble(&ctx)?;
    let rendered = document::render(&blueprint, RenderOptions::default())?;

    output::header(blueprint.name());
    output::kv("default credential", &blueprint.default_credential().name);
    output::kv("credentials", blueprint.credentials().count());
    output::kv("services", blueprint.services().len());
    output::kv("packages", blueprint.packages().len());
    output::kv("substrates", blueprint.substrates().len());
    output::kv("deployments", blueprint.deployments().count());
    output::kv("profiles", blueprint.profiles().len());
    output::kv("digest", document::digest(&rendered));

    let warnings = validation::lint(&blueprint);
    if warnings.is_empty() {
        output::success("no warnings");
    } else {
        for warning in &warnings {
            output::warn(&warning.to_string());
        }
    }

    Ok(())
}
