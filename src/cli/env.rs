//! Env command - show resolved blueprint variables.

use crate::cli::output;
use crate::core::context::{Context, Options};
use crate::error::Result;

/// Print every resolved variable with its source.
pub fn execute(options: &Options, json: bool) -> Result<()> {
    let ctx = Context::init(options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.vars())?);
        return Ok(());
    }

    output::header("Variables");
    for (key, resolved) in ctx.vars().iter() {
        output::kv(
            key,
            format!(
                "{} {}",
                resolved.value,
                output::dimmed(&format!("({})", resolved.source))
            ),
        );
    }

    Ok(())
}
