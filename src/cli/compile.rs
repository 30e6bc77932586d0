//! Compile command - assemble the blueprint and emit the document.

use std::io::Write;
use std::path::Path;

use crate::cli::output;
use crate::core::context::{Context, Options};
use crate::core::document::{self, RenderOptions};
use crate::core::hadoop;
use crate::error::Result;

/// Assemble and print (or write) the blueprint document.
pub fn execute(options: &Options, render: RenderOptions, out: Option<&Path>) -> Result<()> {
    let ctx = Context::init(options)?;
    let blueprint = hadoop::assemble(&ctx)?;
    let rendered = document::render(&blueprint, render)?;

    match out {
        Some(path) => {
            document::write(path, &rendered)?;
            output::success(&format!(
                "wrote {} to {}",
                blueprint.name(),
                output::path(&path.display().to_string())
            ));
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
