//! Edgeprint - Assemble cluster blueprints for an orchestration platform.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use edgeprint::cli::output;
use edgeprint::cli::{execute, Cli};
use edgeprint::error::{ConfigError, Error, SecretError, SpecError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("EDGEPRINT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("edgeprint=debug")
        } else {
            EnvFilter::new("edgeprint=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Secret(SecretError::NotFound { name, .. }) => Some(format!(
                "create .local/{} in the project, or set [local] dir in ~/.edgeprint/config.toml",
                name
            )),
            Error::Config(ConfigError::ProjectNotFound(_)) => {
                Some("pass --dir <blueprint directory>".to_string())
            }
            Error::Spec(SpecError::NotFound(_)) => {
                Some("add ahv_spec.yaml to the project directory".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
