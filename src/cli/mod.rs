//! Command-line interface.

pub mod check;
pub mod compile;
pub mod completions;
pub mod env;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::context::Options;
use crate::core::document::RenderOptions;

/// Edgeprint - Assemble cluster blueprints for the orchestration platform.
#[derive(Parser)]
#[command(
    name = "edgeprint",
    about = "Assemble cluster blueprints from env files, local secrets and provider specs",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Blueprint project directory
    #[arg(long, global = true, env = "EDGEPRINT_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Env file, relative to the project directory
    #[arg(long, global = true, value_name = "RELPATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Project options from the global flags
    pub fn options(&self) -> Options {
        Options {
            dir: self.dir.clone(),
            env_file: self.env_file.clone(),
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Assemble the blueprint and print it as JSON
    Compile {
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
        /// Replace secret values with a placeholder
        #[arg(long)]
        redact: bool,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show resolved variables and where each value came from
    Env {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble the blueprint, report lint warnings and its digest
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> crate::error::Result<()> {
    let options = cli.options();

    match cli.command {
        Command::Compile {
            compact,
            redact,
            output,
        } => compile::execute(
            &options,
            RenderOptions { compact, redact },
            output.as_deref(),
        ),
        Command::Env { json } => env::execute(&options, json),
        Command::Check => check::execute(&options),
        Command::Completions { shell } => completions::execute(shell),
    }
}
