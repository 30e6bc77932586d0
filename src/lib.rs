//! Edgeprint - Assemble cluster blueprints for an orchestration platform.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── compile       # Emit the blueprint document
//! │   ├── env           # Show resolved variables
//! │   ├── check         # Lint and fingerprint
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # ~/.edgeprint/config.toml and project paths
//!     ├── env           # .env parsing and variable resolution
//!     ├── secrets       # Secret files by name
//!     ├── credentials   # Named credentials, one default
//!     ├── provider      # YAML provider specs
//!     ├── context       # Everything read from outside, gathered once
//!     ├── topology/     # Graph nodes, actions, reference resolution
//!     ├── hadoop        # The Hadoop master/slave blueprint
//!     ├── document      # Deterministic JSON rendering
//!     └── validation    # Non-fatal lints
//! ```
//!
//! # Example
//!
//! ```no_run
//! use edgeprint::core::context::{Context, Options};
//! use edgeprint::core::document::{self, RenderOptions};
//! use edgeprint::core::hadoop;
//!
//! # fn main() -> edgeprint::error::Result<()> {
//! let ctx = Context::init(&Options::new("blueprint"))?;
//! let blueprint = hadoop::assemble(&ctx)?;
//! print!("{}", document::render(&blueprint, RenderOptions::default())?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
