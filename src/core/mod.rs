//! Core library components.
//!
//! Resolution of variables, secrets and credentials, the topology graph and
//! its rendering. Nothing here prints; the CLI owns all output.

pub mod config;
pub mod constants;
pub mod context;
pub mod credentials;
pub mod document;
pub mod env;
pub mod hadoop;
pub mod provider;
pub mod secrets;
pub mod topology;
pub mod validation;
