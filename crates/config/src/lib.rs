//! TOML configuration for the approval pipeline.

mod config;
mod errors;

pub use config::*;
pub use errors::ConfigError;
