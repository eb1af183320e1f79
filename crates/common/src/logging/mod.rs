//! Logging subsystem built on `tracing-subscriber`.

pub mod manager;
pub mod types;

#[cfg(test)]
mod tests;

pub use manager::init;
pub use types::{FileLoggingConfig, LoggerConfig, StdoutConfig};

pub use tracing_appender::rolling::Rotation;
