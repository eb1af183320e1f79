//! Logging initialization.

use std::io;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    filter::Directive,
    fmt::{layer, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use super::types::{LoggerConfig, StdoutConfig};

fn parse_directives(config: &LoggerConfig) -> Vec<Directive> {
    config
        .directives
        .iter()
        .filter_map(|directive| match directive.parse() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                eprintln!("ignoring invalid log directive {directive:?}: {err}");
                None
            }
        })
        .collect()
}

/// INFO by default, overridable through `RUST_LOG`.
fn build_filter(directives: &[Directive]) -> EnvFilter {
    directives.iter().cloned().fold(
        EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .from_env_lossy(),
        EnvFilter::add_directive,
    )
}

fn console_writer(config: &StdoutConfig) -> BoxMakeWriter {
    if config.use_stderr {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    }
}

/// Initializes the logging subsystem with the provided config.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LoggerConfig) -> Result<(), TryInitError> {
    let directives = parse_directives(&config);

    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_writer(console_writer(&config.stdout_config))
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(build_filter(&directives))
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(console_writer(&config.stdout_config))
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(build_filter(&directives))
            .boxed()
    };

    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(build_filter(&directives))
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(build_filter(&directives))
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        file_logging = config.file_logging_config.is_some(),
        "logging initialized"
    );
    Ok(())
}
