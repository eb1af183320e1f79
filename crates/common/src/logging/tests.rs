//! Unit tests for the logging subsystem.

use std::fs;

use tracing_subscriber::fmt::format::FmtSpan;

use super::{manager::init, types::*, Rotation};

#[test]
fn test_logger_config_builder_pattern() {
    let config = LoggerConfig::new("test-service".to_string())
        .with_json_logging(true)
        .with_fmt_span(FmtSpan::CLOSE)
        .with_stderr(true)
        .with_directive("txgate_approval=debug");

    assert_eq!(config.service_name, "test-service");
    assert!(config.stdout_config.json_format);
    assert_eq!(config.stdout_config.fmt_span, FmtSpan::CLOSE);
    assert!(config.stdout_config.use_stderr);
    assert_eq!(config.directives, vec!["txgate_approval=debug".to_string()]);
    assert!(config.file_logging_config.is_none());
}

#[test]
fn test_file_logging_config_defaults() {
    let config = FileLoggingConfig::new("/tmp/logs".into(), "txgate".to_string());

    assert_eq!(config.file_name_prefix, "txgate");
    assert_eq!(config.rotation, Rotation::DAILY);
    assert!(!config.json_format);

    let config = config
        .with_rotation(Rotation::HOURLY)
        .with_json_format(true);
    assert_eq!(config.rotation, Rotation::HOURLY);
    assert!(config.json_format);
}

#[test]
fn test_default_logger_config() {
    let config = LoggerConfig::default();

    assert_eq!(config.service_name, "(txgate)");
    assert!(!config.stdout_config.json_format);
    assert!(config.directives.is_empty());
}

// Installs the global subscriber, so this is the only test that may call `init`.
#[test]
fn test_init_creates_log_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let file_config = FileLoggingConfig::new(dir.path().to_path_buf(), "txgate-test".to_string())
        .with_rotation(Rotation::NEVER);
    let config = LoggerConfig::new("test-service".to_string())
        .with_file_logging(file_config)
        .with_directive("not a directive ===");

    init(config.clone()).unwrap();
    tracing::info!("hello from the logging test");

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(names.iter().any(|name| name.starts_with("txgate-test")));

    assert!(init(config).is_err());
}
