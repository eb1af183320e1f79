use std::{
    fs,
    path::{Path, PathBuf},
};

use bitcoin::Network;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default consent window width in pixels.
const DEFAULT_WINDOW_WIDTH: u32 = 357;

/// Default consent window height in pixels.
const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Default prefix for log file names.
const DEFAULT_LOG_FILE_PREFIX: &str = "txgate";

fn default_network() -> Network {
    Network::Regtest
}

fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}

fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}

/// Only Linux window managers emit the transient "nothing focused" event.
fn default_ignore_transient_blur() -> bool {
    cfg!(target_os = "linux")
}

fn default_log_file_prefix() -> String {
    DEFAULT_LOG_FILE_PREFIX.to_owned()
}

/// Geometry of the consent window when the caller does not pass its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            left: None,
            top: None,
        }
    }
}

/// How the broker reacts to focus changes while an approval is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Reject the pending approval when focus moves away from the consent window.
    /// Off by default, which leaves focus events purely informational.
    #[serde(default)]
    pub auto_reject_on_blur: bool,

    /// Ignore the "no window focused" event some platforms fire just before focus lands on
    /// a newly opened window.
    #[serde(default = "default_ignore_transient_blur")]
    pub ignore_transient_blur: bool,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            auto_reject_on_blur: false,
            ignore_transient_blur: default_ignore_transient_blur(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub focus: FocusConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Use JSON format for logs instead of compact format.
    #[serde(default)]
    pub json: bool,

    /// Directory path for file-based logging. File logging is off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(default = "default_log_file_prefix")]
    pub file_name_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            directory: None,
            file_name_prefix: default_log_file_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Network used to render addresses.
    #[serde(default = "default_network")]
    pub network: Network,

    #[serde(default)]
    pub broker: BrokerConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: default_network(),
            broker: BrokerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml_str(&config_str)
}
