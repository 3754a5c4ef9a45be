// Configuration types module
// Defines the startup configuration passed into the server

use serde::Deserialize;
use std::path::PathBuf;

/// Page the browser is pointed at on startup
pub const CHECKOUT_PAGE: &str = "checkout-professional.html";

/// Admin entry point, only announced on stdout
pub const ADMIN_PAGE: &str = "admin-orders.html";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base directory for every served path
    pub root_directory: PathBuf,
    /// URL opened in the default browser once the socket is bound.
    /// `None` disables the launch.
    #[serde(default)]
    pub auto_open_url: Option<String>,
    /// Tokio worker threads (CPU cores when unset)
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Configuration with the fixed defaults for `port` and `root_directory`
    /// and no browser launch. Used by embedders and tests.
    pub fn new(port: u16, root_directory: impl Into<PathBuf>) -> Self {
        Self {
            host: super::DEFAULT_HOST.to_string(),
            port,
            root_directory: root_directory.into(),
            auto_open_url: None,
            workers: None,
            logging: LoggingConfig::default(),
        }
    }

    /// Set the URL opened once the server is bound
    #[must_use]
    pub fn with_auto_open_url(mut self, url: impl Into<String>) -> Self {
        self.auto_open_url = Some(url.into());
        self
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_access_log")]
    pub access_log: bool,
    /// Access log format (common, combined, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: default_access_log(),
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}
