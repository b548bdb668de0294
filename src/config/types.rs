// Configuration types module
// Defines the node settings and their built-in defaults

use serde::Deserialize;

pub const DEFAULT_UUID: &str = "ee4ff9db-66e5-497c-b09b-748cbcf704d6";
pub const DEFAULT_SUB_PATH: &str = "sub";
pub const DEFAULT_XPATH: &str = "xhttp";
pub const DEFAULT_DOMAIN: &str = "dihao.maijiamei.deno.net";
pub const DEFAULT_NAME: &str = "Deno";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Main configuration structure
///
/// Resolved once at startup and never modified afterwards.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Node identity in dashed hex form
    pub uuid: String,
    /// Subscription path segment (served at `/{sub_path}`)
    pub sub_path: String,
    /// Handshake path segment (served at `/{xpath}/{uuid}`)
    pub xpath: String,
    /// Public domain advertised to clients
    pub domain: String,
    /// Display name shown by client applications
    pub name: String,
    pub port: u16,
    pub host: String,
    /// Tokio worker threads, CPU cores when unset
    #[serde(default)]
    pub workers: Option<usize>,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uuid: DEFAULT_UUID.to_string(),
            sub_path: DEFAULT_SUB_PATH.to_string(),
            xpath: DEFAULT_XPATH.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            name: DEFAULT_NAME.to_string(),
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            workers: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}
