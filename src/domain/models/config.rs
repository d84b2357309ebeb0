use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Platform API endpoint and credentials
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Report pipeline tuning
    #[serde(default)]
    pub report: ReportConfig,

    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Platform API connection settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlatformConfig {
    /// Base URL of the Cloud Foundry API, e.g. `https://api.sys.example.com`
    #[serde(default)]
    pub api_endpoint: Option<String>,

    /// Username for the password grant
    #[serde(default)]
    pub username: Option<String>,

    /// Password for the password grant
    #[serde(default)]
    pub password: Option<String>,

    /// OAuth client id used for the password grant
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Accept invalid TLS certificates from the API and login server
    #[serde(default)]
    pub skip_tls_validation: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,

    /// Outbound requests per second across all report operations
    #[serde(default = "default_rate_limit_rps")]
    pub rate_limit_rps: f64,

    /// Page size requested when listing applications
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_client_id() -> String {
    "cf".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_rate_limit_rps() -> f64 {
    20.0
}

const fn default_per_page() -> u32 {
    50
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_endpoint: None,
            username: None,
            password: None,
            client_id: default_client_id(),
            skip_tls_validation: false,
            timeout_secs: default_request_timeout_secs(),
            rate_limit_rps: default_rate_limit_rps(),
            per_page: default_per_page(),
        }
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("api_endpoint", &self.api_endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("skip_tls_validation", &self.skip_tls_validation)
            .field("timeout_secs", &self.timeout_secs)
            .field("rate_limit_rps", &self.rate_limit_rps)
            .field("per_page", &self.per_page)
            .finish()
    }
}

/// Report pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReportConfig {
    /// Process type whose instances are reported
    #[serde(default = "default_process_type")]
    pub process_type: String,

    /// Maximum placement lookups in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Deadline for a whole report, in seconds
    #[serde(default = "default_report_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_process_type() -> String {
    "web".to_string()
}

const fn default_max_concurrency() -> usize {
    8
}

const fn default_report_timeout_secs() -> u64 {
    60
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            process_type: default_process_type(),
            max_concurrency: default_max_concurrency(),
            timeout_secs: default_report_timeout_secs(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for stderr
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for daily-rotated JSON log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
        }
    }
}
