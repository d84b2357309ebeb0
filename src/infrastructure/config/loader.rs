use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::infrastructure::logging::logger::parse_log_level;

/// Largest page size the v3 API accepts
const MAX_PER_PAGE: u32 = 5000;

/// Variables the platform sets for a pushed application, or that operators
/// set by hand, mapped onto configuration keys
const PLATFORM_ENV_VARS: [(&str, &str); 3] = [
    ("CF_API", "platform.api_endpoint"),
    ("CF_USER", "platform.username"),
    ("CF_PASSWORD", "platform.password"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Failed to read VCAP_APPLICATION: {0}")]
    InvalidVcapApplication(String),

    #[error("Invalid PORT: {0}")]
    InvalidPort(String),

    #[error("Platform API endpoint is not configured (set CF_API or VCAP_APPLICATION)")]
    MissingEndpoint,

    #[error("Invalid platform API endpoint: {0}. Must be an http(s) URL")]
    InvalidEndpoint(String),

    #[error("Missing required credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid max_concurrency: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid per_page: {0}. Must be between 1 and {MAX_PER_PAGE}")]
    InvalidPageSize(u32),

    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid {0}: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Deserialize)]
struct VcapApplication {
    #[serde(default)]
    cf_api: Option<String>,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML file given on the command line (optional)
    /// 3. `cf_api` from `VCAP_APPLICATION`
    /// 4. `CF_API`, `CF_USER`, `CF_PASSWORD`, `PORT`
    /// 5. `PLACEMENT_*` variables, nested with `__`
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let config: Config = Self::figment(path)?.extract().map_err(Box::new)?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Assemble the provider stack without extracting it
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        if let Some(api) = vcap_api_endpoint()? {
            figment = figment.merge(Serialized::default("platform.api_endpoint", api));
        }

        for (var, key) in PLATFORM_ENV_VARS {
            if let Some(value) = env_value(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        if let Some(port) = env_value("PORT") {
            let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            figment = figment.merge(Serialized::default("server.port", port));
        }

        Ok(figment.merge(Env::prefixed("PLACEMENT_").split("__")))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let platform = &config.platform;

        let endpoint = platform
            .api_endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
        }

        if platform.username.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingCredential("CF_USER"));
        }
        if platform.password.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MissingCredential("CF_PASSWORD"));
        }

        if platform.rate_limit_rps.is_nan() || platform.rate_limit_rps <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(platform.rate_limit_rps));
        }

        if platform.per_page == 0 || platform.per_page > MAX_PER_PAGE {
            return Err(ConfigError::InvalidPageSize(platform.per_page));
        }

        if platform.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("platform.timeout_secs"));
        }

        if config.report.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("report.timeout_secs"));
        }

        if config.report.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(config.report.max_concurrency));
        }

        if config.report.process_type.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "report.process_type cannot be empty".to_string(),
            ));
        }

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

/// Non-empty value of an environment variable
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn vcap_api_endpoint() -> Result<Option<String>, ConfigError> {
    let Some(raw) = env_value("VCAP_APPLICATION") else {
        return Ok(None);
    };

    let vcap: VcapApplication = serde_json::from_str(&raw)
        .map_err(|e| ConfigError::InvalidVcapApplication(e.to_string()))?;
    Ok(vcap.cf_api.filter(|api| !api.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{LogFormat, PlatformConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Every variable the loader reads, cleared unless a test sets it
    const CLEARED: [(&str, Option<&str>); 5] = [
        ("VCAP_APPLICATION", None),
        ("CF_API", None),
        ("CF_USER", None),
        ("CF_PASSWORD", None),
        ("PORT", None),
    ];

    fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
        let mut all: Vec<(&str, Option<&str>)> = CLEARED
            .iter()
            .filter(|(name, _)| !vars.iter().any(|(v, _)| v == name))
            .copied()
            .collect();
        all.extend_from_slice(vars);
        temp_env::with_vars(all, f)
    }

    fn valid_config() -> Config {
        Config {
            platform: PlatformConfig {
                api_endpoint: Some("https://api.sys.example.com".to_string()),
                username: Some("admin".to_string()),
                password: Some("secret".to_string()),
                ..PlatformConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report.process_type, "web");
        assert_eq!(config.report.max_concurrency, 8);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.platform.per_page, 50);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_defaults_lack_credentials() {
        let result = ConfigLoader::validate(&Config::default());
        assert!(matches!(result, Err(ConfigError::MissingEndpoint)));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_user_is_fatal() {
        let mut config = valid_config();
        config.platform.username = Some(String::new());

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingCredential("CF_USER"))
        ));
    }

    #[test]
    fn test_missing_password_is_fatal() {
        let mut config = valid_config();
        config.platform.password = None;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingCredential("CF_PASSWORD"))
        ));
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        let mut config = valid_config();
        config.platform.api_endpoint = Some("api.sys.example.com".to_string());

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let mut config = valid_config();
        config.report.max_concurrency = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidConcurrency(0))
        ));
    }

    #[test]
    fn test_validate_page_size_bounds() {
        let mut config = valid_config();
        config.platform.per_page = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPageSize(0))
        ));

        config.platform.per_page = 5001;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPageSize(5001))
        ));
    }

    #[test]
    fn test_validate_rate_limit() {
        let mut config = valid_config();
        config.platform.rate_limit_rps = 0.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(_))
        ));

        config.platform.rate_limit_rps = f64::NAN;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(_))
        ));
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = valid_config();
        config.report.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout("report.timeout_secs"))
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_platform_env_vars() {
        let config = with_env(
            &[
                ("CF_API", Some("https://api.sys.example.com")),
                ("CF_USER", Some("admin")),
                ("CF_PASSWORD", Some("12345")),
                ("PORT", Some("9090")),
            ],
            || ConfigLoader::load(None),
        )
        .unwrap();

        assert_eq!(config.platform.api_endpoint.as_deref(), Some("https://api.sys.example.com"));
        assert_eq!(config.platform.username.as_deref(), Some("admin"));
        assert_eq!(config.platform.password.as_deref(), Some("12345"));
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_vcap_application_supplies_endpoint() {
        let config = with_env(
            &[
                ("VCAP_APPLICATION", Some(r#"{"cf_api": "https://api.cf.internal", "name": "placements"}"#)),
                ("CF_USER", Some("admin")),
                ("CF_PASSWORD", Some("secret")),
            ],
            || ConfigLoader::load(None),
        )
        .unwrap();

        assert_eq!(config.platform.api_endpoint.as_deref(), Some("https://api.cf.internal"));
    }

    #[test]
    fn test_invalid_vcap_application_is_fatal() {
        let result = with_env(&[("VCAP_APPLICATION", Some("{not json"))], || {
            ConfigLoader::load(None)
        });

        assert!(matches!(result, Err(ConfigError::InvalidVcapApplication(_))));
    }

    #[test]
    fn test_missing_credentials_from_env() {
        let result = with_env(&[("CF_API", Some("https://api.sys.example.com"))], || {
            ConfigLoader::load(None)
        });

        assert!(matches!(result, Err(ConfigError::MissingCredential("CF_USER"))));
    }

    #[test]
    fn test_invalid_port() {
        let result = with_env(&[("PORT", Some("eighty"))], || ConfigLoader::load(None));
        assert!(matches!(result, Err(ConfigError::InvalidPort(port)) if port == "eighty"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = with_env(&[], || {
            ConfigLoader::load(Some(Path::new("/nonexistent/placement.yaml")))
        });
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }

    #[test]
    fn test_yaml_file_then_env_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "platform:\n  api_endpoint: https://api.from-file.example.com\n  username: file-user\n  password: file-pass\n  per_page: 200\nreport:\n  max_concurrency: 2\nlogging:\n  format: json"
        )
        .unwrap();
        file.flush().unwrap();

        let config = with_env(
            &[
                ("CF_USER", Some("env-user")),
                ("PLACEMENT_REPORT__MAX_CONCURRENCY", Some("16")),
            ],
            || ConfigLoader::load(Some(file.path())),
        )
        .unwrap();

        assert_eq!(
            config.platform.api_endpoint.as_deref(),
            Some("https://api.from-file.example.com")
        );
        assert_eq!(config.platform.username.as_deref(), Some("env-user"), "CF_USER beats the file");
        assert_eq!(config.platform.password.as_deref(), Some("file-pass"));
        assert_eq!(config.platform.per_page, 200);
        assert_eq!(config.report.max_concurrency, 16, "PLACEMENT_* wins over everything");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_written_config_loads_back() {
        let mut expected = valid_config();
        expected.platform.skip_tls_validation = true;
        expected.report.process_type = "worker".to_string();
        expected.server.port = 9443;
        expected.logging.format = LogFormat::Json;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_yaml::to_string(&expected).unwrap().as_bytes())
            .unwrap();
        file.flush().unwrap();

        let config = with_env(&[], || ConfigLoader::load(Some(file.path()))).unwrap();

        assert!(config.platform.skip_tls_validation);
        assert_eq!(config.report.process_type, "worker");
        assert_eq!(config.server.port, 9443);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.platform.password.as_deref(), Some("secret"));
    }
}
