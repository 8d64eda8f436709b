//! Console configuration.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`MOSDASH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use mosdash::config::DashConfig;
//!
//! let config: DashConfig = toml::from_str(r#"
//! [polling]
//! interval_ms = 10000
//! "#).unwrap();
//! assert_eq!(config.polling.interval_ms, 10000);
//! assert_eq!(config.fetch.read_timeout_ms, 2000);
//! ```

pub mod error;
pub mod logging;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

use crate::advisor::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::advisor::DEFAULT_CONTEXT_LOG_LIMIT;
use crate::gateway::GatewayTimeouts;
use crate::orchestrator::{OrchestratorOptions, DEFAULT_LOG_WINDOW};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "mosdash.toml";

/// Where connection settings persist unless configured otherwise.
pub const DEFAULT_SETTINGS_FILE: &str = "mosdash-connection.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashConfig {
    pub settings: SettingsFileConfig,
    pub fetch: FetchConfig,
    pub polling: PollingConfig,
    pub advisor: AdvisorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFileConfig {
    pub path: PathBuf,
}

impl Default for SettingsFileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SETTINGS_FILE),
        }
    }
}

/// Per-call deadlines against the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub read_timeout_ms: u64,
    pub health_timeout_ms: u64,
    pub write_timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: 2000,
            health_timeout_ms: 1000,
            write_timeout_ms: 5000,
        }
    }
}

impl FetchConfig {
    pub fn timeouts(&self) -> GatewayTimeouts {
        GatewayTimeouts {
            read: Duration::from_millis(self.read_timeout_ms),
            health: Duration::from_millis(self.health_timeout_ms),
            write: Duration::from_millis(self.write_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
    /// Most recent log entries retained in state
    pub log_window: usize,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            log_window: DEFAULT_LOG_WINDOW,
        }
    }
}

impl PollingConfig {
    pub fn options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            poll_interval: Duration::from_millis(self.interval_ms),
            log_window: self.log_window,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_seconds: u64,
    /// Newest log entries included with a chat question
    pub context_log_limit: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_seconds: 60,
            context_log_limit: DEFAULT_CONTEXT_LOG_LIMIT,
        }
    }
}

impl DashConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Like [`load`](Self::load), but falls back to `mosdash.toml` in the
    /// working directory when present.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(Some(p)),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(Some(default))
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `MOSDASH_*` environment variable overrides.
    ///
    /// Invalid values are silently ignored (existing values are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("MOSDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOSDASH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(interval) = std::env::var("MOSDASH_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.polling.interval_ms = ms;
            }
        }
        if let Ok(path) = std::env::var("MOSDASH_SETTINGS_PATH") {
            if !path.is_empty() {
                self.settings.path = PathBuf::from(path);
            }
        }
        if let Ok(model) = std::env::var("MOSDASH_ADVISOR_MODEL") {
            self.advisor.model = model;
        }

        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("fetch.read_timeout_ms", self.fetch.read_timeout_ms),
            ("fetch.health_timeout_ms", self.fetch.health_timeout_ms),
            ("fetch.write_timeout_ms", self.fetch.write_timeout_ms),
            ("polling.interval_ms", self.polling.interval_ms),
            ("advisor.timeout_seconds", self.advisor.timeout_seconds),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::validation(field, "must be non-zero"));
            }
        }

        if self.polling.log_window == 0 {
            return Err(ConfigError::validation(
                "polling.log_window",
                "must be non-zero",
            ));
        }
        if self.advisor.context_log_limit > self.polling.log_window {
            return Err(ConfigError::validation(
                "advisor.context_log_limit",
                format!(
                    "cannot exceed polling.log_window ({})",
                    self.polling.log_window
                ),
            ));
        }
        if self.advisor.model.trim().is_empty() {
            return Err(ConfigError::validation(
                "advisor.model",
                "model cannot be empty",
            ));
        }

        Ok(())
    }

    /// Render as TOML, e.g. to seed a config file with `mosdash init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashConfig::default();
        assert_eq!(config.fetch.read_timeout_ms, 2000);
        assert_eq!(config.fetch.health_timeout_ms, 1000);
        assert_eq!(config.fetch.write_timeout_ms, 5000);
        assert_eq!(config.polling.interval_ms, 5000);
        assert_eq!(config.polling.log_window, 100);
        assert_eq!(config.advisor.model, "gemini-3-flash-preview");
        assert_eq!(config.advisor.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.advisor.context_log_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: DashConfig = toml::from_str(
            r#"
            [fetch]
            read_timeout_ms = 3000

            [advisor]
            model = "gemini-2.5-pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch.read_timeout_ms, 3000);
        assert_eq!(config.fetch.write_timeout_ms, 5000);
        assert_eq!(config.advisor.model, "gemini-2.5-pro");
        assert_eq!(config.advisor.timeout_seconds, 60);
    }

    #[test]
    fn test_load_none_returns_defaults() {
        let config = DashConfig::load(None).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashConfig::load(Some(Path::new("/nonexistent/mosdash.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[polling]\ninterval_ms = 2500\nlog_window = 50\n\n[settings]\npath = \"/tmp/conn.toml\""
        )
        .unwrap();

        let config = DashConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.polling.interval_ms, 2500);
        assert_eq!(config.polling.log_window, 50);
        assert_eq!(config.settings.path, PathBuf::from("/tmp/conn.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[polling\ninterval_ms = ").unwrap();

        let err = DashConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("MOSDASH_LOG_LEVEL", "debug");
        std::env::set_var("MOSDASH_LOG_FORMAT", "json");
        std::env::set_var("MOSDASH_POLL_INTERVAL_MS", "not-a-number");
        std::env::set_var("MOSDASH_ADVISOR_MODEL", "gemini-2.5-flash");

        let config = DashConfig::default().with_env_overrides();

        std::env::remove_var("MOSDASH_LOG_LEVEL");
        std::env::remove_var("MOSDASH_LOG_FORMAT");
        std::env::remove_var("MOSDASH_POLL_INTERVAL_MS");
        std::env::remove_var("MOSDASH_ADVISOR_MODEL");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.polling.interval_ms, 5000);
        assert_eq!(config.advisor.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = DashConfig::default();
        config.fetch.health_timeout_ms = 0;

        match config.validate() {
            Err(ConfigError::Validation { field, .. }) => {
                assert_eq!(field, "fetch.health_timeout_ms")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_context_limit_exceeds_window() {
        let mut config = DashConfig::default();
        config.polling.log_window = 5;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("advisor.context_log_limit"));
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = DashConfig::default();
        config.advisor.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeouts_and_options_conversion() {
        let config = DashConfig::default();
        let timeouts = config.fetch.timeouts();
        assert_eq!(timeouts.read, Duration::from_millis(2000));
        assert_eq!(timeouts.health, Duration::from_millis(1000));
        assert_eq!(timeouts.write, Duration::from_millis(5000));

        let options = config.polling.options();
        assert_eq!(options.poll_interval, Duration::from_secs(5));
        assert_eq!(options.log_window, 100);
    }

    #[test]
    fn test_to_toml_reparses() {
        let config = DashConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: DashConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
