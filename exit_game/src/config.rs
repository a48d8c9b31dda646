//! Exit game configuration.
//!
//! Loaded from TOML via [`ExitGameConfig::from_toml_file`] or
//! [`ExitGameConfig::from_toml_str`]. Every field has a default, so an
//! empty file is a valid configuration.
//!
//! ```toml
//! operator = "operator"
//! log_format = "json"
//! log_level = "info"
//!
//! [params]
//! smt_depth = 64
//! challenge_window_secs = 7
//! child_block_interval = 1000
//! ```

use plasma_types::{AccountId, ProtocolParams};
use plasma_utils::{init_logging, LogFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to install logger: {0}")]
    Logging(#[from] plasma_utils::TryInitError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitGameConfig {
    /// Account allowed to submit child-block roots.
    #[serde(default = "default_operator")]
    pub operator: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub params: ProtocolParams,
}

fn default_operator() -> String {
    "operator".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl ExitGameConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.operator_account()?;
        self.params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Install the global subscriber with this config's format and level.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        init_logging(self.log_format, &self.log_level)?;
        Ok(())
    }

    pub fn operator_account(&self) -> Result<AccountId, ConfigError> {
        AccountId::new(self.operator.as_str()).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

impl Default for ExitGameConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            params: ProtocolParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ExitGameConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(ExitGameConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ExitGameConfig::from_toml_str("").unwrap();
        assert_eq!(config.operator, "operator");
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.params.smt_depth, 64);
        assert_eq!(config.params.challenge_window_secs, 7);
        assert_eq!(config.params.child_block_interval, 1000);
    }

    #[test]
    fn partial_toml_overrides() {
        let config = ExitGameConfig::from_toml_str(
            r#"
            operator = "op1"
            log_format = "json"

            [params]
            challenge_window_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(config.operator_account().unwrap().as_str(), "op1");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.params.challenge_window_secs, 600);
        assert_eq!(config.params.smt_depth, 64);
    }

    #[test]
    fn rejects_bad_depth_and_operator() {
        let err = ExitGameConfig::from_toml_str("[params]\nsmt_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = ExitGameConfig::from_toml_str("operator = \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = ExitGameConfig::from_toml_str("params = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[params]\nsmt_depth = 16").unwrap();
        let config = ExitGameConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.params.smt_depth, 16);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ExitGameConfig::from_toml_file("/nonexistent/plasma.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn installs_logger_from_config() {
        let config =
            ExitGameConfig::from_toml_str("log_format = \"json\"\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        config.init_logging().unwrap();
        assert!(matches!(config.init_logging(), Err(ConfigError::Logging(_))));
    }
}
