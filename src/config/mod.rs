//! Configuration loading and validation.
//!
//! Configuration is read from a TOML file. Every section has sensible
//! defaults, so a missing config file is not an error; the tool then runs
//! against `reaper.db` in the working directory with compact logging.

mod database;
mod logging;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::DatabaseConfig;
pub use logging::{LogFormat, LogLevel, LoggingConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level configuration for the reaper.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ReaperConfig {
    /// Database holding the execution history to purge.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReaperConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ReaperConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReaperConfig::from_str("").unwrap();
        assert_eq!(config.database.path, "reaper.db");
        assert!(config.database.run_migrations);
        assert!(matches!(config.logging.format, LogFormat::Compact));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [database]
            path = "/var/lib/reaper/history.db"
            create_if_missing = false
            run_migrations = false
            max_connections = 2

            [logging]
            level = "debug"
            format = "json"
            filter = "sqlx=warn"
        "#;
        let config = ReaperConfig::from_str(toml).unwrap();
        assert_eq!(config.database.path, "/var/lib/reaper/history.db");
        assert!(!config.database.create_if_missing);
        assert!(!config.database.run_migrations);
        assert_eq!(config.database.max_connections, 2);
        assert!(matches!(config.logging.level, LogLevel::Debug));
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.filter.as_deref(), Some("sqlx=warn"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let toml = r#"
            [database]
            path = "reaper.db"
            flavour = "vanilla"
        "#;
        assert!(ReaperConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_empty_database_path_is_rejected() {
        let toml = r#"
            [database]
            path = ""
        "#;
        let err = ReaperConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
