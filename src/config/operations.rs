//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{Result, RouteError};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(RouteError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RouteError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config, falling back to defaults when the file does not exist.
    ///
    /// A file that exists but is invalid is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)
            .map_err(|e| RouteError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        // Empty or comment-only files mean "all defaults".
        let config: Config = if value.is_null() {
            Config::default()
        } else {
            serde_yaml::from_value(value).map_err(|e| {
                RouteError::ConfigError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RouteError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `codex.command` must parse to at least one word
    /// - `codex.timeout_seconds` must be positive
    /// - `tracker.max_tasks` must be positive
    pub fn validate(&self) -> Result<()> {
        let words = shell_words::split(&self.codex.command).map_err(|e| {
            RouteError::ConfigError(format!(
                "config validation failed: codex.command '{}' cannot be parsed: {}",
                self.codex.command, e
            ))
        })?;
        if words.is_empty() {
            return Err(RouteError::ConfigError(
                "config validation failed: codex.command must not be empty".to_string(),
            ));
        }

        if self.codex.timeout_seconds == 0 {
            return Err(RouteError::ConfigError(
                "config validation failed: codex.timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if self.tracker.max_tasks == 0 {
            return Err(RouteError::ConfigError(
                "config validation failed: tracker.max_tasks must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
