//! Configuration system for SplitInit.
//!
//! Load router configuration from TOML or YAML to switch routing passes
//! and logging without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use splitinit_config::RouterConfig;
//!
//! let config = RouterConfig::from_toml_str(r#"
//!     stop_boundary = "Base"
//!     type_hint_routing = true
//!
//!     [log]
//!     level = "debug"
//!     categories = ["split", "chain"]
//! "#).unwrap();
//!
//! assert_eq!(config.stop_boundary.as_deref(), Some("Base"));
//! assert!(config.type_hint_routing);
//! assert!(config.broadcast_leftovers);
//! assert_eq!(config.log.level, "debug");
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use splitinit_config::RouterConfig;
//!
//! let config = RouterConfig::load("splitinit.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct RouterConfig {
    /// Name of the component at which ancestor walks stop. `None` walks up
    /// to the universal root.
    pub stop_boundary: Option<String>,

    /// Claim extra named values by parameter type hints.
    pub type_hint_routing: bool,

    /// Claim extra named values by the keys components declare they consume.
    pub declared_key_routing: bool,

    /// Copy unclaimed named values into parents that accept any name.
    pub broadcast_leftovers: bool,

    /// Copy sibling values into parents missing a required parameter.
    pub backfill_missing: bool,

    /// Invoke chain members directly when a chain head fails to bind.
    pub direct_fallback: bool,

    /// Log every routing decision at debug level.
    pub debug_prints: bool,

    /// Logging configuration.
    pub log: LogConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            stop_boundary: None,
            type_hint_routing: false,
            declared_key_routing: false,
            broadcast_leftovers: true,
            backfill_missing: true,
            direct_fallback: false,
            debug_prints: false,
            log: LogConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unknown log level or an
    /// empty stop boundary name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.stop_boundary.as_deref(), Some("")) {
            return Err(ConfigError::Invalid("stop_boundary must not be empty".into()));
        }
        self.log.validate()
    }

    /// Sets the stop boundary component.
    pub fn with_stop_boundary(mut self, name: impl Into<String>) -> Self {
        self.stop_boundary = Some(name.into());
        self
    }

    /// Enables or disables type-hint routing.
    pub fn with_type_hint_routing(mut self, enabled: bool) -> Self {
        self.type_hint_routing = enabled;
        self
    }

    /// Enables or disables declared-key routing.
    pub fn with_declared_key_routing(mut self, enabled: bool) -> Self {
        self.declared_key_routing = enabled;
        self
    }

    /// Enables or disables broadcasting of leftovers.
    pub fn with_broadcast_leftovers(mut self, enabled: bool) -> Self {
        self.broadcast_leftovers = enabled;
        self
    }

    /// Enables or disables sibling backfill.
    pub fn with_backfill_missing(mut self, enabled: bool) -> Self {
        self.backfill_missing = enabled;
        self
    }

    /// Enables or disables the direct-invocation fallback.
    pub fn with_direct_fallback(mut self, enabled: bool) -> Self {
        self.direct_fallback = enabled;
        self
    }

    /// Enables or disables debug output of routing decisions.
    pub fn with_debug_prints(mut self, enabled: bool) -> Self {
        self.debug_prints = enabled;
        self
    }

    /// Sets the logging configuration.
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// The log level actually in effect: `debug` when debug prints are on.
    pub fn effective_log_level(&self) -> &str {
        if self.debug_prints {
            "debug"
        } else {
            &self.log.level
        }
    }
}

/// Log levels accepted in [`LogConfig::level`].
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LogConfig {
    /// Minimum level of router events.
    pub level: String,

    /// Event categories to print. Empty prints every category.
    pub categories: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            categories: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Creates a log config for `level`, printing every category.
    pub fn new(level: impl Into<String>) -> Self {
        LogConfig {
            level: level.into(),
            categories: Vec::new(),
        }
    }

    /// Restricts printing to one more category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Returns true if events of `category` should be printed.
    pub fn allows(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == category)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!("unknown log level `{}`", self.level)))
        }
    }
}

#[cfg(test)]
mod tests;
