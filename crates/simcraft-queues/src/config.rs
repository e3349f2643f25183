//! Queue configuration.

use std::fmt;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// An error returned when a queue configuration can not be loaded or is invalid.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file can not be read.
    Io(std::io::Error),
    /// The configuration is not a valid YAML document of the expected shape.
    Parse(serde_yaml::Error),
    /// The configuration values are inconsistent.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "can't read queue config: {}", e),
            ConfigError::Parse(e) => write!(f, "can't parse queue config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "invalid queue config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Construction-time settings of a queue.
///
/// Implements `Default` so that you can create default config and change only the fields you need.
/// Can also be read from YAML:
///
/// ```yaml
/// name: checkout
/// capacity: 10
/// default_priority: 1.5
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueConfig {
    /// Queue name, generated automatically if not set.
    #[serde(default)]
    pub name: Option<String>,
    /// Maximum number of queued items, 0 means unlimited.
    #[serde(default)]
    pub capacity: usize,
    /// Priority assigned to items of a priority queue when no priority function is set.
    #[serde(default)]
    pub default_priority: f64,
}

impl QueueConfig {
    /// Creates config of unnamed queue with specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Sets queue name.
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets queue capacity.
    pub fn set_capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /// Sets default item priority.
    pub fn set_default_priority(&mut self, priority: f64) -> &mut Self {
        self.default_priority = priority;
        self
    }

    /// Parses config from YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads config from YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_reader(File::open(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config values are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("queue name is empty".to_string()));
            }
        }
        if !self.default_priority.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "default priority must be finite, got {}",
                self.default_priority
            )));
        }
        Ok(())
    }
}
