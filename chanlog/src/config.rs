use std::{collections::HashMap, fs, path::Path, str::FromStr};

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can not read log configuration")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML log configuration")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON log configuration")]
    Json(#[from] serde_json::Error),
    #[error("unsupported configuration format [{0}], expected .toml or .json")]
    UnsupportedFormat(String),
}

/// The channel or channels used when a call names none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DefaultChannels {
    One(String),
    Many(Vec<String>),
}

impl DefaultChannels {
    /// Configured names, empty entries dropped.
    pub fn names(&self) -> Vec<String> {
        match self {
            DefaultChannels::One(name) => vec![name.clone()],
            DefaultChannels::Many(names) => names.clone(),
        }
        .into_iter()
        .filter(|name| !name.is_empty())
        .collect()
    }
}

/// Settings of one named logger: the driver building it and the driver's
/// named parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl LoggerConfig {
    pub fn new(driver: &str) -> Self {
        Self {
            driver: Some(driver.to_string()),
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Facade configuration.
///
/// ```toml
/// default = "app"
/// strict_levels = true
///
/// [loggers.app]
/// driver = "file"
/// filename = "/tmp/app.log"
///
/// [loggers.console]
/// driver = "stdout"
///
/// [groups]
/// local = ["app", "console"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub default: Option<DefaultChannels>,
    #[serde(default)]
    pub strict_levels: Option<bool>,
    #[serde(default)]
    pub loggers: HashMap<String, LoggerConfig>,
    #[serde(default)]
    pub groups: HashMap<String, Vec<String>>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a `.toml` or `.json` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn with_default(self, name: &str) -> Self {
        Self {
            default: Some(DefaultChannels::One(name.to_string())),
            ..self
        }
    }

    pub fn with_defaults<S: AsRef<str>>(self, names: &[S]) -> Self {
        Self {
            default: Some(DefaultChannels::Many(
                names.iter().map(|n| n.as_ref().to_string()).collect(),
            )),
            ..self
        }
    }

    pub fn with_strict_levels(self, strict: bool) -> Self {
        Self {
            strict_levels: Some(strict),
            ..self
        }
    }

    pub fn with_logger(mut self, name: &str, config: LoggerConfig) -> Self {
        self.loggers.insert(name.to_string(), config);
        self
    }

    pub fn with_group<S: AsRef<str>>(mut self, name: &str, members: &[S]) -> Self {
        self.groups.insert(
            name.to_string(),
            members.iter().map(|m| m.as_ref().to_string()).collect(),
        );
        self
    }
}

impl FromStr for LogConfig {
    type Err = ConfigError;

    /// Parses TOML.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
