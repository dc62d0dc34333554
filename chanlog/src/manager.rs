use std::{path::Path, sync::Arc};

use chanlog_core::{CHANLOG_ENV, Context, Error, Level, Logger, Result};
use indexmap::IndexSet;

use crate::{
    config::{ConfigError, LogConfig},
    driver::DriverTable,
    group::Groups,
    proxy::LoggerProxy,
    registry::Registry,
};

/// What a log call does with a level outside of the eight standard ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPolicy {
    /// Fails with [`Error::InvalidLevel`].
    Strict,
    /// Forwards the level verbatim.
    Lenient,
}

impl LevelPolicy {
    fn from_flag(strict: bool) -> Self {
        if strict {
            LevelPolicy::Strict
        } else {
            LevelPolicy::Lenient
        }
    }

    pub fn check(self, level: &Level) -> Result<()> {
        match (self, level) {
            (LevelPolicy::Strict, Level::Custom(name)) => Err(Error::InvalidLevel(name.clone())),
            _ => Ok(()),
        }
    }
}

/// Logging facade over named channels.
///
/// Calls made through the [`Logger`] methods go to the default channel
/// (or default channels). [`LogManager::channel`], [`LogManager::channels`]
/// and [`LogManager::group`] pick channels explicitly.
#[derive(Debug)]
pub struct LogManager {
    default: Vec<String>,
    policy: LevelPolicy,
    groups: Groups,
    registry: Registry,
}

impl LogManager {
    /// Uses the built-in drivers.
    pub fn new(config: LogConfig) -> Self {
        Self::with_drivers(config, DriverTable::builtin())
    }

    pub fn with_drivers(config: LogConfig, drivers: DriverTable) -> Self {
        let LogConfig {
            default,
            strict_levels,
            loggers,
            groups,
        } = config;
        Self {
            default: default.map(|d| d.names()).unwrap_or_default(),
            policy: LevelPolicy::from_flag(strict_levels.unwrap_or(CHANLOG_ENV.STRICT_LEVELS)),
            groups: Groups::new(groups),
            registry: Registry::new(loggers, drivers),
        }
    }

    /// Loads the configuration file at `path` and uses the built-in drivers.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::new(LogConfig::from_path(path)?))
    }

    pub fn level_policy(&self) -> LevelPolicy {
        self.policy
    }

    pub fn set_level_policy(&mut self, policy: LevelPolicy) {
        self.policy = policy;
    }

    pub fn default_channels(&self) -> &[String] {
        &self.default
    }

    /// Binds a logger factory to `name`, bypassing configuration.
    pub fn bind<L, F>(&self, name: &str, factory: F)
    where
        L: Logger + 'static,
        F: Fn() -> L + Send + Sync + 'static,
    {
        self.registry.bind(name, factory);
    }

    /// The default channel, or a proxy over the default channels.
    pub fn driver(&self) -> Result<Arc<dyn Logger>> {
        if self.default.is_empty() {
            return Err(Error::NoDefaultConfigured);
        }
        self.select(self.default.iter().map(String::as_str))
    }

    pub fn channel(&self, name: &str) -> Result<Arc<dyn Logger>> {
        self.registry.resolve(name)
    }

    /// A proxy over `names`, duplicates removed. An empty list selects the
    /// default channels.
    pub fn channels<S: AsRef<str>>(&self, names: &[S]) -> Result<Arc<dyn Logger>> {
        if names.is_empty() {
            return self.driver();
        }
        self.select(names.iter().map(AsRef::as_ref))
    }

    /// A proxy over the members of `groups`. An empty list selects the
    /// default channels.
    pub fn group<S: AsRef<str>>(&self, groups: &[S]) -> Result<Arc<dyn Logger>> {
        let names = self.groups.expand(groups)?;
        self.channels(&names)
    }

    /// Resolves every configured channel, stopping at the first failure.
    pub fn resolve_all(&self) -> Result<Vec<String>> {
        let names = self.registry.configured();
        for name in &names {
            self.registry.resolve(name)?;
        }
        Ok(names.into_iter().map(String::from).collect())
    }

    /// Logs with a level given by name, checked against the level policy.
    pub fn log_str(&self, level: &str, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::from(level), message, context)
    }

    fn select<'a>(&self, names: impl Iterator<Item = &'a str>) -> Result<Arc<dyn Logger>> {
        let names: IndexSet<&str> = names.collect();
        let mut loggers = names
            .into_iter()
            .map(|name| self.registry.resolve(name))
            .collect::<Result<Vec<_>>>()?;
        if loggers.len() == 1 {
            Ok(loggers.remove(0))
        } else {
            Ok(Arc::new(LoggerProxy::new(loggers)))
        }
    }
}

impl Logger for LogManager {
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()> {
        self.policy.check(level)?;
        self.driver()?.log(level, message, context)
    }
    fn emergency(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.emergency(message, context)
    }
    fn alert(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.alert(message, context)
    }
    fn critical(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.critical(message, context)
    }
    fn error(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.error(message, context)
    }
    fn warning(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.warning(message, context)
    }
    fn notice(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.notice(message, context)
    }
    fn info(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.info(message, context)
    }
    fn debug(&self, message: &str, context: &Context) -> Result<()> {
        self.driver()?.debug(message, context)
    }
}
