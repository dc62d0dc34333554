use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use chanlog_core::{Error, Logger, ResolveError, covers_standard_levels};
use once_cell::sync::OnceCell;

use crate::{config::LoggerConfig, driver::DriverTable};

type Binding = Arc<dyn Fn() -> Arc<dyn Logger> + Send + Sync>;
type Slot = Arc<OnceCell<Arc<dyn Logger>>>;

/// Lazily builds named loggers and keeps them for its whole lifetime.
///
/// Each name owns a slot that is filled at most once, even when several
/// threads resolve the same name concurrently. The slot map lock is only held
/// to look a slot up, never while a logger is built.
pub struct Registry {
    loggers: HashMap<String, LoggerConfig>,
    drivers: DriverTable,
    bindings: RwLock<HashMap<String, Binding>>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("loggers", &self.loggers)
            .field("drivers", &self.drivers)
            .finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new(loggers: HashMap<String, LoggerConfig>, drivers: DriverTable) -> Self {
        Self {
            loggers,
            drivers,
            bindings: RwLock::new(HashMap::new()),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Binds a factory under `name`, taking precedence over configuration.
    ///
    /// The factory runs on the first resolution of `name` only. Binding a
    /// name that is already resolved leaves the cached logger in place.
    pub fn bind<L, F>(&self, name: &str, factory: F)
    where
        L: Logger + 'static,
        F: Fn() -> L + Send + Sync + 'static,
    {
        if self.is_resolved(name) {
            log::warn!("log channel [{name}] is already resolved, binding ignored");
            return;
        }
        let binding: Binding = Arc::new(move || Arc::new(factory()) as Arc<dyn Logger>);
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), binding);
    }

    pub fn is_resolved(&self, name: &str) -> bool {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Names with a configuration entry, sorted.
    pub fn configured(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.loggers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the logger named `name`, building and caching it on first use.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Logger>, Error> {
        self.slot(name)
            .ok_or(ResolveError::ConfigurationNotFound)
            .and_then(|slot| slot.get_or_try_init(|| self.build(name)).cloned())
            .map_err(|source| Error::Resolution {
                name: name.to_string(),
                source,
            })
    }

    /// The cache slot of `name`. Names neither bound nor configured get none.
    fn slot(&self, name: &str) -> Option<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get(name) {
            return Some(Arc::clone(slot));
        }
        if !self.is_known(name) {
            return None;
        }
        Some(Arc::clone(slots.entry(name.to_string()).or_default()))
    }

    fn is_known(&self, name: &str) -> bool {
        self.loggers.contains_key(name)
            || self
                .bindings
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(name)
    }

    fn build(&self, name: &str) -> Result<Arc<dyn Logger>, ResolveError> {
        let binding = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        let (driver, logger) = if let Some(binding) = binding {
            (name.to_string(), binding())
        } else {
            let config = self
                .loggers
                .get(name)
                .ok_or(ResolveError::ConfigurationNotFound)?;
            let driver = config
                .driver
                .as_deref()
                .filter(|driver| !driver.is_empty())
                .ok_or(ResolveError::DriverNotSet)?;
            let logger = self.drivers.build(driver, config.params.clone())?;
            (driver.to_string(), logger)
        };
        if !covers_standard_levels(logger.as_ref()) {
            return Err(ResolveError::InvalidLoggerType { driver });
        }
        log::debug!("log channel [{name}] created with driver [{driver}]");
        Ok(logger)
    }
}
