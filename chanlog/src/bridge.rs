use std::sync::Arc;

use chanlog_core::{Context, Level, Logger};
use log::{LevelFilter, Log, SetLoggerError};

use crate::LogManager;

/// `log` crate backend sending records to a [`LogManager`]'s default channels.
pub struct LogBridge {
    manager: Arc<LogManager>,
}

impl LogBridge {
    pub fn new(manager: Arc<LogManager>) -> Self {
        Self { manager }
    }
}

// chanlog logs about itself through `log`; those records must not come back
fn is_own_target(target: &str) -> bool {
    ["chanlog", "chanlog_core"].iter().any(|own| {
        target
            .strip_prefix(own)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !is_own_target(metadata.target())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let context = Context::new().with("target", record.target());
        let message = record.args().to_string();
        let level = Level::from(record.level());
        if let Err(err) = Logger::log(self.manager.as_ref(), &level, &message, &context) {
            eprintln!("chanlog: can not forward log record: {err}");
        }
    }

    fn flush(&self) {}
}

/// Installs `manager` as the global `log` backend with the given max level.
pub fn init_global(manager: Arc<LogManager>, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(manager)))?;
    log::set_max_level(level);
    Ok(())
}
