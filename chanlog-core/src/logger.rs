use std::sync::{Arc, Mutex, PoisonError};

use crate::{context::Context, error::Result, level::Level};

/// The logging capability every channel exposes.
///
/// Only [`Logger::log`] is required. The level methods forward to it unless
/// an implementation overrides them.
pub trait Logger: Send + Sync {
    /// Logs with an arbitrary level.
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()>;

    /// Levels this logger handles. A logger that does not cover all eight
    /// standard levels is rejected when it is resolved.
    fn supported_levels(&self) -> &[Level] {
        Level::standard()
    }

    fn emergency(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Emergency, message, context)
    }

    fn alert(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Alert, message, context)
    }

    fn critical(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Critical, message, context)
    }

    fn error(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Error, message, context)
    }

    fn warning(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Warning, message, context)
    }

    fn notice(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Notice, message, context)
    }

    fn info(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Info, message, context)
    }

    fn debug(&self, message: &str, context: &Context) -> Result<()> {
        self.log(&Level::Debug, message, context)
    }
}

/// Whether `logger` handles every standard level.
pub fn covers_standard_levels(logger: &dyn Logger) -> bool {
    let supported = logger.supported_levels();
    Level::standard().iter().all(|level| supported.contains(level))
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()> {
        (**self).log(level, message, context)
    }
    fn supported_levels(&self) -> &[Level] {
        (**self).supported_levels()
    }
    fn emergency(&self, message: &str, context: &Context) -> Result<()> {
        (**self).emergency(message, context)
    }
    fn alert(&self, message: &str, context: &Context) -> Result<()> {
        (**self).alert(message, context)
    }
    fn critical(&self, message: &str, context: &Context) -> Result<()> {
        (**self).critical(message, context)
    }
    fn error(&self, message: &str, context: &Context) -> Result<()> {
        (**self).error(message, context)
    }
    fn warning(&self, message: &str, context: &Context) -> Result<()> {
        (**self).warning(message, context)
    }
    fn notice(&self, message: &str, context: &Context) -> Result<()> {
        (**self).notice(message, context)
    }
    fn info(&self, message: &str, context: &Context) -> Result<()> {
        (**self).info(message, context)
    }
    fn debug(&self, message: &str, context: &Context) -> Result<()> {
        (**self).debug(message, context)
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _: &Level, _: &str, _: &Context) -> Result<()> {
        Ok(())
    }
}

/// A log call as received by a [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub context: Context,
}

impl Record {
    pub fn new(level: Level, message: &str, context: Context) -> Self {
        Self {
            level,
            message: message.to_string(),
            context,
        }
    }
}

/// Keeps every record in memory, uninterpolated.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<Record>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the records and clears the buffer.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record::new(level.clone(), message, context.clone()));
        Ok(())
    }
}
