use std::{
    io,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use chanlog_core::{
    CHANLOG_ENV, Context, Level, LogFile, LogStream, LogWriter, Logger, Result, Stream,
    format_log, interpolate,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct StreamParams {
    /// Name printed in every line.
    #[serde(default)]
    pub name: Option<String>,
    /// Colored levels, defaults to `CHANLOG_COLOR`.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Writes formatted lines to stdout or stderr.
pub struct StreamChannel {
    writer: Mutex<LogStream>,
    name: Option<String>,
    color: bool,
}

impl StreamChannel {
    pub fn new(stream: Stream, params: StreamParams) -> io::Result<Self> {
        Ok(Self {
            writer: Mutex::new(LogStream::new(stream)),
            name: params.name,
            color: params.color.unwrap_or(CHANLOG_ENV.COLOR),
        })
    }
}

impl Logger for StreamChannel {
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()> {
        let line = format_log(
            &interpolate(message, context),
            level,
            self.name.as_deref(),
            self.color,
        );
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .regular(&line)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct FileParams {
    pub filename: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
}

/// Appends formatted, uncolored lines to a file.
pub struct FileChannel {
    writer: Mutex<LogFile>,
    name: Option<String>,
}

impl FileChannel {
    /// Opens (or creates) the file right away so a bad path fails resolution.
    pub fn new(params: FileParams) -> io::Result<Self> {
        Ok(Self {
            writer: Mutex::new(LogFile::new(&params.filename)?),
            name: params.name,
        })
    }
}

impl Logger for FileChannel {
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()> {
        let line = format_log(
            &interpolate(message, context),
            level,
            self.name.as_deref(),
            false,
        );
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .regular(&line)?;
        Ok(())
    }
}
