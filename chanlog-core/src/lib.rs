//! # chanlog-core
//! Core types for chanlog - levels, context, interpolation and the logger trait.

mod config;
mod context;
mod error;
mod level;
mod log_writer;
mod logger;
mod utils;

pub use config::{CHANLOG_ENV, ChanlogEnv};
pub use context::Context;
pub use error::{Error, ResolveError, Result};
pub use level::Level;
pub use log_writer::{LogFile, LogStream, LogWriter, Stream};
pub use logger::{Logger, MemoryLogger, NullLogger, Record, covers_standard_levels};
pub use utils::{format_log, interpolate};
