//! # chanlog
//! Logging facade resolving named channels and groups from configuration.
//!
//! Channels are built lazily by a driver and cached: every call naming the
//! same channel reaches the same logger instance.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! chanlog = "0.1.0"
//! ```
//!
//! ```rust
//! use chanlog::{Context, LogConfig, LogManager, Logger, LoggerConfig};
//!
//! let config = LogConfig::new()
//!     .with_default("app")
//!     .with_logger(
//!         "app",
//!         LoggerConfig::new("file").with_param("filename", "/tmp/chanlog_doc.log"),
//!     )
//!     .with_logger("console", LoggerConfig::new("stdout"));
//! let manager = LogManager::new(config);
//!
//! manager
//!     .info("User {user} logged in", &Context::new().with("user", "bob"))
//!     .unwrap();
//! assert!(
//!     std::fs::read_to_string("/tmp/chanlog_doc.log")
//!         .unwrap()
//!         .ends_with("INFO] User bob logged in\n")
//! );
//! ```
//!
//! ## Fan-out and groups
//! Several channels can be addressed at once, explicitly or through groups.
//! Each channel receives the call once, in order.
//!
//! ```rust
//! use chanlog::{Context, LogConfig, LogManager, Logger, LoggerConfig};
//!
//! let config = LogConfig::new()
//!     .with_logger("console", LoggerConfig::new("stdout"))
//!     .with_logger("errors", LoggerConfig::new("stderr"))
//!     .with_group("local", &["console", "errors"]);
//! let manager = LogManager::new(config);
//!
//! manager.channels(&["console", "errors"]).unwrap().debug("Test", &Context::new()).unwrap();
//! manager.group(&["local"]).unwrap().warning("Test", &Context::new()).unwrap();
//! ```
//!
//! ## Custom drivers
//! A driver is a typed factory. Its parameters come from the channel's
//! configuration entry.
//!
//! ```rust
//! use chanlog::{Context, DriverTable, Level, LogConfig, LogManager, Logger, LoggerConfig};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct PrefixParams {
//!     prefix: String,
//! }
//!
//! struct PrefixLogger(String);
//!
//! impl Logger for PrefixLogger {
//!     fn log(&self, level: &Level, message: &str, _: &Context) -> chanlog::Result<()> {
//!         println!("{} {level}: {message}", self.0);
//!         Ok(())
//!     }
//! }
//!
//! let mut drivers = DriverTable::builtin();
//! drivers.register("prefix", |p: PrefixParams| {
//!     Ok::<_, std::convert::Infallible>(PrefixLogger(p.prefix))
//! });
//! let config = LogConfig::new()
//!     .with_default("tagged")
//!     .with_logger("tagged", LoggerConfig::new("prefix").with_param("prefix", ">>"));
//! let manager = LogManager::with_drivers(config, drivers);
//! manager.notice("Hello", &Context::new()).unwrap();
//! ```
//!
//! ## `log` crate integration
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! let manager = chanlog::LogManager::from_path("chanlog.toml").unwrap();
//! chanlog::init_global(Arc::new(manager), log::LevelFilter::Info).unwrap();
//! log::info!("Hello, world!");
//! ```

mod bridge;
mod channels;
mod config;
mod driver;
mod group;
mod manager;
mod proxy;
mod registry;

pub use bridge::{LogBridge, init_global};
pub use channels::{FileChannel, FileParams, StreamChannel, StreamParams};
pub use config::{ConfigError, DefaultChannels, LogConfig, LoggerConfig};
pub use driver::DriverTable;
pub use group::Groups;
pub use manager::{LevelPolicy, LogManager};
pub use proxy::LoggerProxy;
pub use registry::Registry;

pub use chanlog_core::{
    Context, Error, Level, Logger, MemoryLogger, NullLogger, Record, ResolveError, Result,
    Stream, interpolate,
};
