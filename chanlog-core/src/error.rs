use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure a log call can surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error("default log channel not assigned")]
    NoDefaultConfigured,
    #[error("log group [{0}] not found")]
    GroupNotFound(String),
    #[error("log group [{0}] has no members")]
    EmptyGroup(String),
    #[error("you should not use log level [{0}]")]
    InvalidLevel(String),
    #[error("can not resolve log channel [{name}]")]
    Resolution {
        name: String,
        #[source]
        source: ResolveError,
    },
    #[error("log sink write failed")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The resolution step that failed, if this is a resolution error.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self {
            Error::Resolution { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why a named logger could not be built.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("configuration not found")]
    ConfigurationNotFound,
    #[error("driver not set")]
    DriverNotSet,
    #[error("driver [{0}] is not registered")]
    UnknownDriver(String),
    #[error("driver [{driver}] requires parameter [{parameter}]")]
    ParameterMissing { driver: String, parameter: String },
    #[error("invalid parameters for driver [{driver}]")]
    InvalidParameters {
        driver: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("can not create driver [{driver}]")]
    Construction {
        driver: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("[{driver}] does not handle every log level")]
    InvalidLoggerType { driver: String },
}
