use std::{convert::Infallible, fmt, str::FromStr};

use colored::{ColoredString, Colorize};

/// Log severity.
///
/// The eight standard severities, most severe first, plus [`Level::Custom`]
/// for names outside of that set. Custom levels only reach a logger when the
/// facade runs with a lenient level policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Runtime errors that do not require immediate action.
    Error,
    /// Exceptional occurrences that are not errors.
    Warning,
    /// Normal but significant events.
    Notice,
    /// Interesting events.
    Info,
    /// Detailed debug information.
    Debug,
    /// Any other level name, forwarded verbatim.
    Custom(String),
}

static STANDARD_LEVELS: [Level; 8] = [
    Level::Emergency,
    Level::Alert,
    Level::Critical,
    Level::Error,
    Level::Warning,
    Level::Notice,
    Level::Info,
    Level::Debug,
];

impl Level {
    /// The eight standard severities, most severe first.
    pub fn standard() -> &'static [Level] {
        &STANDARD_LEVELS
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, Level::Custom(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Level::Emergency => "emergency",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Notice => "notice",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Custom(name) => name,
        }
    }

    /// Upper-cased label used in formatted lines, colored by severity.
    pub fn label(&self) -> ColoredString {
        let label = self.as_str().to_uppercase();
        match self {
            Level::Emergency | Level::Alert | Level::Critical => label.red().bold(),
            Level::Error => label.red(),
            Level::Warning => label.yellow(),
            Level::Notice => label.cyan(),
            Level::Info => label.green(),
            Level::Debug => label.blue(),
            Level::Custom(_) => label.purple(),
        }
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        match name {
            "emergency" => Level::Emergency,
            "alert" => Level::Alert,
            "critical" => Level::Critical,
            "error" => Level::Error,
            "warning" => Level::Warning,
            "notice" => Level::Notice,
            "info" => Level::Info,
            "debug" => Level::Debug,
            other => Level::Custom(other.to_string()),
        }
    }
}

impl FromStr for Level {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::from(s))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
