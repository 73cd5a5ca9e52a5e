//! Log level selection for cppython.
//!
//! The library only emits records through the `log` facade; installing a
//! logger backend is left to the application. This module turns the
//! resolved project verbosity into the level filter that backend should
//! use.

use std::env;
use std::fmt;

use log::LevelFilter;

use crate::config::schema::ResolvedProjectData;

/// Environment variable consulted when the command line asks for nothing
/// beyond the default verbosity.
pub const ENV_LOG_MODE: &str = "CPPYTHON_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use cppython_core::LogLevel;
///
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// assert!(LogLevel::Verbose < LogLevel::Debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors and warnings.
    Normal,
    /// Adds informational messages.
    Verbose,
    /// Adds debug messages, including which layer supplied each setting.
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "normal", "verbose", "debug" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use cppython_core::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("DEBUG").unwrap(), LogLevel::Debug);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// Maps a command line verbosity count onto a level.
    #[must_use]
    pub const fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Level implied by a resolved project; debug mode forces [`LogLevel::Debug`].
    #[must_use]
    pub const fn for_project(project: &ResolvedProjectData) -> Self {
        if project.debug {
            Self::Debug
        } else {
            Self::from_verbosity(project.verbosity)
        }
    }

    /// The `log` filter for this level.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
        }
    }
}

/// Chooses the log level for an invocation.
///
/// The priority order is:
/// 1. Project settings, when they ask for more than the default
/// 2. `CPPYTHON_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// Also raises the `log` crate's global maximum level to match.
#[must_use]
pub fn init_log_level(project: &ResolvedProjectData) -> LogLevel {
    let requested = LogLevel::for_project(project);

    let level = if requested > LogLevel::Normal {
        requested
    } else {
        env::var(ENV_LOG_MODE)
            .ok()
            .and_then(|value| LogLevel::parse(&value).ok())
            .unwrap_or(LogLevel::Normal)
    };

    log::set_max_level(level.level_filter());
    level
}
