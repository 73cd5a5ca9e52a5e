//! Error types for the cppython-core library.
//!
//! Resolution has a single failure kind, [`Error::Configuration`], raised
//! whenever a required field cannot be resolved from any layer. Path
//! normalization has its own variant so that callers of the
//! [`crate::path`] helpers get the offending path back.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a cppython error.
///
/// # Examples
///
/// ```
/// use cppython_core::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("0.1.0".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the cppython-core library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A required configuration field could not be resolved or is invalid.
    #[error("configuration error for '{field}': {message}")]
    Configuration {
        /// The field that failed to resolve.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },
}

impl Error {
    /// Builds a configuration error for `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cppython_core::Error;
    ///
    /// let err = Error::configuration("version", "no value");
    /// assert!(err.is_configuration());
    /// ```
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if error is a configuration resolution failure.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns the field a configuration error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Configuration { field, .. } => Some(field),
            Self::InvalidPath { .. } => None,
        }
    }

    /// Rewrites a path error as a configuration error for `field`.
    ///
    /// Resolution reports every failure against the field being resolved,
    /// so path errors raised while normalizing a field's value are folded
    /// into the configuration kind.
    #[must_use]
    pub fn into_configuration(self, field: &str) -> Self {
        match self {
            Self::InvalidPath { path, reason } => Self::Configuration {
                field: field.to_string(),
                message: format!("{}: {reason}", path.display()),
            },
            other @ Self::Configuration { .. } => other,
        }
    }
}
