#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # cppython-core
//!
//! Configuration resolution for cppython.
//!
//! cppython reads its settings from several places: the `[project]` table
//! of `pyproject.toml`, the project's `[tool.cppython]` table, a user-wide
//! configuration, the environment and the command line. This library
//! merges those layers, fills in defaults and derived values, and
//! guarantees that the result is complete.
//!
//! ## Core Types
//!
//! - [`ConfigResolver`]: the `resolve_*` operations
//! - [`ConfigBuilder`]: resolves every layer for one invocation
//! - [`Error`] and [`Result`]: error handling types
//! - [`LogLevel`]: verbosity to log level mapping
//!
//! ## Examples
//!
//! ```
//! use cppython_core::config::{
//!     ConfigResolver, Pep621Configuration, Pep621Overrides, ProjectConfiguration,
//! };
//!
//! let pep621 = Pep621Configuration::new("demo").with_dynamic(["version"]);
//! let project = ProjectConfiguration::new("pyproject.toml");
//!
//! // A dynamic version needs a source
//! let err = ConfigResolver::resolve_pep621(&pep621, &project, &Pep621Overrides::default())
//!     .unwrap_err();
//! assert!(err.is_configuration());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod path;

// Re-export key types at crate root for convenience
pub use config::{ConfigBuilder, ConfigResolver, ResolvedConfiguration};
pub use error::{Error, Result};
pub use logging::{init_log_level, LogLevel};
