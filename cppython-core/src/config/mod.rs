//! Configuration system for cppython.
//!
//! This module turns layered, partially specified configuration into
//! complete configuration objects:
//! - PEP 621 project metadata with dynamic fields
//! - Per-invocation project settings
//! - Project-local and user-global tool settings
//! - Environment variable and command line overrides
//!
//! # Configuration Precedence
//!
//! Tool settings are resolved with the following precedence
//! (highest to lowest):
//!
//! 1. Environment variables (`CPPYTHON_*`)
//! 2. Project-local configuration (`[tool.cppython]`)
//! 3. User-global configuration
//! 4. Computed defaults
//!
//! Dynamic PEP 621 fields take explicit overrides first, then
//! `CPPYTHON_VERSION`/`CPPYTHON_DESCRIPTION`, then the value in
//! [`ProjectConfiguration`].
//!
//! # Examples
//!
//! Resolving each layer separately:
//!
//! ```
//! use cppython_core::config::{
//!     ConfigResolver, CppythonGlobalConfiguration, CppythonLocalConfiguration,
//!     PluginBuildData, ProjectConfiguration,
//! };
//!
//! let project = ConfigResolver::resolve_project_configuration(
//!     &ProjectConfiguration::new("pyproject.toml"),
//! )
//! .unwrap();
//!
//! let cppython = ConfigResolver::resolve_cppython(
//!     &CppythonLocalConfiguration::default(),
//!     &CppythonGlobalConfiguration::default(),
//!     &project,
//!     &PluginBuildData::new("generator", "provider", "scm"),
//! )
//! .unwrap();
//!
//! assert_eq!(cppython.build_path, project.project_root.join("build"));
//! ```

pub mod builder;
pub mod environment;
pub mod merger;
pub mod resolver;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use builder::{ConfigBuilder, ResolvedConfiguration};
pub use environment::EnvironmentConfig;
pub use merger::ConfigMerger;
pub use resolver::ConfigResolver;
pub use schema::{
    CppythonGlobalConfiguration, CppythonLocalConfiguration, Pep621Configuration, Pep621Overrides,
    PluginBuildData, PluginKind, PluginTable, ProjectConfiguration, ResolvedCppythonData,
    ResolvedPep621Data, ResolvedPluginData, ResolvedProjectData,
};
pub use validator::ConfigValidator;
