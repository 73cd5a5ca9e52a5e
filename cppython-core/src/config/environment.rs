//! Environment variable handling for configuration overrides.
//!
//! `CPPYTHON_*` variables form the override layer that sits above the
//! project-local configuration.

use crate::config::schema::{CppythonLocalConfiguration, Pep621Overrides};
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Overrides `install-path`.
pub const ENV_INSTALL_PATH: &str = "CPPYTHON_INSTALL_PATH";
/// Overrides `tool-path`.
pub const ENV_TOOL_PATH: &str = "CPPYTHON_TOOL_PATH";
/// Overrides `build-path`.
pub const ENV_BUILD_PATH: &str = "CPPYTHON_BUILD_PATH";
/// Overrides `current-check`.
pub const ENV_CURRENT_CHECK: &str = "CPPYTHON_CURRENT_CHECK";
/// Overrides `provider-name`.
pub const ENV_PROVIDER_NAME: &str = "CPPYTHON_PROVIDER_NAME";
/// Overrides `generator-name`.
pub const ENV_GENERATOR_NAME: &str = "CPPYTHON_GENERATOR_NAME";
/// Overrides `scm-name`.
pub const ENV_SCM_NAME: &str = "CPPYTHON_SCM_NAME";
/// Supplies a dynamic `version`.
pub const ENV_VERSION: &str = "CPPYTHON_VERSION";
/// Supplies a dynamic `description`.
pub const ENV_DESCRIPTION: &str = "CPPYTHON_DESCRIPTION";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use cppython_core::config::{CppythonLocalConfiguration, EnvironmentConfig};
///
/// let mut config = CppythonLocalConfiguration::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// let overrides = EnvironmentConfig::pep621_overrides();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to a local configuration.
    ///
    /// Set variables overwrite the corresponding fields; unset variables
    /// leave them untouched.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `CPPYTHON_CURRENT_CHECK` is not a
    /// recognized boolean.
    pub fn apply_overrides(config: &mut CppythonLocalConfiguration) -> Result<()> {
        if let Some(path) = Self::var(ENV_INSTALL_PATH) {
            config.install_path = Some(PathBuf::from(path));
        }

        if let Some(path) = Self::var(ENV_TOOL_PATH) {
            config.tool_path = Some(PathBuf::from(path));
        }

        if let Some(path) = Self::var(ENV_BUILD_PATH) {
            config.build_path = Some(PathBuf::from(path));
        }

        if let Some(val) = Self::var(ENV_CURRENT_CHECK) {
            config.current_check = Some(Self::parse_bool(ENV_CURRENT_CHECK, &val)?);
        }

        if let Some(name) = Self::var(ENV_PROVIDER_NAME) {
            config.provider_name = Some(name);
        }

        if let Some(name) = Self::var(ENV_GENERATOR_NAME) {
            config.generator_name = Some(name);
        }

        if let Some(name) = Self::var(ENV_SCM_NAME) {
            config.scm_name = Some(name);
        }

        Ok(())
    }

    /// Read overrides for dynamic PEP 621 fields.
    #[must_use]
    pub fn pep621_overrides() -> Pep621Overrides {
        Pep621Overrides {
            version: Self::var(ENV_VERSION),
            description: Self::var(ENV_DESCRIPTION),
        }
    }

    /// Read a variable, treating unset and non-UTF-8 values alike.
    fn var(key: &str) -> Option<String> {
        let value = env::var(key).ok();
        if value.is_some() {
            log::debug!("Applying environment override {key}");
        }
        value
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::configuration(
                field,
                format!("invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"),
            )),
        }
    }
}
