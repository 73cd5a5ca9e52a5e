//! Configuration validation.
//!
//! Resolution ends with a completeness check: a resolved object must not
//! carry a blank name, an empty or relative directory, or an out of range
//! verbosity. Any violation is reported as [`Error::Configuration`] and no
//! partial result escapes.

use crate::config::schema::{
    ResolvedCppythonData, ResolvedPep621Data, ResolvedPluginData, ResolvedProjectData,
    MAX_VERBOSITY,
};
use crate::error::{Error, Result};
use std::path::Path;

/// Longest accepted identifier, in bytes.
const MAX_IDENTIFIER_LEN: usize = 255;

/// Validates configuration values and resolved objects.
///
/// # Examples
///
/// ```
/// use cppython_core::config::ConfigValidator;
///
/// assert!(ConfigValidator::validate_identifier("name", "demo").is_ok());
/// assert!(ConfigValidator::validate_identifier("name", "   ").is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate string identifiers (project and plugin names).
    ///
    /// Checks that the identifier is non-empty, has no surrounding
    /// whitespace, contains no null bytes, and is not longer than 255 bytes.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming `field`.
    pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::configuration(field, "cannot be empty or only whitespace"));
        }

        if trimmed.len() != value.len() {
            return Err(Error::configuration(
                field,
                "cannot have leading or trailing whitespace",
            ));
        }

        if trimmed.contains('\0') {
            return Err(Error::configuration(field, "cannot contain null bytes"));
        }

        if trimmed.len() > MAX_IDENTIFIER_LEN {
            return Err(Error::configuration(
                field,
                format!("cannot exceed {MAX_IDENTIFIER_LEN} characters"),
            ));
        }

        Ok(())
    }

    /// Validate a version string.
    ///
    /// Versions are opaque to resolution; only blank values are rejected.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming `field`.
    pub fn validate_version(field: &str, value: &str) -> Result<()> {
        Self::validate_non_blank(field, value)
    }

    /// Validate that a declared text value is not blank.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming `field`.
    pub fn validate_non_blank(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::configuration(field, "cannot be blank"));
        }
        Ok(())
    }

    /// Validate that a resolved directory is absolute.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming `field`.
    pub fn validate_directory(field: &str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::configuration(field, "path cannot be empty"));
        }
        if !path.is_absolute() {
            return Err(Error::configuration(
                field,
                format!("path must be absolute: {}", path.display()),
            ));
        }
        Ok(())
    }

    /// Validate resolved project data.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_project_data(data: &ResolvedProjectData) -> Result<()> {
        Self::validate_directory("project-root", &data.project_root)?;
        Self::validate_directory("pyproject-file", &data.pyproject_file)?;

        if data.pyproject_file.parent() != Some(data.project_root.as_path()) {
            return Err(Error::configuration(
                "project-root",
                "must be the directory containing the manifest",
            ));
        }

        if data.verbosity > MAX_VERBOSITY {
            return Err(Error::configuration(
                "verbosity",
                format!("must be at most {MAX_VERBOSITY}"),
            ));
        }

        Ok(())
    }

    /// Validate resolved PEP 621 metadata.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_pep621_data(data: &ResolvedPep621Data) -> Result<()> {
        Self::validate_identifier("name", &data.name)?;
        Self::validate_version("version", &data.version)
    }

    /// Validate resolved tool settings.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_cppython_data(data: &ResolvedCppythonData) -> Result<()> {
        Self::validate_directory("install-path", &data.install_path)?;
        Self::validate_directory("tool-path", &data.tool_path)?;
        Self::validate_directory("build-path", &data.build_path)?;
        Self::validate_identifier("provider-name", &data.provider_name)?;
        Self::validate_identifier("generator-name", &data.generator_name)?;
        Self::validate_identifier("scm-name", &data.scm_name)
    }

    /// Validate plugin-scoped settings.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate_plugin_data(data: &ResolvedPluginData) -> Result<()> {
        Self::validate_identifier(&format!("{}-name", data.kind), &data.name)?;
        Self::validate_directory("install-path", &data.install_path)?;
        Self::validate_directory("tool-path", &data.tool_path)?;
        Self::validate_directory("build-path", &data.build_path)
    }
}
