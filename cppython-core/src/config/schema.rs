//! Configuration schema definitions.
//!
//! Input types mirror the tables a caller has already parsed out of a
//! project manifest (`[project]`, `[tool.cppython]`) or a user-level tool
//! configuration, so every input field is optional unless the manifest
//! format itself requires it. Resolved types carry no optional fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Free-form configuration owned by a plugin (`[tool.cppython.provider]`).
pub type PluginTable = serde_json::Map<String, serde_json::Value>;

/// Directory under the home directory used when no layer sets `install-path`.
pub const DEFAULT_INSTALL_DIR: &str = ".cppython";

/// Project-relative directory used when no layer sets `tool-path`.
pub const DEFAULT_TOOL_DIR: &str = "tool";

/// Project-relative directory used when no layer sets `build-path`.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Value of `current-check` when no layer sets it.
pub const DEFAULT_CURRENT_CHECK: bool = true;

/// Highest supported verbosity; larger values are clamped.
pub const MAX_VERBOSITY: u8 = 2;

/// File name every project manifest must carry.
pub const PYPROJECT_FILE_NAME: &str = "pyproject.toml";

/// PEP 621 field names that resolution knows how to fill dynamically.
pub const DYNAMIC_VERSION: &str = "version";
/// See [`DYNAMIC_VERSION`].
pub const DYNAMIC_DESCRIPTION: &str = "description";

/// Per-invocation project settings supplied by the command line or
/// environment.
///
/// # Examples
///
/// ```
/// use cppython_core::config::ProjectConfiguration;
///
/// let config = ProjectConfiguration::new("pyproject.toml").with_version("0.1.0");
/// assert_eq!(config.version.as_deref(), Some("0.1.0"));
/// assert_eq!(config.verbosity, 0);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProjectConfiguration {
    /// Location of the project manifest.
    pub pyproject_file: PathBuf,

    /// Authoritative project version, e.g. as reported by the SCM.
    #[serde(default)]
    pub version: Option<String>,

    /// Output verbosity, 0 through [`MAX_VERBOSITY`].
    #[serde(default)]
    pub verbosity: u8,

    /// Debug mode.
    #[serde(default)]
    pub debug: bool,
}

impl ProjectConfiguration {
    /// Creates a configuration for the manifest at `pyproject_file`.
    #[must_use]
    pub fn new(pyproject_file: impl Into<PathBuf>) -> Self {
        Self {
            pyproject_file: pyproject_file.into(),
            version: None,
            verbosity: 0,
            debug: false,
        }
    }

    /// Sets the authoritative version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the verbosity.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// The `[project]` table of a manifest.
///
/// # Examples
///
/// ```
/// use cppython_core::config::Pep621Configuration;
///
/// let pep621 = Pep621Configuration::new("demo").with_dynamic(["version"]);
/// assert!(pep621.is_dynamic("version"));
/// assert!(!pep621.is_dynamic("description"));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Pep621Configuration {
    /// Project name.
    pub name: String,

    /// Statically declared version.
    #[serde(default)]
    pub version: Option<String>,

    /// Statically declared description.
    #[serde(default)]
    pub description: Option<String>,

    /// Fields whose values are supplied at build time.
    #[serde(default)]
    pub dynamic: Vec<String>,
}

impl Pep621Configuration {
    /// Creates a configuration with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            dynamic: Vec::new(),
        }
    }

    /// Sets the statically declared version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Marks fields as dynamic.
    #[must_use]
    pub fn with_dynamic<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dynamic.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Returns true if `field` is listed in `dynamic`.
    #[must_use]
    pub fn is_dynamic(&self, field: &str) -> bool {
        self.dynamic.iter().any(|d| d == field)
    }
}

/// Values supplied by the command line or environment for dynamic PEP 621
/// fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Pep621Overrides {
    /// Version override.
    pub version: Option<String>,

    /// Description override.
    pub description: Option<String>,
}

/// Names of the plugins selected for this invocation.
///
/// # Examples
///
/// ```
/// use cppython_core::config::PluginBuildData;
///
/// let plugins = PluginBuildData::new("cmake", "vcpkg", "git");
/// assert_eq!(plugins.generator_name, "cmake");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PluginBuildData {
    /// Generator plugin name.
    pub generator_name: String,
    /// Provider plugin name.
    pub provider_name: String,
    /// SCM plugin name.
    pub scm_name: String,
}

impl PluginBuildData {
    /// Creates plugin build data from the three plugin names.
    #[must_use]
    pub fn new(
        generator_name: impl Into<String>,
        provider_name: impl Into<String>,
        scm_name: impl Into<String>,
    ) -> Self {
        Self {
            generator_name: generator_name.into(),
            provider_name: provider_name.into(),
            scm_name: scm_name.into(),
        }
    }
}

/// User-wide tool settings.
///
/// Every field is optional; unset fields fall through to defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CppythonGlobalConfiguration {
    /// Where plugins install shared artifacts.
    pub install_path: Option<PathBuf>,

    /// Where plugins place tooling.
    pub tool_path: Option<PathBuf>,

    /// Where plugins place build output.
    pub build_path: Option<PathBuf>,

    /// Check for newer tool releases.
    pub current_check: Option<bool>,

    /// Provider plugin to use instead of the discovered one.
    pub provider_name: Option<String>,

    /// Generator plugin to use instead of the discovered one.
    pub generator_name: Option<String>,

    /// SCM plugin to use instead of the discovered one.
    pub scm_name: Option<String>,
}

/// Project-local tool settings (`[tool.cppython]`).
///
/// Takes precedence over [`CppythonGlobalConfiguration`] field by field.
///
/// # Examples
///
/// ```
/// use cppython_core::config::CppythonLocalConfiguration;
/// use std::path::PathBuf;
///
/// let local = CppythonLocalConfiguration {
///     build_path: Some(PathBuf::from("out")),
///     ..Default::default()
/// };
/// assert!(local.install_path.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CppythonLocalConfiguration {
    /// Where plugins install shared artifacts.
    pub install_path: Option<PathBuf>,

    /// Where plugins place tooling.
    pub tool_path: Option<PathBuf>,

    /// Where plugins place build output.
    pub build_path: Option<PathBuf>,

    /// Check for newer tool releases.
    pub current_check: Option<bool>,

    /// Provider plugin to use instead of the discovered one.
    pub provider_name: Option<String>,

    /// Generator plugin to use instead of the discovered one.
    pub generator_name: Option<String>,

    /// SCM plugin to use instead of the discovered one.
    pub scm_name: Option<String>,

    /// Provider plugin settings.
    pub provider: Option<PluginTable>,

    /// Generator plugin settings.
    pub generator: Option<PluginTable>,
}

impl From<CppythonGlobalConfiguration> for CppythonLocalConfiguration {
    fn from(global: CppythonGlobalConfiguration) -> Self {
        Self {
            install_path: global.install_path,
            tool_path: global.tool_path,
            build_path: global.build_path,
            current_check: global.current_check,
            provider_name: global.provider_name,
            generator_name: global.generator_name,
            scm_name: global.scm_name,
            provider: None,
            generator: None,
        }
    }
}

/// Resolved project settings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedProjectData {
    /// Directory containing the manifest.
    pub project_root: PathBuf,
    /// Absolute manifest path.
    pub pyproject_file: PathBuf,
    /// Verbosity, clamped to [`MAX_VERBOSITY`].
    pub verbosity: u8,
    /// Debug mode.
    pub debug: bool,
}

impl From<ResolvedProjectData> for ProjectConfiguration {
    fn from(data: ResolvedProjectData) -> Self {
        Self {
            pyproject_file: data.pyproject_file,
            version: None,
            verbosity: data.verbosity,
            debug: data.debug,
        }
    }
}

/// Resolved PEP 621 metadata.
///
/// `description` is the one field allowed to be empty: PEP 621 makes it
/// optional and an undeclared description resolves to `""`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedPep621Data {
    /// Project name.
    pub name: String,
    /// Project version.
    pub version: String,
    /// Project description.
    pub description: String,
}

impl From<ResolvedPep621Data> for Pep621Configuration {
    fn from(data: ResolvedPep621Data) -> Self {
        Self {
            name: data.name,
            version: Some(data.version),
            description: (!data.description.is_empty()).then_some(data.description),
            dynamic: Vec::new(),
        }
    }
}

/// Resolved tool settings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedCppythonData {
    /// Absolute install directory.
    pub install_path: PathBuf,
    /// Absolute tool directory.
    pub tool_path: PathBuf,
    /// Absolute build directory.
    pub build_path: PathBuf,
    /// Check for newer tool releases.
    pub current_check: bool,
    /// Provider plugin name.
    pub provider_name: String,
    /// Generator plugin name.
    pub generator_name: String,
    /// SCM plugin name.
    pub scm_name: String,
    /// Provider plugin settings (may be empty).
    pub provider: PluginTable,
    /// Generator plugin settings (may be empty).
    pub generator: PluginTable,
}

impl From<ResolvedCppythonData> for CppythonLocalConfiguration {
    fn from(data: ResolvedCppythonData) -> Self {
        Self {
            install_path: Some(data.install_path),
            tool_path: Some(data.tool_path),
            build_path: Some(data.build_path),
            current_check: Some(data.current_check),
            provider_name: Some(data.provider_name),
            generator_name: Some(data.generator_name),
            scm_name: Some(data.scm_name),
            provider: Some(data.provider),
            generator: Some(data.generator),
        }
    }
}

/// The plugin roles a project is built with.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    /// Build-system generator.
    Generator,
    /// Dependency provider.
    Provider,
    /// Source control.
    Scm,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator => write!(f, "generator"),
            Self::Provider => write!(f, "provider"),
            Self::Scm => write!(f, "scm"),
        }
    }
}

/// Tool settings scoped to a single plugin.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedPluginData {
    /// Plugin role.
    pub kind: PluginKind,
    /// Plugin name.
    pub name: String,
    /// `<install_path>/<name>`.
    pub install_path: PathBuf,
    /// `<tool_path>/<name>`.
    pub tool_path: PathBuf,
    /// `<build_path>/<name>`.
    pub build_path: PathBuf,
    /// Plugin settings (may be empty).
    pub config: PluginTable,
}
