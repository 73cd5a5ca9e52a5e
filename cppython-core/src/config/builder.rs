//! One-shot resolution of every configuration layer for a tool invocation.

use crate::config::environment::EnvironmentConfig;
use crate::config::resolver::ConfigResolver;
use crate::config::schema::{
    CppythonGlobalConfiguration, CppythonLocalConfiguration, Pep621Configuration, Pep621Overrides,
    PluginBuildData, PluginKind, ProjectConfiguration, ResolvedCppythonData, ResolvedPep621Data,
    ResolvedPluginData, ResolvedProjectData,
};
use crate::error::Result;
use crate::logging::LogLevel;
use serde::Serialize;

/// Every resolved configuration object for one invocation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    /// Resolved project settings.
    pub project: ResolvedProjectData,
    /// Resolved PEP 621 metadata.
    pub pep621: ResolvedPep621Data,
    /// Resolved tool settings.
    pub cppython: ResolvedCppythonData,
}

impl ResolvedConfiguration {
    /// Settings scoped to the plugin filling `kind`.
    ///
    /// # Errors
    ///
    /// See [`ConfigResolver::resolve_plugin`].
    pub fn plugin(&self, kind: PluginKind) -> Result<ResolvedPluginData> {
        ConfigResolver::resolve_plugin(&self.cppython, kind)
    }

    /// Log level implied by the project's verbosity and debug settings.
    #[must_use]
    pub fn log_level(&self) -> LogLevel {
        LogLevel::for_project(&self.project)
    }
}

/// Builder that gathers configuration layers and resolves them together.
///
/// Layers not supplied are empty. `CPPYTHON_*` environment variables are
/// applied above the local layer unless [`ConfigBuilder::skip_env`] is
/// called; overrides passed to [`ConfigBuilder::with_overrides`] win over
/// the environment.
///
/// # Examples
///
/// ```
/// use cppython_core::config::{
///     ConfigBuilder, CppythonLocalConfiguration, Pep621Configuration, PluginBuildData,
///     ProjectConfiguration,
/// };
///
/// let resolved = ConfigBuilder::new(
///     ProjectConfiguration::new("pyproject.toml").with_version("0.1.0"),
///     Pep621Configuration::new("demo").with_dynamic(["version"]),
///     PluginBuildData::new("cmake", "vcpkg", "git"),
/// )
/// .with_local(CppythonLocalConfiguration::default())
/// .skip_env()
/// .build()
/// .unwrap();
///
/// assert_eq!(resolved.pep621.version, "0.1.0");
/// assert!(resolved.cppython.build_path.ends_with("build"));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    project: ProjectConfiguration,
    pep621: Pep621Configuration,
    plugins: PluginBuildData,
    local: CppythonLocalConfiguration,
    global: CppythonGlobalConfiguration,
    overrides: Pep621Overrides,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Starts a builder from the inputs every invocation has.
    #[must_use]
    pub fn new(
        project: ProjectConfiguration,
        pep621: Pep621Configuration,
        plugins: PluginBuildData,
    ) -> Self {
        Self {
            project,
            pep621,
            plugins,
            local: CppythonLocalConfiguration::default(),
            global: CppythonGlobalConfiguration::default(),
            overrides: Pep621Overrides::default(),
            skip_env: false,
        }
    }

    /// Sets the project-local layer.
    #[must_use]
    pub fn with_local(mut self, local: CppythonLocalConfiguration) -> Self {
        self.local = local;
        self
    }

    /// Sets the user-global layer.
    #[must_use]
    pub fn with_global(mut self, global: CppythonGlobalConfiguration) -> Self {
        self.global = global;
        self
    }

    /// Replaces the discovered plugin names.
    #[must_use]
    pub fn with_plugins(mut self, plugins: PluginBuildData) -> Self {
        self.plugins = plugins;
        self
    }

    /// Sets explicit overrides for dynamic PEP 621 fields.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Pep621Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Ignores `CPPYTHON_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Resolves every layer.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error raised by
    /// [`ConfigResolver::resolve_project_configuration`],
    /// [`ConfigResolver::resolve_pep621`] or
    /// [`ConfigResolver::resolve_cppython`], or by reading an invalid
    /// environment override.
    pub fn build(self) -> Result<ResolvedConfiguration> {
        let mut local = self.local;
        let mut overrides = self.overrides;

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut local)?;

            let env = EnvironmentConfig::pep621_overrides();
            overrides.version = overrides.version.or(env.version);
            overrides.description = overrides.description.or(env.description);
        }

        let project = ConfigResolver::resolve_project_configuration(&self.project)?;
        let pep621 = ConfigResolver::resolve_pep621(&self.pep621, &self.project, &overrides)?;
        let cppython =
            ConfigResolver::resolve_cppython(&local, &self.global, &project, &self.plugins)?;

        log::debug!(
            "Resolved configuration for {} {} in {}",
            pep621.name,
            pep621.version,
            project.project_root.display()
        );

        Ok(ResolvedConfiguration {
            project,
            pep621,
            cppython,
        })
    }
}
