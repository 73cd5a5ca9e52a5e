//! Resolution of layered configuration into complete configuration.
//!
//! Each `resolve_*` operation takes partially specified input and either
//! returns an object with every required field populated or fails with
//! [`Error::Configuration`]. Values are picked by a strict chain:
//!
//! 1. Overrides (command line or environment), where the operation has them
//! 2. Project-local configuration
//! 3. User-global configuration
//! 4. Computed defaults
//!
//! Resolution is pure apart from looking up the current directory (for a
//! relative manifest path) and the home directory (for the default
//! install path).

use crate::config::merger::ConfigMerger;
use crate::config::schema::{
    CppythonGlobalConfiguration, CppythonLocalConfiguration, Pep621Configuration, Pep621Overrides,
    PluginBuildData, PluginKind, ProjectConfiguration, ResolvedCppythonData, ResolvedPep621Data,
    ResolvedPluginData, ResolvedProjectData, DEFAULT_BUILD_DIR, DEFAULT_CURRENT_CHECK,
    DEFAULT_INSTALL_DIR, DEFAULT_TOOL_DIR, DYNAMIC_DESCRIPTION, DYNAMIC_VERSION, MAX_VERBOSITY,
    PYPROJECT_FILE_NAME,
};
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};
use crate::path::normalize;
use std::path::{Component, Path, PathBuf};

/// PEP 621 fields resolution fills in; other dynamic fields belong to the
/// build backend.
const RESOLVABLE_DYNAMIC_FIELDS: [&str; 2] = [DYNAMIC_VERSION, DYNAMIC_DESCRIPTION];

/// Resolves layered configuration.
///
/// # Examples
///
/// ```
/// use cppython_core::config::{
///     ConfigResolver, Pep621Configuration, Pep621Overrides, ProjectConfiguration,
/// };
///
/// let pep621 = Pep621Configuration::new("pep621-resolve-test").with_dynamic(["version"]);
/// let project = ProjectConfiguration::new("pyproject.toml").with_version("0.1.0");
///
/// let resolved =
///     ConfigResolver::resolve_pep621(&pep621, &project, &Pep621Overrides::default()).unwrap();
/// assert_eq!(resolved.name, "pep621-resolve-test");
/// assert_eq!(resolved.version, "0.1.0");
/// ```
pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolve PEP 621 metadata.
    ///
    /// Fields listed in `dynamic` take the override value if one is given,
    /// otherwise the authoritative value from `project_config`. Static
    /// fields are used as declared.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - `name` is blank or listed as dynamic
    /// - a field is both statically declared and listed as dynamic
    /// - a dynamic field has no override and no authoritative value
    /// - `version` is neither declared nor dynamic
    pub fn resolve_pep621(
        pep621: &Pep621Configuration,
        project_config: &ProjectConfiguration,
        overrides: &Pep621Overrides,
    ) -> Result<ResolvedPep621Data> {
        ConfigValidator::validate_identifier("name", &pep621.name)?;

        if pep621.is_dynamic("name") {
            return Err(Error::configuration("name", "the project name cannot be dynamic"));
        }

        for field in &pep621.dynamic {
            if field != "name" && !RESOLVABLE_DYNAMIC_FIELDS.contains(&field.as_str()) {
                log::debug!("Dynamic field '{field}' is left to the build backend");
            }
        }

        let version = Self::resolve_dynamic(
            pep621,
            DYNAMIC_VERSION,
            pep621.version.as_deref(),
            overrides.version.as_deref(),
            project_config.version.as_deref(),
        )?
        .ok_or_else(|| {
            Error::configuration(
                DYNAMIC_VERSION,
                "must be declared statically or listed in 'dynamic'",
            )
        })?;

        // Empty only when the description was never declared.
        let description = match Self::resolve_dynamic(
            pep621,
            DYNAMIC_DESCRIPTION,
            pep621.description.as_deref(),
            overrides.description.as_deref(),
            None,
        )? {
            Some(description) => {
                ConfigValidator::validate_non_blank(DYNAMIC_DESCRIPTION, &description)?;
                description
            }
            None => String::new(),
        };

        let resolved = ResolvedPep621Data {
            name: pep621.name.clone(),
            version,
            description,
        };
        ConfigValidator::validate_pep621_data(&resolved)?;

        log::debug!(
            "Resolved project metadata: {} {}",
            resolved.name,
            resolved.version
        );
        Ok(resolved)
    }

    /// Pick the value of one PEP 621 field.
    ///
    /// Returns `Ok(None)` only for a static field that was not declared.
    fn resolve_dynamic(
        pep621: &Pep621Configuration,
        field: &str,
        declared: Option<&str>,
        override_value: Option<&str>,
        authoritative: Option<&str>,
    ) -> Result<Option<String>> {
        if !pep621.is_dynamic(field) {
            if override_value.is_some() {
                log::warn!("Ignoring override for '{field}': it is not listed in 'dynamic'");
            }
            return Ok(declared.map(str::to_string));
        }

        if declared.is_some() {
            return Err(Error::configuration(
                field,
                "listed in 'dynamic' but also declared statically",
            ));
        }

        match (override_value, authoritative) {
            (Some(value), _) => {
                log::debug!("Dynamic field '{field}' taken from override");
                Ok(Some(value.to_string()))
            }
            (None, Some(value)) => {
                log::debug!("Dynamic field '{field}' taken from project configuration");
                Ok(Some(value.to_string()))
            }
            (None, None) => Err(Error::configuration(
                field,
                "listed in 'dynamic' but no value was provided",
            )),
        }
    }

    /// Resolve per-invocation project settings.
    ///
    /// The manifest path is made absolute (relative paths are taken from the
    /// current directory), the project root is its parent directory and
    /// verbosity is clamped to [`MAX_VERBOSITY`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the manifest path is empty, is not
    /// named `pyproject.toml`, cannot be normalized, or if a supplied version
    /// is blank.
    pub fn resolve_project_configuration(
        project_config: &ProjectConfiguration,
    ) -> Result<ResolvedProjectData> {
        let file = &project_config.pyproject_file;

        if file.as_os_str().is_empty() {
            return Err(Error::configuration("pyproject-file", "path cannot be empty"));
        }

        if file.file_name().and_then(|name| name.to_str()) != Some(PYPROJECT_FILE_NAME) {
            return Err(Error::configuration(
                "pyproject-file",
                format!("expected a '{PYPROJECT_FILE_NAME}' file, got {}", file.display()),
            ));
        }

        if let Some(ref version) = project_config.version {
            ConfigValidator::validate_version("version", version)?;
        }

        let pyproject_file =
            normalize::normalize(file).map_err(|e| e.into_configuration("pyproject-file"))?;
        let project_root = pyproject_file
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::configuration("pyproject-file", "manifest has no parent"))?;

        let verbosity = if project_config.verbosity > MAX_VERBOSITY {
            log::warn!(
                "Verbosity {} exceeds the maximum of {MAX_VERBOSITY}; clamping",
                project_config.verbosity
            );
            MAX_VERBOSITY
        } else {
            project_config.verbosity
        };

        let resolved = ResolvedProjectData {
            project_root,
            pyproject_file,
            verbosity,
            debug: project_config.debug,
        };
        ConfigValidator::validate_project_data(&resolved)?;

        log::debug!("Resolved project root: {}", resolved.project_root.display());
        Ok(resolved)
    }

    /// Resolve tool settings.
    ///
    /// Each setting takes the local value if present, else the global
    /// value, else a computed default:
    ///
    /// | Setting          | Default                                 |
    /// |------------------|-----------------------------------------|
    /// | `install-path`   | `~/.cppython`                           |
    /// | `tool-path`      | `<project root>/tool`                   |
    /// | `build-path`     | `<project root>/build`                  |
    /// | `current-check`  | `true`                                  |
    /// | `*-name`         | the name in `plugin_build_data`         |
    ///
    /// Relative directories from any layer are anchored at the project root.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a configured directory is empty or
    /// escapes the filesystem root, if no layer sets `install-path` and the
    /// home directory is unknown, or if a plugin name is invalid.
    pub fn resolve_cppython(
        local: &CppythonLocalConfiguration,
        global: &CppythonGlobalConfiguration,
        project_data: &ResolvedProjectData,
        plugin_build_data: &PluginBuildData,
    ) -> Result<ResolvedCppythonData> {
        let layered = ConfigMerger::layer(local, global);
        let root = &project_data.project_root;

        let install_path =
            Self::resolve_directory("install-path", layered.install_path.as_deref(), root, || {
                normalize::home_dir()
                    .map(|home| home.join(DEFAULT_INSTALL_DIR))
                    .map_err(|reason| {
                        Error::configuration(
                            "install-path",
                            format!("not configured and {reason}"),
                        )
                    })
            })?;

        let tool_path =
            Self::resolve_directory("tool-path", layered.tool_path.as_deref(), root, || {
                Ok(PathBuf::from(DEFAULT_TOOL_DIR))
            })?;

        let build_path =
            Self::resolve_directory("build-path", layered.build_path.as_deref(), root, || {
                Ok(PathBuf::from(DEFAULT_BUILD_DIR))
            })?;

        let resolved = ResolvedCppythonData {
            install_path,
            tool_path,
            build_path,
            current_check: layered.current_check.unwrap_or(DEFAULT_CURRENT_CHECK),
            provider_name: Self::resolve_name(
                "provider-name",
                layered.provider_name,
                &plugin_build_data.provider_name,
            ),
            generator_name: Self::resolve_name(
                "generator-name",
                layered.generator_name,
                &plugin_build_data.generator_name,
            ),
            scm_name: Self::resolve_name("scm-name", layered.scm_name, &plugin_build_data.scm_name),
            provider: layered.provider.unwrap_or_default(),
            generator: layered.generator.unwrap_or_default(),
        };
        ConfigValidator::validate_cppython_data(&resolved)?;

        Ok(resolved)
    }

    /// Derive settings scoped to one plugin.
    ///
    /// Every directory gains a trailing component equal to the plugin's
    /// name, so plugins never share install, tool or build directories.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the plugin name is not a single
    /// normal path component (e.g. contains a separator or is `..`).
    ///
    /// # Examples
    ///
    /// ```
    /// use cppython_core::config::{ConfigResolver, PluginKind, ResolvedCppythonData};
    /// use std::path::PathBuf;
    ///
    /// let data = ResolvedCppythonData {
    ///     install_path: PathBuf::from("/home/dev/.cppython"),
    ///     tool_path: PathBuf::from("/proj/tool"),
    ///     build_path: PathBuf::from("/proj/build"),
    ///     current_check: true,
    ///     provider_name: "vcpkg".into(),
    ///     generator_name: "cmake".into(),
    ///     scm_name: "git".into(),
    ///     provider: Default::default(),
    ///     generator: Default::default(),
    /// };
    ///
    /// let plugin = ConfigResolver::resolve_plugin(&data, PluginKind::Generator).unwrap();
    /// assert_eq!(plugin.build_path, PathBuf::from("/proj/build/cmake"));
    /// ```
    pub fn resolve_plugin(
        cppython_data: &ResolvedCppythonData,
        kind: PluginKind,
    ) -> Result<ResolvedPluginData> {
        let (name, config) = match kind {
            PluginKind::Generator => (&cppython_data.generator_name, cppython_data.generator.clone()),
            PluginKind::Provider => (&cppython_data.provider_name, cppython_data.provider.clone()),
            PluginKind::Scm => (&cppython_data.scm_name, Default::default()),
        };

        let field = format!("{kind}-name");
        ConfigValidator::validate_identifier(&field, name)?;

        let mut components = Path::new(name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(Error::configuration(
                field,
                format!("'{name}' cannot be used as a directory name"),
            ));
        }

        let resolved = ResolvedPluginData {
            kind,
            name: name.clone(),
            install_path: cppython_data.install_path.join(name),
            tool_path: cppython_data.tool_path.join(name),
            build_path: cppython_data.build_path.join(name),
            config,
        };
        ConfigValidator::validate_plugin_data(&resolved)?;

        log::debug!(
            "Resolved {kind} plugin '{name}' with build directory {}",
            resolved.build_path.display()
        );
        Ok(resolved)
    }

    /// Resolve one directory setting against the project root.
    fn resolve_directory(
        field: &str,
        configured: Option<&Path>,
        root: &Path,
        default: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<PathBuf> {
        let path = match configured {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(Error::configuration(field, "path cannot be empty"));
            }
            Some(path) => path.to_path_buf(),
            None => {
                let path = default()?;
                log::debug!("No layer sets '{field}'; defaulting to {}", path.display());
                path
            }
        };

        normalize::anchor_at(root, &path).map_err(|e| e.into_configuration(field))
    }

    /// Resolve one plugin name; the discovered name is the default.
    fn resolve_name(field: &str, configured: Option<String>, discovered: &str) -> String {
        match configured {
            Some(name) => {
                if name != discovered {
                    log::debug!("'{field}' overridden from '{discovered}' to '{name}'");
                }
                name
            }
            None => discovered.to_string(),
        }
    }
}
