//! Integration tests for configuration resolution.
//!
//! These tests parse manifest snippets the way a caller would (with the
//! `toml` crate), hand the parsed tables to the resolver and check the
//! complete result.
//!
//! Tests that modify environment variables are marked with `#[serial]`;
//! environment variables are process-global, so concurrent access would
//! race.

use serde::Deserialize;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cppython_core::config::{
    ConfigBuilder, ConfigResolver, CppythonGlobalConfiguration, CppythonLocalConfiguration,
    Pep621Configuration, Pep621Overrides, PluginBuildData, PluginKind, ProjectConfiguration,
};
use cppython_core::Error;

// ============================================================================
// Test Utilities
// ============================================================================

/// The parts of `pyproject.toml` the resolver consumes.
#[derive(Debug, Deserialize)]
struct PyProject {
    project: Pep621Configuration,
    #[serde(default)]
    tool: Tool,
}

#[derive(Debug, Default, Deserialize)]
struct Tool {
    #[serde(default)]
    cppython: CppythonLocalConfiguration,
}

/// Writes `content` as `pyproject.toml` in a fresh directory and parses it.
fn write_project(content: &str) -> (TempDir, PathBuf, PyProject) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pyproject.toml");
    fs::write(&path, content).unwrap();
    let parsed: PyProject = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    (dir, path, parsed)
}

fn plugins() -> PluginBuildData {
    PluginBuildData::new("generator", "provider", "scm")
}

/// Sets one environment variable and restores its previous value on drop.
struct EnvGuard {
    key: &'static str,
    saved: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let saved = env::var(key).ok();
        env::set_var(key, value);
        Self { key, saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.saved.take() {
            Some(v) => env::set_var(self.key, v),
            None => env::remove_var(self.key),
        }
    }
}

/// Resolved paths are lexical, so compare against the tempdir as given.
fn root_of(path: &Path) -> PathBuf {
    path.parent().unwrap().to_path_buf()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_minimal_manifest_resolves_with_defaults() {
    let (_dir, path, manifest) = write_project(
        r#"
[project]
name = "pep621-resolve-test"
dynamic = ["version"]
"#,
    );

    let resolved = ConfigBuilder::new(
        ProjectConfiguration::new(&path).with_version("0.1.0"),
        manifest.project,
        plugins(),
    )
    .with_local(manifest.tool.cppython)
    .skip_env()
    .build()
    .unwrap();

    let root = root_of(&path);
    assert_eq!(resolved.project.project_root, root);
    assert_eq!(resolved.pep621.name, "pep621-resolve-test");
    assert_eq!(resolved.pep621.version, "0.1.0");
    assert_eq!(resolved.cppython.tool_path, root.join("tool"));
    assert_eq!(resolved.cppython.build_path, root.join("build"));
    assert!(resolved.cppython.current_check);
}

#[test]
fn test_full_manifest_layers_over_global() {
    let (_dir, path, manifest) = write_project(
        r#"
[project]
name = "layered"
version = "2.1.0"
description = "Layered configuration"

[tool.cppython]
build-path = "out/cmake"
generator-name = "cmake"

[tool.cppython.generator]
preset = "ninja-release"
"#,
    );

    let global = CppythonGlobalConfiguration {
        install_path: Some(PathBuf::from("/opt/cppython")),
        build_path: Some(PathBuf::from("ignored")),
        current_check: Some(false),
        ..Default::default()
    };

    let resolved = ConfigBuilder::new(ProjectConfiguration::new(&path), manifest.project, plugins())
        .with_local(manifest.tool.cppython)
        .with_global(global)
        .skip_env()
        .build()
        .unwrap();

    let root = root_of(&path);
    assert_eq!(resolved.pep621.version, "2.1.0");
    assert_eq!(resolved.pep621.description, "Layered configuration");
    assert_eq!(resolved.cppython.build_path, root.join("out").join("cmake"));
    assert!(!resolved.cppython.current_check);
    assert_eq!(resolved.cppython.generator_name, "cmake");
    assert_eq!(resolved.cppython.provider_name, "provider");

    let generator = resolved.plugin(PluginKind::Generator).unwrap();
    assert_eq!(generator.build_path, root.join("out").join("cmake").join("cmake"));
    assert_eq!(generator.config["preset"], serde_json::json!("ninja-release"));
}

#[test]
#[cfg(unix)]
fn test_global_install_path_is_used() {
    let (_dir, path, manifest) = write_project("[project]\nname = \"g\"\nversion = \"1\"\n");

    let global = CppythonGlobalConfiguration {
        install_path: Some(PathBuf::from("/opt/cppython")),
        ..Default::default()
    };
    let resolved = ConfigBuilder::new(ProjectConfiguration::new(&path), manifest.project, plugins())
        .with_global(global)
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(resolved.cppython.install_path, PathBuf::from("/opt/cppython"));
    let provider = resolved.plugin(PluginKind::Provider).unwrap();
    assert_eq!(provider.install_path, PathBuf::from("/opt/cppython/provider"));
}

#[test]
fn test_missing_dynamic_version_is_configuration_error() {
    let (_dir, path, manifest) = write_project(
        r#"
[project]
name = "no-version"
dynamic = ["version"]
"#,
    );

    let err = ConfigBuilder::new(ProjectConfiguration::new(&path), manifest.project, plugins())
        .skip_env()
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { ref field, .. } if field == "version"));
}

#[test]
fn test_empty_layers_resolve_from_defaults_alone() {
    let (_dir, path, _) = write_project("[project]\nname = \"x\"\nversion = \"1\"\n");
    let project = ConfigResolver::resolve_project_configuration(&ProjectConfiguration::new(&path))
        .unwrap();

    let resolved = ConfigResolver::resolve_cppython(
        &CppythonLocalConfiguration::default(),
        &CppythonGlobalConfiguration::default(),
        &project,
        &plugins(),
    );
    assert!(resolved.is_ok());
}

#[test]
fn test_reresolving_full_configuration_is_stable() {
    let (_dir, path, manifest) = write_project(
        r#"
[project]
name = "stable"
dynamic = ["version"]

[tool.cppython]
tool-path = "../shared-tools"
"#,
    );

    let first = ConfigBuilder::new(
        ProjectConfiguration::new(&path).with_version("3.0"),
        manifest.project,
        plugins(),
    )
    .with_local(manifest.tool.cppython)
    .skip_env()
    .build()
    .unwrap();

    let second = ConfigBuilder::new(
        first.project.clone().into(),
        first.pep621.clone().into(),
        PluginBuildData::new("a", "b", "c"),
    )
    .with_local(first.cppython.clone().into())
    .skip_env()
    .build()
    .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_overrides_fill_dynamic_description() {
    let (_dir, path, manifest) = write_project(
        r#"
[project]
name = "described"
version = "1.0"
dynamic = ["description"]
"#,
    );

    let resolved = ConfigBuilder::new(ProjectConfiguration::new(&path), manifest.project, plugins())
        .with_overrides(Pep621Overrides {
            version: None,
            description: Some("from the command line".into()),
        })
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(resolved.pep621.description, "from the command line");
}

#[test]
#[serial]
fn test_environment_layer_beats_local() {
    let (_dir, path, manifest) = write_project(
        r#"
[project]
name = "env"
version = "1.0"

[tool.cppython]
scm-name = "local-scm"
"#,
    );

    let _scm = EnvGuard::set("CPPYTHON_SCM_NAME", "env-scm");

    let resolved = ConfigBuilder::new(ProjectConfiguration::new(&path), manifest.project, plugins())
        .with_local(manifest.tool.cppython)
        .build()
        .unwrap();

    assert_eq!(resolved.cppython.scm_name, "env-scm");
}

#[test]
fn test_unknown_tool_key_rejected_at_parse_time() {
    let result: Result<PyProject, _> = toml::from_str(
        r#"
[project]
name = "typo"

[tool.cppython]
biuld-path = "out"
"#,
    );
    assert!(result.is_err());
}
