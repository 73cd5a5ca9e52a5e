//! Property-based tests for configuration resolution.

use super::merger::ConfigMerger;
use super::resolver::ConfigResolver;
use super::schema::{
    CppythonGlobalConfiguration, CppythonLocalConfiguration, Pep621Configuration, Pep621Overrides,
    PluginBuildData, ProjectConfiguration, ResolvedProjectData, DEFAULT_BUILD_DIR,
    DEFAULT_CURRENT_CHECK, DEFAULT_TOOL_DIR, PYPROJECT_FILE_NAME,
};
use proptest::prelude::*;
use std::path::PathBuf;

fn project_data() -> ResolvedProjectData {
    let root = std::env::temp_dir().join("cppython-proptest");
    ResolvedProjectData {
        pyproject_file: root.join(PYPROJECT_FILE_NAME),
        project_root: root,
        verbosity: 0,
        debug: false,
    }
}

// Relative directory names, one or two components deep
fn relative_dir_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec("[a-z][a-z0-9_-]{0,7}", 1..=2).prop_map(|parts| parts.join("/").into())
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

// Tool settings without install-path so defaults never depend on $HOME
fn layer_strategy() -> impl Strategy<Value = CppythonLocalConfiguration> {
    (
        prop::option::of(relative_dir_strategy()),
        prop::option::of(relative_dir_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(name_strategy()),
        prop::option::of(name_strategy()),
        prop::option::of(name_strategy()),
    )
        .prop_map(
            |(tool_path, build_path, current_check, provider, generator, scm)| {
                CppythonLocalConfiguration {
                    tool_path,
                    build_path,
                    current_check,
                    provider_name: provider,
                    generator_name: generator,
                    scm_name: scm,
                    ..Default::default()
                }
            },
        )
}

fn as_global(layer: &CppythonLocalConfiguration) -> CppythonGlobalConfiguration {
    CppythonGlobalConfiguration {
        install_path: layer.install_path.clone(),
        tool_path: layer.tool_path.clone(),
        build_path: layer.build_path.clone(),
        current_check: layer.current_check,
        provider_name: layer.provider_name.clone(),
        generator_name: layer.generator_name.clone(),
        scm_name: layer.scm_name.clone(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every setting equals the local value, else the global value, else the default
    #[test]
    fn resolve_precedence_is_total(
        local in layer_strategy(),
        global in layer_strategy(),
        plugins in (name_strategy(), name_strategy(), name_strategy()),
    ) {
        let project = project_data();
        let root = &project.project_root;
        let plugins = PluginBuildData::new(plugins.0, plugins.1, plugins.2);
        let global = as_global(&global);

        let resolved =
            ConfigResolver::resolve_cppython(&local, &global, &project, &plugins).unwrap();

        let expected_tool = local
            .tool_path
            .clone()
            .or_else(|| global.tool_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL_DIR));
        prop_assert_eq!(&resolved.tool_path, &root.join(expected_tool));

        let expected_build = local
            .build_path
            .clone()
            .or_else(|| global.build_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
        prop_assert_eq!(&resolved.build_path, &root.join(expected_build));

        prop_assert_eq!(
            resolved.current_check,
            local.current_check.or(global.current_check).unwrap_or(DEFAULT_CURRENT_CHECK)
        );

        let expected_provider = local
            .provider_name
            .clone()
            .or_else(|| global.provider_name.clone())
            .unwrap_or_else(|| plugins.provider_name.clone());
        prop_assert_eq!(&resolved.provider_name, &expected_provider);

        let expected_generator = local
            .generator_name
            .clone()
            .or_else(|| global.generator_name.clone())
            .unwrap_or_else(|| plugins.generator_name.clone());
        prop_assert_eq!(&resolved.generator_name, &expected_generator);

        let expected_scm = local
            .scm_name
            .clone()
            .or_else(|| global.scm_name.clone())
            .unwrap_or_else(|| plugins.scm_name.clone());
        prop_assert_eq!(&resolved.scm_name, &expected_scm);
    }

    // Feeding resolved settings back in as the local layer changes nothing
    #[test]
    fn resolve_cppython_idempotent(
        local in layer_strategy(),
        global in layer_strategy(),
    ) {
        let project = project_data();
        let plugins = PluginBuildData::new("generator", "provider", "scm");
        let global = as_global(&global);

        let first = ConfigResolver::resolve_cppython(&local, &global, &project, &plugins).unwrap();
        let second = ConfigResolver::resolve_cppython(
            &first.clone().into(),
            &CppythonGlobalConfiguration::default(),
            &project,
            &plugins,
        )
        .unwrap();

        prop_assert_eq!(first, second);
    }

    // Resolved PEP 621 metadata re-resolves to itself
    #[test]
    fn resolve_pep621_idempotent(
        name in name_strategy(),
        version in "[0-9]{1,3}\\.[0-9]{1,3}(\\.[0-9]{1,3})?",
        dynamic in any::<bool>(),
    ) {
        let project = ProjectConfiguration::new(PYPROJECT_FILE_NAME).with_version(version.clone());
        let pep621 = if dynamic {
            Pep621Configuration::new(name).with_dynamic(["version"])
        } else {
            Pep621Configuration::new(name).with_version(version.clone())
        };

        let first =
            ConfigResolver::resolve_pep621(&pep621, &project, &Pep621Overrides::default()).unwrap();
        prop_assert_eq!(&first.version, &version);

        let second = ConfigResolver::resolve_pep621(
            &first.clone().into(),
            &ProjectConfiguration::new(PYPROJECT_FILE_NAME),
            &Pep621Overrides::default(),
        )
        .unwrap();
        prop_assert_eq!(first, second);
    }

    // Resolved project data re-resolves to itself
    #[test]
    fn resolve_project_idempotent(
        dir in relative_dir_strategy(),
        verbosity in 0u8..=10,
        debug in any::<bool>(),
    ) {
        let config = ProjectConfiguration {
            pyproject_file: dir.join(PYPROJECT_FILE_NAME),
            version: None,
            verbosity,
            debug,
        };

        let first = ConfigResolver::resolve_project_configuration(&config).unwrap();
        prop_assert!(first.project_root.is_absolute());

        let second = ConfigResolver::resolve_project_configuration(&first.clone().into()).unwrap();
        prop_assert_eq!(first, second);
    }

    // Empty layer is identity element for merge
    #[test]
    fn merge_empty_is_identity(config in layer_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &CppythonLocalConfiguration::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = CppythonLocalConfiguration::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    // Merging is associative
    #[test]
    fn merge_associative(
        a in layer_strategy(),
        b in layer_strategy(),
        c in layer_strategy(),
    ) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        let mut right = a;
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left, right);
    }
}
