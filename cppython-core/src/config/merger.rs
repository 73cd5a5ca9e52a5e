//! Configuration layering.
//!
//! Tool settings arrive in layers: the user-wide global configuration, the
//! project-local `[tool.cppython]` table and finally environment or
//! command line overrides. This module folds them into a single, still
//! partially populated, configuration that resolution then completes.

use crate::config::schema::{
    CppythonGlobalConfiguration, CppythonLocalConfiguration, PluginTable,
};

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use cppython_core::config::{ConfigMerger, CppythonLocalConfiguration};
///
/// let low = CppythonLocalConfiguration { scm_name: Some("low".into()), ..Default::default() };
/// let high = CppythonLocalConfiguration { scm_name: Some("high".into()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.scm_name.as_deref(), Some("high"));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Layer a local configuration over a global one.
    ///
    /// The result holds, for every field, the local value if present and
    /// otherwise the global value.
    #[must_use]
    pub fn layer(
        local: &CppythonLocalConfiguration,
        global: &CppythonGlobalConfiguration,
    ) -> CppythonLocalConfiguration {
        let mut result = CppythonLocalConfiguration::from(global.clone());
        Self::merge_into(&mut result, local);
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Plugin tables: merged key by key, source keys win
    pub fn merge_into(target: &mut CppythonLocalConfiguration, source: &CppythonLocalConfiguration) {
        if source.install_path.is_some() {
            target.install_path.clone_from(&source.install_path);
        }

        if source.tool_path.is_some() {
            target.tool_path.clone_from(&source.tool_path);
        }

        if source.build_path.is_some() {
            target.build_path.clone_from(&source.build_path);
        }

        if source.current_check.is_some() {
            target.current_check = source.current_check;
        }

        if source.provider_name.is_some() {
            target.provider_name.clone_from(&source.provider_name);
        }

        if source.generator_name.is_some() {
            target.generator_name.clone_from(&source.generator_name);
        }

        if source.scm_name.is_some() {
            target.scm_name.clone_from(&source.scm_name);
        }

        Self::merge_table(&mut target.provider, source.provider.as_ref());
        Self::merge_table(&mut target.generator, source.generator.as_ref());
    }

    fn merge_table(target: &mut Option<PluginTable>, source: Option<&PluginTable>) {
        let Some(source) = source else {
            return;
        };

        match target {
            Some(existing) => {
                for (key, value) in source {
                    existing.insert(key.clone(), value.clone());
                }
            }
            None => *target = Some(source.clone()),
        }
    }
}
