// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovery and resolution of plugin references.
//!
//! Discovery turns a catalog lookup into the minimal reference a project
//! stores. Resolution expands such a reference back into a complete
//! definition by merging the base plugin's identity with the attributes of
//! the selected variant. Neither operation mutates its inputs.

use plugdex_core::{Named, PlugdexError, PluginType};
use schemars::JsonSchema;
use serde::Serialize;
use tracing::debug;

use crate::index::PluginIndex;
use crate::project::{Project, ProjectPlugin};
use crate::record::{CustomPlugin, DiscoveredPlugin, Plugin, PluginAttributes};

/// Produce a project-level reference to a catalog plugin.
///
/// The reference records the requested `name` verbatim. Without `variant`,
/// the first declared variant is the default; a plugin with no variants
/// yields a reference with `variant: None`. With `variant`, that variant
/// must exist and its requested name is recorded verbatim too.
pub fn discover(
    index: &PluginIndex,
    plugin_type: PluginType,
    name: &str,
    variant: Option<&str>,
) -> Result<DiscoveredPlugin, PlugdexError> {
    let plugin = index.find_plugin(plugin_type, name)?;

    let discovered = match variant {
        None => match plugin.default_variant() {
            Some(default) => DiscoveredPlugin::new(
                name,
                pip_url_of(&default.attributes),
                Some(default.name().to_string()),
            ),
            None => DiscoveredPlugin::new(name, pip_url_of(&plugin.attributes), None),
        },
        Some(requested) => {
            let found = plugin.find_variant(requested)?;
            DiscoveredPlugin::new(
                name,
                pip_url_of(&found.attributes),
                Some(requested.to_string()),
            )
        }
    };

    debug!(
        plugin_type = %plugin_type,
        name = %discovered.name(),
        variant = ?discovered.variant,
        "discovered plugin"
    );
    Ok(discovered)
}

fn pip_url_of(attributes: &PluginAttributes) -> String {
    attributes.pip_url.clone().unwrap_or_default()
}

/// Expand a discovered reference into a complete plugin definition.
///
/// The base plugin is looked up again, so a reference to a plugin or
/// variant that has since left the catalog fails with a not-found error.
/// A reference without a variant to a plugin that has variants resolves to
/// the first variant, matching what [`discover`] would have recorded.
pub fn resolve(
    index: &PluginIndex,
    plugin_type: PluginType,
    discovered: &DiscoveredPlugin,
) -> Result<Plugin, PlugdexError> {
    let base = index.find_plugin(plugin_type, discovered.name())?;

    let (plugin, variant) = match discovered.variant.as_deref() {
        Some(requested) => {
            let variant = base.find_variant(requested)?;
            (Plugin::from_variant(base, variant), Some(variant.name()))
        }
        None => match base.default_variant() {
            Some(default) => (Plugin::from_variant(base, default), Some(default.name())),
            None => (Plugin::from_base(base), None),
        },
    };

    debug!(
        plugin_type = %plugin_type,
        name = %plugin.name(),
        variant = ?variant,
        "resolved plugin"
    );
    Ok(plugin)
}

/// A project plugin's effective definition.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum PluginDefinition {
    /// Declared in full by the project; the catalog is not consulted.
    Custom(CustomPlugin),
    /// Resolved from the catalog.
    Resolved(Plugin),
}

impl PluginDefinition {
    pub fn name(&self) -> &str {
        match self {
            PluginDefinition::Custom(plugin) => plugin.name(),
            PluginDefinition::Resolved(plugin) => plugin.name(),
        }
    }

    pub fn attributes(&self) -> &PluginAttributes {
        match self {
            PluginDefinition::Custom(plugin) => &plugin.attributes,
            PluginDefinition::Resolved(plugin) => &plugin.attributes,
        }
    }

    /// Resolved plugins always have a namespace; custom ones may not.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            PluginDefinition::Custom(plugin) => plugin.namespace.as_deref(),
            PluginDefinition::Resolved(plugin) => Some(&plugin.namespace),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PluginDefinition::Custom(_))
    }
}

impl Named for PluginDefinition {
    fn name(&self) -> &str {
        PluginDefinition::name(self)
    }
}

/// Effective definition of a plugin declared by `project`.
///
/// Custom entries are authoritative and returned as declared. Catalog
/// references are delegated to [`resolve`].
pub fn get_plugin_definition(
    index: &PluginIndex,
    project: &Project,
    plugin_type: PluginType,
    name: &str,
) -> Result<PluginDefinition, PlugdexError> {
    match project.find_plugin(plugin_type, name)? {
        ProjectPlugin::Custom(custom) => {
            debug!(plugin_type = %plugin_type, name = %name, "using custom plugin");
            Ok(PluginDefinition::Custom(custom.clone()))
        }
        ProjectPlugin::Discovered(discovered) => {
            resolve(index, plugin_type, discovered).map(PluginDefinition::Resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const CATALOG: &str = r#"
version: 1
extractors:
  - name: tap-gitlab
    namespace: tap_gitlab
    pip_url: tap-gitlab
  - name: tap-bare
    namespace: tap_bare
loaders:
  - name: target-postgres
    namespace: target_postgres
    label: PostgreSQL
    variants:
      - name: transferwise
        pip_url: pipelinewise-target-postgres
      - name: meltano
        pip_url: git+https://gitlab.com/meltano/target-postgres.git
        dialect: postgres
"#;

    fn index() -> PluginIndex {
        PluginIndex::from_yaml_str(CATALOG).unwrap()
    }

    #[test]
    fn discover_without_variants() {
        let discovered = discover(&index(), PluginType::Extractors, "tap-gitlab", None).unwrap();
        assert_eq!(discovered, DiscoveredPlugin::new("tap-gitlab", "tap-gitlab", None));
    }

    #[test]
    fn discover_defaults_to_first_variant() {
        let discovered = discover(&index(), PluginType::Loaders, "target-postgres", None).unwrap();
        assert_eq!(discovered.variant.as_deref(), Some("transferwise"));
        assert_eq!(discovered.pip_url, "pipelinewise-target-postgres");
    }

    #[test]
    fn discover_missing_pip_url_is_empty() {
        let discovered = discover(&index(), PluginType::Extractors, "tap-bare", None).unwrap();
        assert_eq!(discovered.pip_url, "");
    }

    #[test]
    fn discover_records_requested_names() {
        let discovered =
            discover(&index(), PluginType::Loaders, "target-postgres", Some("meltano")).unwrap();
        assert_eq!(
            discovered,
            DiscoveredPlugin::new(
                "target-postgres",
                "git+https://gitlab.com/meltano/target-postgres.git",
                Some("meltano".to_string()),
            )
        );
    }

    #[test]
    fn discover_unknown_variant_fails() {
        let err = discover(&index(), PluginType::Loaders, "target-postgres", Some("nope"))
            .unwrap_err();
        assert!(matches!(err, PlugdexError::VariantNotFound { .. }));
    }

    #[test]
    fn resolve_with_variant_uses_variant_attributes() {
        let index = index();
        let discovered =
            discover(&index, PluginType::Loaders, "target-postgres", Some("meltano")).unwrap();
        let plugin = resolve(&index, PluginType::Loaders, &discovered).unwrap();
        assert_eq!(plugin.name(), "target-postgres");
        assert_eq!(plugin.namespace, "target_postgres");
        assert_eq!(plugin.attributes.dialect.as_deref(), Some("postgres"));
        assert_eq!(plugin.attributes.label, None);
    }

    #[test]
    fn resolve_after_variant_removed_fails() {
        let discovered = DiscoveredPlugin::new(
            "target-postgres",
            "x",
            Some("datamill".to_string()),
        );
        let err = resolve(&index(), PluginType::Loaders, &discovered).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No variant 'datamill' was found for plugin 'target-postgres'"
        );
    }

    #[test]
    fn resolve_after_plugin_removed_fails() {
        let discovered = DiscoveredPlugin::new("tap-gone", "tap-gone", None);
        let err = resolve(&index(), PluginType::Extractors, &discovered).unwrap_err();
        assert!(matches!(err, PlugdexError::PluginNotFound { .. }));
    }

    #[test]
    fn definition_accessors() {
        let index = index();
        let discovered = discover(&index, PluginType::Extractors, "tap-gitlab", None).unwrap();
        let definition =
            PluginDefinition::Resolved(resolve(&index, PluginType::Extractors, &discovered).unwrap());
        assert_eq!(definition.name(), "tap-gitlab");
        assert_eq!(definition.namespace(), Some("tap_gitlab"));
        assert_eq!(definition.attributes().pip_url.as_deref(), Some("tap-gitlab"));
        assert!(!definition.is_custom());
    }

    #[traced_test]
    #[test]
    fn discovery_and_resolution_are_logged() {
        let index = index();
        let discovered = discover(&index, PluginType::Loaders, "target-postgres", None).unwrap();
        resolve(&index, PluginType::Loaders, &discovered).unwrap();
        assert!(logs_contain("discovered plugin"));
        assert!(logs_contain("resolved plugin"));
        assert!(logs_contain("transferwise"));
    }
}
