// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The catalog index: every known plugin, grouped by category.
//!
//! An index is loaded once from a YAML document, validated, and never
//! mutated afterwards. Reloading produces a new value.

use std::path::Path;

use plugdex_core::{PlugdexError, PluginType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::collection::{self, Plugins};
use crate::record::IndexedPlugin;
use crate::validation;

/// The global plugin catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PluginIndex {
    pub version: i64,
    #[serde(flatten)]
    pub plugins: Plugins<IndexedPlugin>,
}

impl PluginIndex {
    /// Document name used in error messages for in-memory catalogs.
    pub const DOCUMENT: &'static str = "catalog";

    pub fn new(version: i64, plugins: Plugins<IndexedPlugin>) -> Self {
        Self { version, plugins }
    }

    /// Parse and validate a catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PlugdexError> {
        Self::parse(yaml, Self::DOCUMENT)
    }

    /// Read, parse, and validate a catalog document from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PlugdexError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PlugdexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(yaml: &str, document: &str) -> Result<Self, PlugdexError> {
        let index: PluginIndex =
            serde_yaml::from_str(yaml).map_err(|e| PlugdexError::schema(document, e.to_string()))?;

        validation::validate_index(&index)
            .map_err(|errors| PlugdexError::schema(document, errors.join("; ")))?;

        info!(
            document = %document,
            version = index.version,
            plugins = index.plugins.typed_len(),
            "catalog loaded"
        );
        Ok(index)
    }

    /// Exact, case-sensitive lookup of a catalog plugin.
    pub fn find_plugin(
        &self,
        plugin_type: PluginType,
        name: &str,
    ) -> Result<&IndexedPlugin, PlugdexError> {
        collection::find_plugin(&self.plugins, plugin_type, name)
    }

    /// Catalog plugins whose name, label, or description contains `query`,
    /// case-insensitively. An empty query returns every plugin.
    pub fn search(&self, query: &str) -> Vec<(PluginType, &IndexedPlugin)> {
        let query = query.to_lowercase();
        let matches = |plugin: &IndexedPlugin| {
            query.is_empty()
                || plugin.name().to_lowercase().contains(&query)
                || [&plugin.attributes.label, &plugin.attributes.description]
                    .into_iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&query))
        };

        PluginType::ALL
            .into_iter()
            .flat_map(|plugin_type| {
                self.plugins
                    .typed(plugin_type)
                    .iter()
                    .map(move |plugin| (plugin_type, plugin))
            })
            .filter(|(_, plugin)| matches(plugin))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
version: 20
extractors:
  - name: tap-gitlab
    namespace: tap_gitlab
    label: GitLab
    description: Code hosting platform
    pip_url: tap-gitlab
  - name: tap-github
    namespace: tap_github
    label: GitHub
    pip_url: tap-github
loaders:
  - name: target-csv
    namespace: target_csv
    description: Comma separated values
    pip_url: target-csv
"#;

    #[test]
    fn load_catalog_from_str() {
        let index = PluginIndex::from_yaml_str(CATALOG).unwrap();
        assert_eq!(index.version, 20);
        assert_eq!(index.plugins.extractors.len(), 2);
        assert_eq!(index.plugins.loaders.len(), 1);
        assert!(index.plugins.transformers.is_empty());
    }

    #[test]
    fn unknown_top_level_key_fails_the_load() {
        let yaml = format!("{CATALOG}widgets:\n  - name: w\n");
        let err = PluginIndex::from_yaml_str(&yaml).unwrap_err();
        match err {
            PlugdexError::SchemaValidation { document, message } => {
                assert_eq!(document, "catalog");
                assert!(message.contains("widgets"), "got: {message}");
            }
            other => panic!("expected SchemaValidation, got {other:?}"),
        }
    }

    #[test]
    fn missing_version_fails_the_load() {
        let err = PluginIndex::from_yaml_str("extractors: []\n").unwrap_err();
        assert!(matches!(err, PlugdexError::SchemaValidation { .. }));
    }

    #[test]
    fn duplicate_names_fail_the_load() {
        let yaml = r#"
version: 1
loaders:
  - name: target-csv
    namespace: target_csv
  - name: target-csv
    namespace: target_csv_2
"#;
        let err = PluginIndex::from_yaml_str(yaml).unwrap_err().to_string();
        assert!(err.contains("duplicate loaders plugin `target-csv`"), "got: {err}");
    }

    #[test]
    fn find_plugin_delegates_to_collection() {
        let index = PluginIndex::from_yaml_str(CATALOG).unwrap();
        assert_eq!(
            index
                .find_plugin(PluginType::Extractors, "tap-gitlab")
                .unwrap()
                .namespace,
            "tap_gitlab"
        );
        assert!(index.find_plugin(PluginType::Loaders, "tap-gitlab").is_err());
    }

    #[test]
    fn search_is_case_insensitive_across_name_label_description() {
        let index = PluginIndex::from_yaml_str(CATALOG).unwrap();

        let by_label = index.search("GITHUB");
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].1.name(), "tap-github");

        let by_description = index.search("comma separated");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].0, PluginType::Loaders);

        assert_eq!(index.search("tap-").len(), 2);
        assert_eq!(index.search("").len(), 3);
        assert!(index.search("xyz_nonexistent").is_empty());
    }

    #[test]
    fn load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discovery.yml");
        std::fs::write(&path, CATALOG).unwrap();
        let index = PluginIndex::from_yaml_file(&path).unwrap();
        assert_eq!(index.plugins.typed_len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PluginIndex::from_yaml_file("/nonexistent/discovery.yml").unwrap_err();
        assert!(matches!(err, PlugdexError::Io { .. }));
    }
}
