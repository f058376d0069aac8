// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The project manifest.
//!
//! A project declares the plugins it uses. Each entry is either a full
//! custom definition or a reference to a catalog plugin, and the two are
//! told apart by their shape alone.

use std::path::Path;

use plugdex_core::{Named, PlugdexError, PluginType};
use schemars::JsonSchema;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::collection::{self, Plugins};
use crate::record::{CustomPlugin, DiscoveredPlugin};
use crate::validation;

/// One plugin entry in a project manifest.
///
/// An entry whose keys are all drawn from `name`, `pip_url`, and `variant`,
/// and which carries a `pip_url`, is a catalog reference. Anything else is a
/// custom plugin and must satisfy the full custom schema.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ProjectPlugin {
    Discovered(DiscoveredPlugin),
    Custom(CustomPlugin),
}

impl ProjectPlugin {
    pub fn name(&self) -> &str {
        match self {
            ProjectPlugin::Discovered(plugin) => plugin.name(),
            ProjectPlugin::Custom(plugin) => plugin.name(),
        }
    }

    pub fn as_custom(&self) -> Option<&CustomPlugin> {
        match self {
            ProjectPlugin::Custom(plugin) => Some(plugin),
            ProjectPlugin::Discovered(_) => None,
        }
    }

    pub fn as_discovered(&self) -> Option<&DiscoveredPlugin> {
        match self {
            ProjectPlugin::Discovered(plugin) => Some(plugin),
            ProjectPlugin::Custom(_) => None,
        }
    }

    /// A record is a catalog reference when it carries `pip_url` and nothing
    /// outside the reference fields.
    ///
    /// The shapes overlap: `{name, pip_url}` is also a valid custom plugin,
    /// and is read as a reference. Adding any custom-only field, or dropping
    /// `pip_url`, makes the entry custom.
    fn is_discovered_shape(record: &Map<String, Value>) -> bool {
        record.contains_key("pip_url")
            && record
                .keys()
                .all(|key| DiscoveredPlugin::FIELDS.contains(&key.as_str()))
    }
}

impl Named for ProjectPlugin {
    fn name(&self) -> &str {
        ProjectPlugin::name(self)
    }
}

impl From<DiscoveredPlugin> for ProjectPlugin {
    fn from(plugin: DiscoveredPlugin) -> Self {
        ProjectPlugin::Discovered(plugin)
    }
}

impl From<CustomPlugin> for ProjectPlugin {
    fn from(plugin: CustomPlugin) -> Self {
        ProjectPlugin::Custom(plugin)
    }
}

impl<'de> Deserialize<'de> for ProjectPlugin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        let discovered = Self::is_discovered_shape(&record);
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();
        let value = Value::Object(record);

        if discovered {
            serde_json::from_value(value)
                .map(ProjectPlugin::Discovered)
                .map_err(|e| de::Error::custom(format!("plugin `{name}`: {e}")))
        } else {
            serde_json::from_value(value)
                .map(ProjectPlugin::Custom)
                .map_err(|e| de::Error::custom(format!("custom plugin `{name}`: {e}")))
        }
    }
}

fn default_true() -> bool {
    true
}

/// A project manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub version: i64,
    pub project_id: Uuid,
    #[serde(default)]
    pub plugins: Plugins<ProjectPlugin>,
    #[serde(default = "default_true")]
    pub send_anonymous_usage_stats: bool,
    #[serde(default)]
    pub include_paths: Vec<String>,
}

impl Project {
    /// Document name used in error messages for in-memory manifests.
    pub const DOCUMENT: &'static str = "project";

    /// An empty manifest with a fresh project id.
    pub fn new(version: i64) -> Self {
        Self {
            version,
            project_id: Uuid::new_v4(),
            plugins: Plugins::default(),
            send_anonymous_usage_stats: true,
            include_paths: Vec::new(),
        }
    }

    /// Parse and validate a project manifest.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PlugdexError> {
        Self::parse(yaml, Self::DOCUMENT)
    }

    /// Read, parse, and validate a project manifest from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PlugdexError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PlugdexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(yaml: &str, document: &str) -> Result<Self, PlugdexError> {
        let project: Project =
            serde_yaml::from_str(yaml).map_err(|e| PlugdexError::schema(document, e.to_string()))?;

        validation::validate_project(&project)
            .map_err(|errors| PlugdexError::schema(document, errors.join("; ")))?;

        info!(
            document = %document,
            project_id = %project.project_id,
            plugins = project.plugins.typed_len(),
            "project loaded"
        );
        Ok(project)
    }

    /// Exact, case-sensitive lookup of a declared plugin.
    pub fn find_plugin(
        &self,
        plugin_type: PluginType,
        name: &str,
    ) -> Result<&ProjectPlugin, PlugdexError> {
        collection::find_plugin(&self.plugins, plugin_type, name)
    }
}
