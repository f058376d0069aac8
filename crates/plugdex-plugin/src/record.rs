// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin records.
//!
//! Every plugin-like entity (catalog entry, variant, custom or discovered
//! project entry, resolved definition) owns its identity fields and embeds
//! the shared attribute set as a [`PluginAttributes`] value. On the wire the
//! attributes are flattened into the owning record, and the owner rejects
//! any key that belongs to neither.

use std::collections::BTreeMap;
use std::path::PathBuf;

use plugdex_core::{Capability, Named, PlugdexError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::Command;
use crate::setting::{Setting, SettingDefinition};

/// Attributes shared by every plugin-like record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PluginAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<SettingDefinition>,
    /// Groups of setting names; at least one group must be fully set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings_group_validation: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub commands: BTreeMap<String, Command>,

    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub original: bool,

    // Extractors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,

    // Loaders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_schema: Option<String>,

    // File bundles
    /// Relative path -> whether the file is updated on upgrade.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub update: BTreeMap<PathBuf, bool>,
}

impl PluginAttributes {
    /// Look up a setting by name.
    pub fn setting(&self, name: &str) -> Option<&SettingDefinition> {
        self.settings.iter().find(|s| s.name() == name)
    }

    /// Overwrite the declared value of the named setting, re-validating it
    /// against the setting's kind.
    pub fn set_setting_value(&mut self, name: &str, raw: Value) -> Result<(), PlugdexError> {
        let setting = self
            .settings
            .iter_mut()
            .find(|s| s.name() == name)
            .ok_or_else(|| PlugdexError::schema("settings", format!("no setting named `{name}`")))?;
        setting.set_value(raw)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// An alternative implementation of a catalog plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PluginVariant {
    name: String,
    #[serde(flatten)]
    pub attributes: PluginAttributes,
}

impl PluginVariant {
    pub fn new(name: impl Into<String>, attributes: PluginAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A plugin as declared in the catalog index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct IndexedPlugin {
    name: String,
    /// Scopes the artifacts downstream tooling generates for this plugin.
    pub namespace: String,
    /// Declared order matters: the first variant is the default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<PluginVariant>,
    #[serde(flatten)]
    pub attributes: PluginAttributes,
}

impl IndexedPlugin {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        attributes: PluginAttributes,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            variants: Vec::new(),
            attributes,
        }
    }

    /// Append a variant, keeping declaration order.
    pub fn with_variant(mut self, variant: PluginVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant used when a reference names none: the first declared.
    pub fn default_variant(&self) -> Option<&PluginVariant> {
        self.variants.first()
    }

    /// Exact, case-sensitive lookup of a variant by name.
    pub fn find_variant(&self, name: &str) -> Result<&PluginVariant, PlugdexError> {
        crate::collection::find_variant(&self.name, &self.variants, name)
    }
}

/// A project-declared plugin that does not come from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CustomPlugin {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Name of the plugin this one conceptually extends. Carried as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit_from: Option<String>,
    #[serde(flatten)]
    pub attributes: PluginAttributes,
}

impl CustomPlugin {
    pub fn new(name: impl Into<String>, attributes: PluginAttributes) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            inherit_from: None,
            attributes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Minimal project reference to a catalog plugin, as produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DiscoveredPlugin {
    name: String,
    /// Install location, copied from the catalog at discovery time.
    pub pip_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl DiscoveredPlugin {
    /// Keys a discovered reference may carry on the wire.
    pub const FIELDS: &'static [&'static str] = &["name", "pip_url", "variant"];

    pub fn new(name: impl Into<String>, pip_url: impl Into<String>, variant: Option<String>) -> Self {
        Self {
            name: name.into(),
            pip_url: pip_url.into(),
            variant,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A fully resolved plugin definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Plugin {
    name: String,
    pub namespace: String,
    #[serde(flatten)]
    pub attributes: PluginAttributes,
}

impl Plugin {
    /// The base plugin's own attributes, without its variants.
    pub fn from_base(base: &IndexedPlugin) -> Self {
        Self {
            name: base.name.clone(),
            namespace: base.namespace.clone(),
            attributes: base.attributes.clone(),
        }
    }

    /// The base plugin's identity and namespace over the variant's
    /// attributes. The variant's own name is not carried over.
    pub fn from_variant(base: &IndexedPlugin, variant: &PluginVariant) -> Self {
        Self {
            name: base.name.clone(),
            namespace: base.namespace.clone(),
            attributes: variant.attributes.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Named for PluginVariant {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for IndexedPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for CustomPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for DiscoveredPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Plugin {
    fn name(&self) -> &str {
        &self.name
    }
}
