// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin categories, capabilities, and the naming trait shared by every
//! plugin-like record.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the nine fixed plugin categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PluginType {
    Extractors,
    Loaders,
    Transformers,
    Transforms,
    Models,
    Dashboards,
    Orchestrators,
    Files,
    Utilities,
}

impl PluginType {
    /// All categories in document order.
    pub const ALL: [PluginType; 9] = [
        PluginType::Extractors,
        PluginType::Loaders,
        PluginType::Transformers,
        PluginType::Transforms,
        PluginType::Models,
        PluginType::Dashboards,
        PluginType::Orchestrators,
        PluginType::Files,
        PluginType::Utilities,
    ];

    /// Categories whose entries are carried as untyped values instead of
    /// structured plugin records.
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            PluginType::Transforms | PluginType::Models | PluginType::Dashboards
        )
    }
}

/// Capabilities an extractor can advertise.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    State,
    Discover,
    Catalog,
    Properties,
    ActivateVersion,
    SoftDelete,
    HardDelete,
    DatatypeFailsafe,
    RecordFlattening,
}

/// Anything identified by a name within its collection.
///
/// Lookups in the index and in project manifests scan collections of
/// `Named` records, so one implementation serves both.
pub trait Named {
    fn name(&self) -> &str;
}
