// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Category-keyed plugin collections and the lookups over them.
//!
//! `Plugins<T>` holds one ordered sequence per [`PluginType`]. Six categories
//! are typed by `T`; transforms, models, and dashboards are carried through
//! as untyped values.

use plugdex_core::{Named, PlugdexError, PluginType, closest_match};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sequence of plugins per category.
///
/// Missing categories are empty; `T` itself need not implement `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Plugins<T> {
    #[serde(default)]
    pub extractors: Vec<T>,
    #[serde(default)]
    pub loaders: Vec<T>,
    #[serde(default)]
    pub transformers: Vec<T>,
    #[serde(default)]
    pub transforms: Vec<Value>,
    #[serde(default)]
    pub models: Vec<Value>,
    #[serde(default)]
    pub dashboards: Vec<Value>,
    #[serde(default)]
    pub orchestrators: Vec<T>,
    #[serde(default)]
    pub files: Vec<T>,
    #[serde(default)]
    pub utilities: Vec<T>,
}

impl<T> Default for Plugins<T> {
    fn default() -> Self {
        Self {
            extractors: Vec::new(),
            loaders: Vec::new(),
            transformers: Vec::new(),
            transforms: Vec::new(),
            models: Vec::new(),
            dashboards: Vec::new(),
            orchestrators: Vec::new(),
            files: Vec::new(),
            utilities: Vec::new(),
        }
    }
}

/// Borrowed view of one category's entries.
#[derive(Debug)]
pub enum CategoryEntries<'a, T> {
    Typed(&'a [T]),
    PassThrough(&'a [Value]),
}

impl<'a, T> CategoryEntries<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            CategoryEntries::Typed(entries) => entries.len(),
            CategoryEntries::PassThrough(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The typed records, or `None` for a pass-through category.
    pub fn typed(&self) -> Option<&'a [T]> {
        match self {
            CategoryEntries::Typed(entries) => Some(entries),
            CategoryEntries::PassThrough(_) => None,
        }
    }
}

impl<T> Plugins<T> {
    /// Entries of one category.
    pub fn category(&self, plugin_type: PluginType) -> CategoryEntries<'_, T> {
        match plugin_type {
            PluginType::Extractors => CategoryEntries::Typed(&self.extractors),
            PluginType::Loaders => CategoryEntries::Typed(&self.loaders),
            PluginType::Transformers => CategoryEntries::Typed(&self.transformers),
            PluginType::Transforms => CategoryEntries::PassThrough(&self.transforms),
            PluginType::Models => CategoryEntries::PassThrough(&self.models),
            PluginType::Dashboards => CategoryEntries::PassThrough(&self.dashboards),
            PluginType::Orchestrators => CategoryEntries::Typed(&self.orchestrators),
            PluginType::Files => CategoryEntries::Typed(&self.files),
            PluginType::Utilities => CategoryEntries::Typed(&self.utilities),
        }
    }

    /// Typed records of one category; empty for pass-through categories.
    pub fn typed(&self, plugin_type: PluginType) -> &[T] {
        self.category(plugin_type).typed().unwrap_or(&[])
    }

    /// Every category with its entries, in document order.
    pub fn mapping(&self) -> impl Iterator<Item = (PluginType, CategoryEntries<'_, T>)> + '_ {
        PluginType::ALL
            .into_iter()
            .map(move |plugin_type| (plugin_type, self.category(plugin_type)))
    }

    /// Number of typed records across all categories.
    pub fn typed_len(&self) -> usize {
        PluginType::ALL
            .into_iter()
            .map(|plugin_type| self.typed(plugin_type).len())
            .sum()
    }
}

/// Find the first plugin named `name` in a category.
///
/// Matching is exact and case-sensitive. A miss is an ordinary outcome
/// reported as [`PlugdexError::PluginNotFound`]; pass-through categories
/// never match.
pub fn find_plugin<'a, T: Named>(
    plugins: &'a Plugins<T>,
    plugin_type: PluginType,
    name: &str,
) -> Result<&'a T, PlugdexError> {
    let candidates = plugins.typed(plugin_type);
    candidates
        .iter()
        .find(|plugin| plugin.name() == name)
        .ok_or_else(|| PlugdexError::PluginNotFound {
            plugin_type,
            name: name.to_string(),
            suggestion: closest_match(name, candidates.iter().map(Named::name)),
        })
}

/// Find the variant named `name` among `plugin`'s variants.
///
/// Same matching rules as [`find_plugin`]; a miss is
/// [`PlugdexError::VariantNotFound`].
pub fn find_variant<'a, T: Named>(
    plugin: &str,
    variants: &'a [T],
    name: &str,
) -> Result<&'a T, PlugdexError> {
    variants
        .iter()
        .find(|variant| variant.name() == name)
        .ok_or_else(|| PlugdexError::VariantNotFound {
            plugin: plugin.to_string(),
            variant: name.to_string(),
        })
}
