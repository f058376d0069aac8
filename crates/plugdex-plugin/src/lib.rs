// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin catalog index, project manifest, settings schema, and resolution.
//!
//! The catalog ([`PluginIndex`]) lists every known plugin per category, each
//! with optional variants. A [`Project`] declares the plugins it uses, either
//! as full custom definitions or as references into the catalog. The
//! resolution engine turns a reference into a complete [`Plugin`] by merging
//! the catalog entry with its selected variant.

pub mod collection;
pub mod command;
pub mod index;
pub mod project;
pub mod record;
pub mod resolution;
pub mod schema;
pub mod setting;
pub mod validation;

pub use collection::{CategoryEntries, Plugins, find_plugin, find_variant};
pub use command::Command;
pub use index::PluginIndex;
pub use project::{Project, ProjectPlugin};
pub use record::{
    CustomPlugin, DiscoveredPlugin, IndexedPlugin, Plugin, PluginAttributes, PluginVariant,
};
pub use resolution::{PluginDefinition, discover, get_plugin_definition, resolve};
pub use schema::{SchemaTarget, index_schema, project_schema};
pub use setting::{Setting, SettingDefinition, SettingValue};
