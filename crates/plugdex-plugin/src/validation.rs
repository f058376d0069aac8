// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for catalog and project documents.
//!
//! Checks the uniqueness and cross-reference rules serde attributes cannot
//! express. Every violation is collected; nothing fails fast.

use std::collections::HashSet;

use plugdex_core::{Named, PluginType};

use crate::collection::Plugins;
use crate::index::PluginIndex;
use crate::project::{Project, ProjectPlugin};
use crate::record::PluginAttributes;
use crate::setting::Setting;

/// Validate a deserialized catalog.
pub fn validate_index(index: &PluginIndex) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_unique_names(&index.plugins, &mut errors);

    for plugin_type in PluginType::ALL {
        for plugin in index.plugins.typed(plugin_type) {
            let owner = format!("{plugin_type} plugin `{}`", plugin.name());
            check_attributes(&owner, &plugin.attributes, &mut errors);

            let mut seen = HashSet::new();
            for variant in &plugin.variants {
                if !seen.insert(variant.name()) {
                    errors.push(format!("duplicate variant `{}` in {owner}", variant.name()));
                }
                let owner = format!("{owner} variant `{}`", variant.name());
                check_attributes(&owner, &variant.attributes, &mut errors);
            }
        }
    }

    finish(errors)
}

/// Validate a deserialized project manifest.
pub fn validate_project(project: &Project) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_unique_names(&project.plugins, &mut errors);

    for plugin_type in PluginType::ALL {
        for plugin in project.plugins.typed(plugin_type) {
            if let ProjectPlugin::Custom(custom) = plugin {
                let owner = format!("{plugin_type} plugin `{}`", custom.name());
                check_attributes(&owner, &custom.attributes, &mut errors);
            }
        }
    }

    finish(errors)
}

fn check_unique_names<T: Named>(plugins: &Plugins<T>, errors: &mut Vec<String>) {
    for plugin_type in PluginType::ALL {
        let mut seen = HashSet::new();
        for plugin in plugins.typed(plugin_type) {
            if !seen.insert(plugin.name()) {
                errors.push(format!("duplicate {plugin_type} plugin `{}`", plugin.name()));
            }
        }
    }
}

fn check_attributes(owner: &str, attributes: &PluginAttributes, errors: &mut Vec<String>) {
    let mut declared = HashSet::new();
    for setting in &attributes.settings {
        if !declared.insert(setting.name()) {
            errors.push(format!("duplicate setting `{}` in {owner}", setting.name()));
        }
    }

    for (i, group) in attributes.settings_group_validation.iter().enumerate() {
        for name in group {
            if !declared.contains(name.as_str()) {
                errors.push(format!(
                    "settings_group_validation[{i}] in {owner} names undeclared setting `{name}`"
                ));
            }
        }
    }
}

fn finish(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
