// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations. Each returns the text printed to stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use plugdex_core::PluginType;
use plugdex_plugin::{
    PluginIndex, Project, SchemaTarget, discover, get_plugin_definition,
};
use serde::Serialize;

use crate::error::CliError;

/// Where the catalog and project documents live.
#[derive(Debug, Clone)]
pub struct Documents {
    pub catalog: PathBuf,
    pub project: PathBuf,
}

impl Documents {
    fn index(&self) -> Result<PluginIndex, CliError> {
        Ok(PluginIndex::from_yaml_file(&self.catalog)?)
    }

    fn project(&self) -> Result<Project, CliError> {
        Ok(Project::from_yaml_file(&self.project)?)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn discover_plugin(
    docs: &Documents,
    plugin_type: PluginType,
    name: &str,
    variant: Option<&str>,
) -> Result<String, CliError> {
    let index = docs.index()?;
    to_json(&discover(&index, plugin_type, name, variant)?)
}

pub fn resolve_plugin(
    docs: &Documents,
    plugin_type: PluginType,
    name: &str,
) -> Result<String, CliError> {
    let index = docs.index()?;
    let project = docs.project()?;
    to_json(&get_plugin_definition(&index, &project, plugin_type, name)?)
}

pub fn show_plugin(docs: &Documents, plugin_type: PluginType, name: &str) -> Result<String, CliError> {
    let index = docs.index()?;
    to_json(index.find_plugin(plugin_type, name)?)
}

/// One `category<TAB>name<TAB>label` line per match.
pub fn search(docs: &Documents, query: &str) -> Result<String, CliError> {
    let index = docs.index()?;
    let mut out = String::new();
    for (plugin_type, plugin) in index.search(query) {
        let label = plugin
            .attributes
            .label
            .as_deref()
            .or(plugin.attributes.description.as_deref())
            .unwrap_or("");
        let _ = writeln!(out, "{plugin_type}\t{}\t{label}", plugin.name());
    }
    Ok(out)
}

/// Load and validate both documents, then summarize them.
pub fn check(docs: &Documents) -> Result<String, CliError> {
    let index = docs.index()?;
    let project = docs.project()?;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "catalog {} (version {}): ok",
        docs.catalog.display(),
        index.version
    );
    summarize(&mut out, index.plugins.mapping().map(|(t, e)| (t, e.len())));

    let _ = writeln!(
        out,
        "project {} ({}): ok",
        docs.project.display(),
        project.project_id
    );
    summarize(&mut out, project.plugins.mapping().map(|(t, e)| (t, e.len())));
    Ok(out)
}

fn summarize(out: &mut String, counts: impl Iterator<Item = (PluginType, usize)>) {
    for (plugin_type, count) in counts.filter(|(_, count)| *count > 0) {
        let _ = writeln!(out, "  {plugin_type}: {count}");
    }
}

pub fn schema(target: SchemaTarget) -> Result<String, CliError> {
    to_json(&target.schema())
}

/// The effective path for a document: the flag if given, else the config.
pub fn pick_path(flag: Option<PathBuf>, configured: &Path) -> PathBuf {
    flag.unwrap_or_else(|| configured.to_path_buf())
}
