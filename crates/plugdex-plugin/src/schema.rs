// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON Schema export for the catalog and project documents.

use schemars::{Schema, schema_for};
use strum::{Display, EnumIter, EnumString};

use crate::index::PluginIndex;
use crate::project::Project;

/// Which document to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SchemaTarget {
    Index,
    Project,
}

impl SchemaTarget {
    pub fn schema(self) -> Schema {
        match self {
            SchemaTarget::Index => index_schema(),
            SchemaTarget::Project => project_schema(),
        }
    }
}

/// Schema of a catalog document.
pub fn index_schema() -> Schema {
    schema_for!(PluginIndex)
}

/// Schema of a project manifest.
pub fn project_schema() -> Schema {
    schema_for!(Project)
}
