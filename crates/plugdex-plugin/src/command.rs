// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named plugin commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A command a plugin exposes under a name, e.g. `run` for a transformer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Command {
    /// Arguments passed to the executable.
    pub args: String,
    /// Overrides the plugin's executable for this command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Command {
    pub fn new(args: impl Into<String>) -> Self {
        Self {
            args: args.into(),
            executable: None,
            description: None,
        }
    }
}
