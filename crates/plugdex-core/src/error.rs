// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for plugdex.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::PluginType;

/// The error type shared by document loading, lookup, and resolution.
#[derive(Debug, Error)]
pub enum PlugdexError {
    /// Malformed catalog or project document: unknown key, unknown setting
    /// kind, type mismatch, missing nested field, or a broken uniqueness rule.
    ///
    /// Loading aborts on this error; no partial document is produced.
    #[error("invalid {document}: {message}")]
    SchemaValidation { document: String, message: String },

    /// The requested plugin is not declared in the searched category.
    #[error(
        "No plugin '{name}' was found in {plugin_type}{}",
        format_suggestion(.suggestion.as_deref())
    )]
    PluginNotFound {
        plugin_type: PluginType,
        name: String,
        /// Closest declared name, if one is similar enough.
        suggestion: Option<String>,
    },

    /// The requested variant is not declared by the plugin.
    #[error("No variant '{variant}' was found for plugin '{plugin}'")]
    VariantNotFound { plugin: String, variant: String },

    /// A document could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PlugdexError {
    /// Shorthand for a [`PlugdexError::SchemaValidation`].
    pub fn schema(document: impl Into<String>, message: impl Into<String>) -> Self {
        PlugdexError::SchemaValidation {
            document: document.into(),
            message: message.into(),
        }
    }

    /// True for the lookup failures callers are expected to handle.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PlugdexError::PluginNotFound { .. } | PlugdexError::VariantNotFound { .. }
        )
    }
}

fn format_suggestion(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}
