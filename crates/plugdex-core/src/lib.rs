// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for plugdex.
//!
//! This crate provides the error type, the plugin category and capability
//! enums, the [`Named`] trait, and the name suggestion helper used throughout
//! the plugdex workspace.

pub mod error;
pub mod suggest;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlugdexError;
pub use suggest::closest_match;
pub use types::{Capability, Named, PluginType};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn plugin_type_has_nine_categories_in_document_order() {
        let iterated: Vec<PluginType> = PluginType::iter().collect();
        assert_eq!(iterated, PluginType::ALL.to_vec());
        assert_eq!(PluginType::ALL[0], PluginType::Extractors);
        assert_eq!(PluginType::ALL[8], PluginType::Utilities);
    }

    #[test]
    fn plugin_type_display_and_from_str_round_trip() {
        for plugin_type in PluginType::ALL {
            let s = plugin_type.to_string();
            assert_eq!(PluginType::from_str(&s).unwrap(), plugin_type);
        }
        assert_eq!(PluginType::Loaders.to_string(), "loaders");
        assert!(PluginType::from_str("widgets").is_err());
    }

    #[test]
    fn only_three_categories_pass_through() {
        let pass_through: Vec<PluginType> = PluginType::ALL
            .into_iter()
            .filter(|t| t.is_pass_through())
            .collect();
        assert_eq!(
            pass_through,
            vec![PluginType::Transforms, PluginType::Models, PluginType::Dashboards]
        );
    }

    #[test]
    fn capability_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&Capability::ActivateVersion).unwrap();
        assert_eq!(json, "\"activate-version\"");
        let parsed: Capability = serde_json::from_str("\"record-flattening\"").unwrap();
        assert_eq!(parsed, Capability::RecordFlattening);
        assert!(serde_json::from_str::<Capability>("\"teleport\"").is_err());
        assert_eq!(Capability::from_str("soft-delete").unwrap(), Capability::SoftDelete);
    }

    #[test]
    fn not_found_errors_render_with_suggestion() {
        let err = PlugdexError::PluginNotFound {
            plugin_type: PluginType::Loaders,
            name: "target-postgress".into(),
            suggestion: Some("target-postgres".into()),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "No plugin 'target-postgress' was found in loaders (did you mean 'target-postgres'?)"
        );

        let err = PlugdexError::VariantNotFound {
            plugin: "target-postgres".into(),
            variant: "nobody".into(),
        };
        assert_eq!(
            err.to_string(),
            "No variant 'nobody' was found for plugin 'target-postgres'"
        );
    }

    #[test]
    fn schema_error_is_not_a_lookup_failure() {
        let err = PlugdexError::schema("catalog", "unknown field `widgets`");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "invalid catalog: unknown field `widgets`");
    }
}
