// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: load the fixture catalog and project from disk, then
//! discover and resolve plugins across them.

use std::path::PathBuf;

use plugdex_core::{PlugdexError, PluginType};
use plugdex_plugin::setting::DateValue;
use plugdex_plugin::{
    DiscoveredPlugin, PluginDefinition, PluginIndex, Project, ProjectPlugin, Setting,
    SettingValue, discover, get_plugin_definition, resolve,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn index() -> PluginIndex {
    PluginIndex::from_yaml_file(fixture("discovery.yml")).unwrap()
}

fn project() -> Project {
    Project::from_yaml_file(fixture("project.yml")).unwrap()
}

// --- Loading ---

#[test]
fn fixture_catalog_loads() {
    let index = index();
    assert_eq!(index.version, 20);
    assert_eq!(index.plugins.extractors.len(), 2);
    assert_eq!(index.plugins.loaders.len(), 2);
    assert_eq!(index.plugins.transformers.len(), 1);
    assert_eq!(index.plugins.transforms.len(), 1);
    assert_eq!(index.plugins.models.len(), 1);
    assert!(index.plugins.dashboards.is_empty());
}

#[test]
fn fixture_project_loads() {
    let project = project();
    assert!(!project.send_anonymous_usage_stats);
    assert_eq!(project.include_paths, vec!["./subconfig_*.yml"]);
    assert_eq!(
        project.project_id.to_string(),
        "0e7c7f4e-58a3-4bcb-a1b6-4c1f2d38e8a5"
    );
}

#[test]
fn custom_project_plugin_has_typed_settings() {
    let project = project();
    let tap_github = match &project.plugins.extractors[0] {
        ProjectPlugin::Custom(custom) => custom,
        other => panic!("expected a custom plugin, got {other:?}"),
    };
    assert_eq!(tap_github.attributes.commands["info"].args, "--test");

    let settings = &tap_github.attributes.settings;
    assert_eq!(settings[0].kind(), "string");
    match settings[1].value() {
        Some(SettingValue::Secret(secret)) => assert_eq!(secret.expose(), "s3cr3t"),
        other => panic!("expected a secret, got {other:?}"),
    }
    assert_eq!(settings[2].value(), Some(SettingValue::Integer(10)));
    match settings[3].value() {
        Some(SettingValue::Date(date)) => {
            assert_eq!(date.year(), 2021);
            assert!(matches!(date, DateValue::DateTime(_)));
        }
        other => panic!("expected a date, got {other:?}"),
    }
}

#[test]
fn unknown_category_fails_catalog_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("discovery.yml");
    let mut content = std::fs::read_to_string(fixture("discovery.yml")).unwrap();
    content.push_str("widgets:\n  - name: gadget\n");
    std::fs::write(&path, content).unwrap();

    let err = PluginIndex::from_yaml_file(&path).unwrap_err();
    match err {
        PlugdexError::SchemaValidation { document, message } => {
            assert_eq!(document, path.display().to_string());
            assert!(message.contains("widgets"), "got: {message}");
        }
        other => panic!("expected SchemaValidation, got {other:?}"),
    }
}

#[test]
fn unknown_setting_kind_fails_catalog_load() {
    let yaml = r#"
version: 1
extractors:
  - name: tap-x
    namespace: tap_x
    settings:
      - name: color
        kind: rgb
"#;
    let err = PluginIndex::from_yaml_str(yaml).unwrap_err().to_string();
    assert!(err.contains("unknown kind `rgb`"), "got: {err}");
}

#[test]
fn catalog_setting_values_are_coerced_to_their_kind() {
    let yaml = r#"
version: 1
loaders:
  - name: target-x
    namespace: target_x
    settings:
      - name: port
        value: 5432
      - name: batch_size
        kind: integer
        value: "5000"
      - name: ssl
        kind: boolean
        value: "yes"
"#;
    let index = PluginIndex::from_yaml_str(yaml).unwrap();
    let settings = &index.plugins.loaders[0].attributes.settings;
    assert_eq!(settings[0].value(), Some(SettingValue::Text("5432")));
    assert_eq!(settings[1].value(), Some(SettingValue::Integer(5000)));
    assert_eq!(settings[2].value(), Some(SettingValue::Boolean(true)));
}

#[test]
fn uncoercible_setting_value_fails_catalog_load() {
    let yaml = r#"
version: 1
loaders:
  - name: target-x
    namespace: target_x
    settings:
      - name: batch_size
        kind: integer
        value: lots
"#;
    let err = PluginIndex::from_yaml_str(yaml).unwrap_err().to_string();
    assert!(err.contains("batch_size"), "got: {err}");
}

// --- Discovery ---

#[test]
fn discover_plugin_without_variants() {
    let discovered = discover(&index(), PluginType::Extractors, "tap-gitlab", None).unwrap();
    assert_eq!(discovered.name(), "tap-gitlab");
    assert_eq!(discovered.variant, None);
    assert_eq!(
        discovered.pip_url,
        "git+https://gitlab.com/meltano/tap-gitlab.git"
    );
}

#[test]
fn discover_defaults_to_first_variant() {
    let discovered = discover(&index(), PluginType::Loaders, "target-postgres", None).unwrap();
    assert_eq!(discovered.variant.as_deref(), Some("transferwise"));
    assert_eq!(discovered.pip_url, "pipelinewise-target-postgres");
}

#[test]
fn discover_explicit_variant() {
    let discovered =
        discover(&index(), PluginType::Loaders, "target-postgres", Some("meltano")).unwrap();
    assert_eq!(discovered.name(), "target-postgres");
    assert_eq!(discovered.variant.as_deref(), Some("meltano"));
    assert_eq!(
        discovered.pip_url,
        "git+https://github.com/meltano/target-postgres.git"
    );
}

#[test]
fn discover_failures_leave_index_untouched() {
    let index = index();
    let before = index.clone();

    let err = discover(&index, PluginType::Loaders, "target-mysql", None).unwrap_err();
    assert!(matches!(err, PlugdexError::PluginNotFound { .. }));

    let err = discover(&index, PluginType::Loaders, "target-postgres", Some("Meltano")).unwrap_err();
    assert!(matches!(err, PlugdexError::VariantNotFound { .. }));

    // Wrong category: tap-gitlab is an extractor, not a loader.
    assert!(discover(&index, PluginType::Loaders, "tap-gitlab", None).is_err());

    assert_eq!(index, before);
}

#[test]
fn pass_through_categories_cannot_be_discovered() {
    let err = discover(&index(), PluginType::Models, "model-gitlab", None).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn not_found_error_suggests_close_name() {
    let err = discover(&index(), PluginType::Extractors, "tap-gitlabb", None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No plugin 'tap-gitlabb' was found in extractors (did you mean 'tap-gitlab'?)"
    );
}

// --- Resolution ---

#[test]
fn resolve_target_postgres_meltano_variant() {
    let index = index();
    let discovered =
        discover(&index, PluginType::Loaders, "target-postgres", Some("meltano")).unwrap();
    let plugin = resolve(&index, PluginType::Loaders, &discovered).unwrap();

    assert_eq!(plugin.name(), "target-postgres");
    assert_eq!(plugin.namespace, "target_postgres");
    assert_eq!(
        plugin.attributes.docs.as_deref(),
        Some("https://hub.meltano.com/loaders/postgres--meltano.html")
    );
    let names: Vec<&str> = plugin
        .attributes
        .settings
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(names, vec!["postgres_host", "postgres_port", "postgres_password"]);
}

#[test]
fn resolve_dbt_without_variants() {
    let index = index();
    let discovered = discover(&index, PluginType::Transformers, "dbt", None).unwrap();
    assert_eq!(discovered.variant, None);

    let plugin = resolve(&index, PluginType::Transformers, &discovered).unwrap();
    assert_eq!(plugin.namespace, "dbt");
    assert!(plugin.attributes.commands.contains_key("run"));
    assert_eq!(plugin.attributes.label.as_deref(), Some("dbt"));
}

#[test]
fn resolve_without_variant_uses_first_variant() {
    let index = index();
    let discovered = DiscoveredPlugin::new("target-postgres", "pipelinewise-target-postgres", None);
    let plugin = resolve(&index, PluginType::Loaders, &discovered).unwrap();

    let base = index
        .find_plugin(PluginType::Loaders, "target-postgres")
        .unwrap();
    let first = base.default_variant().unwrap();
    assert_eq!(plugin.attributes, first.attributes);
    assert_eq!(
        plugin.attributes.docs.as_deref(),
        Some("https://hub.meltano.com/loaders/postgres.html")
    );
}

#[test]
fn resolve_is_idempotent() {
    let index = index();
    let discovered = discover(&index, PluginType::Loaders, "target-postgres", None).unwrap();
    let first = resolve(&index, PluginType::Loaders, &discovered).unwrap();
    let second = resolve(&index, PluginType::Loaders, &discovered).unwrap();
    assert_eq!(first, second);
}

#[test]
fn resolved_secrets_are_masked_when_serialized() {
    let index = index();
    let discovered = discover(&index, PluginType::Loaders, "target-postgres", None).unwrap();
    let mut plugin = resolve(&index, PluginType::Loaders, &discovered).unwrap();
    plugin
        .attributes
        .set_setting_value("password", serde_json::json!("hunter2"))
        .unwrap();
    let value = serde_json::to_value(&plugin).unwrap();
    let password = value["settings"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "password")
        .unwrap();
    assert_eq!(password["kind"], "password");
    assert_eq!(password["value"], "**********");
    assert!(!value.to_string().contains("hunter2"));
}

// --- Project-level resolution ---

#[test]
fn custom_plugin_is_returned_unchanged() {
    let index = index();
    let project = project();
    let definition =
        get_plugin_definition(&index, &project, PluginType::Extractors, "tap_github").unwrap();

    let declared = project.plugins.extractors[0].as_custom().unwrap();
    assert_eq!(definition, PluginDefinition::Custom(declared.clone()));
    assert!(definition.is_custom());
}

#[test]
fn discovered_project_plugin_is_resolved() {
    let index = index();
    let project = project();
    let definition =
        get_plugin_definition(&index, &project, PluginType::Loaders, "target-postgres").unwrap();

    match definition {
        PluginDefinition::Resolved(plugin) => {
            assert_eq!(plugin.namespace, "target_postgres");
            assert_eq!(
                plugin.attributes.docs.as_deref(),
                Some("https://hub.meltano.com/loaders/postgres--meltano.html")
            );
        }
        other => panic!("expected a resolved plugin, got {other:?}"),
    }
}

#[test]
fn project_lookup_misses_are_not_found() {
    let index = index();
    let project = project();
    // Present in the catalog, but the project does not declare it.
    let err = get_plugin_definition(&index, &project, PluginType::Loaders, "target-csv").unwrap_err();
    assert!(matches!(
        err,
        PlugdexError::PluginNotFound { ref name, .. } if name == "target-csv"
    ));
}

#[test]
fn project_reference_to_removed_variant_fails() {
    let index = index();
    let project = Project::from_yaml_str(
        r#"
version: 1
project_id: 0e7c7f4e-58a3-4bcb-a1b6-4c1f2d38e8a5
plugins:
  loaders:
    - name: target-postgres
      pip_url: target-postgres
      variant: datamill
"#,
    )
    .unwrap();
    let err =
        get_plugin_definition(&index, &project, PluginType::Loaders, "target-postgres").unwrap_err();
    assert!(matches!(err, PlugdexError::VariantNotFound { .. }));
}
