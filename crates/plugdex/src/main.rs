// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! plugdex - plugin catalog lookup and resolution from the command line.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plugdex_core::PluginType;
use plugdex_plugin::SchemaTarget;

use crate::commands::Documents;
use crate::error::CliError;

/// plugdex - inspect a plugin catalog and resolve project plugins.
#[derive(Parser, Debug)]
#[command(name = "plugdex", version, about, long_about = None)]
struct Cli {
    /// Catalog document; overrides `catalog.path` from the config.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Project manifest; overrides `project.path` from the config.
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the project reference discovery would record for a plugin.
    Discover {
        /// Plugin category, e.g. `extractors`.
        plugin_type: PluginType,
        name: String,
        /// Variant to pin instead of the catalog default.
        #[arg(long)]
        variant: Option<String>,
    },
    /// Print the effective definition of a plugin the project declares.
    Resolve { plugin_type: PluginType, name: String },
    /// Print a catalog entry as declared, variants included.
    Show { plugin_type: PluginType, name: String },
    /// Search catalog names, labels, and descriptions.
    Search {
        /// Case-insensitive substring; empty lists everything.
        #[arg(default_value = "")]
        query: String,
    },
    /// Load and validate both documents.
    Check,
    /// Print the JSON schema of a document.
    Schema {
        /// `index` or `project`.
        target: SchemaTarget,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match plugdex_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            plugdex_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.general.log_level);

    let docs = Documents {
        catalog: commands::pick_path(cli.catalog, &config.catalog.path),
        project: commands::pick_path(cli.project, &config.project.path),
    };
    tracing::debug!(
        catalog = %docs.catalog.display(),
        project = %docs.project.display(),
        "documents selected"
    );

    match run(cli.command, &docs) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            error::render_error(&err);
            std::process::exit(1);
        }
    }
}

fn run(command: Commands, docs: &Documents) -> Result<String, CliError> {
    let mut output = match command {
        Commands::Discover {
            plugin_type,
            name,
            variant,
        } => commands::discover_plugin(docs, plugin_type, &name, variant.as_deref())?,
        Commands::Resolve { plugin_type, name } => {
            commands::resolve_plugin(docs, plugin_type, &name)?
        }
        Commands::Show { plugin_type, name } => commands::show_plugin(docs, plugin_type, &name)?,
        Commands::Search { query } => commands::search(docs, &query)?,
        Commands::Check => commands::check(docs)?,
        Commands::Schema { target } => commands::schema(target)?,
    };
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Log to stderr so command output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugdex={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_discover_with_variant() {
        let cli = Cli::parse_from([
            "plugdex",
            "--catalog",
            "hub.yml",
            "discover",
            "loaders",
            "target-postgres",
            "--variant",
            "meltano",
        ]);
        assert_eq!(cli.catalog, Some(PathBuf::from("hub.yml")));
        match cli.command {
            Commands::Discover {
                plugin_type,
                name,
                variant,
            } => {
                assert_eq!(plugin_type, PluginType::Loaders);
                assert_eq!(name, "target-postgres");
                assert_eq!(variant.as_deref(), Some("meltano"));
            }
            other => panic!("expected discover, got {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["plugdex", "show", "widgets", "x"]).is_err());
    }

    #[test]
    fn schema_target_parses() {
        let cli = Cli::parse_from(["plugdex", "schema", "index"]);
        assert!(matches!(
            cli.command,
            Commands::Schema {
                target: SchemaTarget::Index
            }
        ));
    }

    #[test]
    fn run_appends_trailing_newline() {
        let docs = Documents {
            catalog: PathBuf::from("unused.yml"),
            project: PathBuf::from("unused.yml"),
        };
        let out = run(
            Commands::Schema {
                target: SchemaTarget::Index,
            },
            &docs,
        )
        .unwrap();
        assert!(out.ends_with("}\n"));
    }
}
