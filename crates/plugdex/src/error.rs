// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command errors rendered as miette diagnostics.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use plugdex_core::PlugdexError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// A catalog or project document could not be read or is invalid.
    #[error(transparent)]
    #[diagnostic(
        code(plugdex::document),
        help("check the document against `plugdex schema index` or `plugdex schema project`")
    )]
    Document(PlugdexError),

    /// A plugin or variant lookup missed.
    #[error(transparent)]
    #[diagnostic(
        code(plugdex::not_found),
        help("run `plugdex search <query>` to list catalog plugins")
    )]
    NotFound(PlugdexError),

    #[error("failed to encode output: {0}")]
    #[diagnostic(code(plugdex::output))]
    Output(#[from] serde_json::Error),
}

impl From<PlugdexError> for CliError {
    fn from(err: PlugdexError) -> Self {
        if err.is_not_found() {
            CliError::NotFound(err)
        } else {
            CliError::Document(err)
        }
    }
}

/// Render one error to stderr with miette's graphical handler.
pub fn render_error(error: &CliError) {
    use miette::GraphicalReportHandler;

    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = error;
    if GraphicalReportHandler::new()
        .render_report(&mut buf, diagnostic)
        .is_ok()
    {
        eprint!("{buf}");
    } else {
        eprintln!("Error: {error}");
    }
}
