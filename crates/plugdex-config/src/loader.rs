// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./plugdex.toml` > `~/.config/plugdex/plugdex.toml` >
//! `/etc/plugdex/plugdex.toml`, with `PLUGDEX_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PlugdexConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG: &str = "/etc/plugdex/plugdex.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG: &str = "plugdex.toml";

/// Per-user configuration file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plugdex/plugdex.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugdex/plugdex.toml`
/// 3. `~/.config/plugdex/plugdex.toml`
/// 4. `./plugdex.toml`
/// 5. `PLUGDEX_*` environment variables
pub fn load_config() -> Result<PlugdexConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<PlugdexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugdexConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlugdexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugdexConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlugdexConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider with an explicit section mapping.
///
/// Keys are mapped by section prefix rather than split on `_`, so
/// `PLUGDEX_GENERAL_LOG_LEVEL` becomes `general.log_level`, not
/// `general.log.level`.
fn env_provider() -> Env {
    Env::prefixed("PLUGDEX_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("general_", "general.", 1)
            .replacen("catalog_", "catalog.", 1)
            .replacen("project_", "project.", 1)
            .into()
    })
}
