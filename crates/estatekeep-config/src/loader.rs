// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./estatekeep.toml` > `~/.config/estatekeep/estatekeep.toml`
//! > `/etc/estatekeep/estatekeep.toml` with environment variable overrides via
//! the `ESTATEKEEP_` prefix.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EstatekeepConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/estatekeep/estatekeep.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "estatekeep.toml";

/// `~/.config/estatekeep/estatekeep.toml`, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("estatekeep").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/estatekeep/estatekeep.toml` (system-wide)
/// 3. `~/.config/estatekeep/estatekeep.toml` (user XDG config)
/// 4. `./estatekeep.toml` (local directory)
/// 5. `ESTATEKEEP_*` environment variables
pub fn load_config() -> Result<EstatekeepConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<EstatekeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EstatekeepConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EstatekeepConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EstatekeepConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(EstatekeepConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ESTATEKEEP_ESCALATION_NO_RESPONSE_DAYS` must map to
/// `escalation.no_response_days`, and `ESTATEKEEP_FOLLOW_UP_SWEEP_INTERVAL_SECS`
/// to `follow_up.sweep_interval_secs`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("ESTATEKEEP_").map(|key| {
        let key_str = key.as_str();
        let mapped = [
            "server",
            "storage",
            "logging",
            "escalation",
            "follow_up",
        ]
        .iter()
        .find_map(|section| {
            key_str
                .strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| format!("{section}.{rest}"))
        })
        .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
