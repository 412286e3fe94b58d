// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for estatekeep.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use estatekeep_core::FollowUpRule;
use serde::{Deserialize, Serialize};

/// Top-level estatekeep configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EstatekeepConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Fixed no-response escalation trigger.
    #[serde(default)]
    pub escalation: EscalationConfig,

    /// Follow-up rule table and background sweep.
    #[serde(default)]
    pub follow_up: FollowUpConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the server to.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on `/api/*`. `None` leaves the API open.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("estatekeep").join("estatekeep.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("estatekeep.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// No-response escalation trigger run after every communication write.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EscalationConfig {
    /// Days without a response on the newest communication before escalating.
    #[serde(default = "default_no_response_days")]
    pub no_response_days: i64,

    /// Severity level given to trigger-created escalations.
    #[serde(default = "default_escalation_level")]
    pub level: i64,

    /// Send a notification to the estate owner when an escalation is created.
    #[serde(default = "default_notify_owner")]
    pub notify_owner: bool,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            no_response_days: default_no_response_days(),
            level: default_escalation_level(),
            notify_owner: default_notify_owner(),
        }
    }
}

fn default_no_response_days() -> i64 {
    14
}

fn default_escalation_level() -> i64 {
    2
}

fn default_notify_owner() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FollowUpConfig {
    /// Seconds between background escalation sweeps. `None` disables the sweep.
    #[serde(default)]
    pub sweep_interval_secs: Option<u64>,

    /// Replacement rule table. Empty means the built-in table is used.
    #[serde(default)]
    pub rules: Vec<FollowUpRule>,
}
