// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, positive thresholds, and rule message templates.

use estatekeep_core::followup::INSTITUTION_PLACEHOLDER;

use crate::diagnostic::ConfigError;
use crate::model::EstatekeepConfig;

/// Shortest allowed interval between background escalation sweeps.
pub const MIN_SWEEP_INTERVAL_SECS: u64 = 60;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &EstatekeepConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.server.port == 0 {
        fail("server.port must not be 0".to_string());
    }

    if let Some(token) = &config.server.bearer_token
        && token.trim().is_empty()
    {
        fail("server.bearer_token must not be empty when set".to_string());
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.escalation.no_response_days < 1 {
        fail(format!(
            "escalation.no_response_days must be at least 1, got {}",
            config.escalation.no_response_days
        ));
    }

    if config.escalation.level < 1 {
        fail(format!(
            "escalation.level must be at least 1, got {}",
            config.escalation.level
        ));
    }

    if let Some(secs) = config.follow_up.sweep_interval_secs
        && secs < MIN_SWEEP_INTERVAL_SECS
    {
        fail(format!(
            "follow_up.sweep_interval_secs must be at least {MIN_SWEEP_INTERVAL_SECS}, got {secs}"
        ));
    }

    for (i, rule) in config.follow_up.rules.iter().enumerate() {
        if rule.asset_type.trim().is_empty() {
            fail(format!("follow_up.rules[{i}].asset_type must not be empty"));
        }
        if rule.days_since_last_contact < 0 {
            fail(format!(
                "follow_up.rules[{i}].days_since_last_contact must be non-negative, got {}",
                rule.days_since_last_contact
            ));
        }
        if !rule.message.contains(INSTITUTION_PLACEHOLDER) {
            fail(format!(
                "follow_up.rules[{i}].message must contain `{INSTITUTION_PLACEHOLDER}`"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
