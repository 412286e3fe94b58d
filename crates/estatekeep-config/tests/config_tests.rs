// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the estatekeep configuration system.

use estatekeep_config::diagnostic::ConfigError;
use estatekeep_config::{load_and_validate_str, load_config_from_path, load_config_from_str};
use estatekeep_core::types::AssetStatus;
use estatekeep_core::{FollowUpAction, Priority};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
bearer_token = "s3cret-token"

[storage]
database_path = "/tmp/estate.db"
wal_mode = false

[logging]
level = "debug"

[escalation]
no_response_days = 21
level = 3
notify_owner = false

[follow_up]
sweep_interval_secs = 3600

[[follow_up.rules]]
asset_type = "pension"
status = "CONTACTED"
days_since_last_contact = 10
action = "escalate"
priority = "urgent"
message = "Pension office {institution} has gone quiet"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.bearer_token.as_deref(), Some("s3cret-token"));
    assert_eq!(config.storage.database_path, "/tmp/estate.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.escalation.no_response_days, 21);
    assert_eq!(config.escalation.level, 3);
    assert!(!config.escalation.notify_owner);
    assert_eq!(config.follow_up.sweep_interval_secs, Some(3600));
    assert_eq!(config.follow_up.rules.len(), 1);

    let rule = &config.follow_up.rules[0];
    assert_eq!(rule.asset_type, "pension");
    assert_eq!(rule.status, AssetStatus::Contacted);
    assert_eq!(rule.action, FollowUpAction::Escalate);
    assert_eq!(rule.priority, Priority::Urgent);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3001);
    assert!(config.server.bearer_token.is_none());
    assert!(config.storage.wal_mode);
    assert!(config.storage.database_path.ends_with("estatekeep.db"));
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.escalation.no_response_days, 14);
    assert_eq!(config.escalation.level, 2);
    assert!(config.escalation.notify_owner);
    assert!(config.follow_up.sweep_interval_secs.is_none());
    assert!(config.follow_up.rules.is_empty());
}

/// Unknown field in [escalation] becomes an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[escalation]
no_responce_days = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "no_responce_days" && s == "no_response_days"
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// A rule priority outside the enum is reported, not silently defaulted.
#[test]
fn unknown_rule_priority_is_rejected() {
    let toml = r#"
[[follow_up.rules]]
asset_type = "all"
status = "CONTACTED"
days_since_last_contact = 7
action = "remind"
priority = "critical"
message = "{institution}"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject priority");
    assert!(!errors.is_empty());
    let rendered = format!("{:?}", errors);
    assert!(rendered.contains("critical"), "got: {rendered}");
}

/// Type mismatch is reported as an error.
#[test]
fn wrong_type_for_port_is_rejected() {
    let toml = r#"
[server]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject string port");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_are_collected() {
    let toml = r#"
[server]
port = 0

[escalation]
no_response_days = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
}

/// Environment variables override file values.
#[test]
fn env_var_overrides_file_value() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[logging]
level = "warn"

[server]
port = 4000
"#,
        )?;
        jail.set_env("ESTATEKEEP_LOGGING_LEVEL", "trace");

        let config = load_config_from_path(std::path::Path::new("custom.toml"))?;
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.server.port, 4000);
        Ok(())
    });
}
