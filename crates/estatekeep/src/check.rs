// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `estatekeep check` command implementation.
//!
//! Reports on the loaded configuration, the database, and the rule table.

use std::time::{Duration, Instant};

use estatekeep_config::EstatekeepConfig;
use estatekeep_core::EstateError;
use estatekeep_services::{RuleSource, StaticRuleSource};

use crate::serve::init_tracing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run every check, print a report, and fail if any check failed.
pub async fn run_check(config: &EstatekeepConfig) -> Result<(), EstateError> {
    init_tracing(&config.logging.level);

    let results = vec![
        check_config(config),
        check_database(&config.storage.database_path).await,
        check_rules(config),
    ];

    println!();
    println!("  estatekeep check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", format_result(result));
    }
    println!();

    let failed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warned = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();

    if failed + warned == 0 {
        println!("  All checks passed.");
        return Ok(());
    }
    let issues = failed + warned;
    let issue_word = if issues == 1 { "issue" } else { "issues" };
    println!("  {issues} {issue_word} found.");

    if failed > 0 {
        Err(EstateError::Validation(format!("{failed} check(s) failed")))
    } else {
        Ok(())
    }
}

fn format_result(result: &CheckResult) -> String {
    let tag = match result.status {
        CheckStatus::Pass => "[OK]  ",
        CheckStatus::Warn => "[WARN]",
        CheckStatus::Fail => "[FAIL]",
    };
    format!(
        "    {tag} {:<12} {} ({}ms)",
        result.name,
        result.message,
        result.duration.as_millis()
    )
}

fn check_config(config: &EstatekeepConfig) -> CheckResult {
    let start = Instant::now();
    let auth = if config.server.bearer_token.is_some() {
        "bearer auth on"
    } else {
        "bearer auth off"
    };
    let sweep = match config.follow_up.sweep_interval_secs {
        Some(secs) => format!("sweep every {secs}s"),
        None => "sweep off".to_string(),
    };
    CheckResult {
        name: "Config".to_string(),
        status: CheckStatus::Pass,
        message: format!(
            "valid ({}:{}, {auth}, {sweep})",
            config.server.host, config.server.port
        ),
        duration: start.elapsed(),
    }
}

async fn check_database(db_path: &str) -> CheckResult {
    let start = Instant::now();
    let path = std::path::Path::new(db_path);

    if !path.exists() {
        return CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Warn,
            message: format!("not found: {db_path} (will be created on first run)"),
            duration: start.elapsed(),
        };
    }

    let conn = match tokio_rusqlite::Connection::open(db_path).await {
        Ok(conn) => conn,
        Err(e) => {
            return CheckResult {
                name: "Database".to_string(),
                status: CheckStatus::Fail,
                message: format!("open failed: {e}"),
                duration: start.elapsed(),
            };
        }
    };

    let query: Result<i64, tokio_rusqlite::Error<rusqlite::Error>> = conn
        .call(|conn| conn.query_row("SELECT COUNT(*) FROM assets", [], |row| row.get(0)))
        .await;

    match query {
        Ok(assets) => CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Pass,
            message: format!("connected ({assets} assets)"),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name: "Database".to_string(),
            status: CheckStatus::Fail,
            message: format!("query failed: {e}"),
            duration: start.elapsed(),
        },
    }
}

fn check_rules(config: &EstatekeepConfig) -> CheckResult {
    let start = Instant::now();
    let source = StaticRuleSource::from_config(&config.follow_up);
    CheckResult {
        name: "Rules".to_string(),
        status: CheckStatus::Pass,
        message: format!("{} rules ({})", source.rules().len(), source.describe()),
        duration: start.elapsed(),
    }
}
