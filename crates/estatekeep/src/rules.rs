// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `estatekeep rules`: print the effective follow-up rule table.

use estatekeep_config::EstatekeepConfig;
use estatekeep_services::{RuleSource, StaticRuleSource, render_rule_table};

pub fn run_rules(config: &EstatekeepConfig) {
    println!("{}", describe_rules(&StaticRuleSource::from_config(&config.follow_up)));
}

fn describe_rules(source: &dyn RuleSource) -> String {
    format!(
        "{} rules ({})\n\n{}",
        source.rules().len(),
        source.describe(),
        render_rule_table(source.rules())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_described() {
        let out = describe_rules(&StaticRuleSource::builtin());
        assert!(out.starts_with("10 rules (built-in)"));
        assert!(out.contains("life_insurance"));
    }

    #[test]
    fn config_rules_replace_builtin() {
        let config = estatekeep_config::load_and_validate_str(
            r#"
            [[follow_up.rules]]
            asset_type = "vehicle"
            status = "CONTACTED"
            days_since_last_contact = 3
            action = "remind"
            priority = "low"
            message = "Call {institution} about the title"
            "#,
        )
        .unwrap();
        let out = describe_rules(&StaticRuleSource::from_config(&config.follow_up));
        assert!(out.starts_with("1 rules (config)"));
        assert!(out.contains("vehicle"));
        assert!(!out.contains("life_insurance"));
    }
}
