// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up rule tables and where they come from.
//!
//! The engine reads rules through [`RuleSource`] so the policy table can be
//! swapped (built-in, config file, test fixture) without touching matching.

use estatekeep_config::model::FollowUpConfig;
use estatekeep_core::followup::ALL_ASSET_TYPES;
use estatekeep_core::types::AssetStatus;
use estatekeep_core::{FollowUpAction, FollowUpRule, Priority};

/// Supplies the ordered rule table. Order matters for priority ties.
pub trait RuleSource: Send + Sync + 'static {
    fn rules(&self) -> &[FollowUpRule];

    /// Short label for logs and the `rules` command.
    fn describe(&self) -> &str;
}

/// The built-in rule table.
pub fn default_rules() -> Vec<FollowUpRule> {
    use AssetStatus::{Approved, Contacted, DocumentsSubmitted, InReview};
    use FollowUpAction::{Alert, Escalate, Remind};
    use Priority::{High, Low, Medium, Urgent};

    vec![
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            Contacted,
            7,
            Remind,
            Medium,
            "Follow up with {institution}: no response in 7 days",
        ),
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            Contacted,
            14,
            Escalate,
            High,
            "Escalate with {institution}: no response in 14 days",
        ),
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            DocumentsSubmitted,
            10,
            Remind,
            Medium,
            "Check document status with {institution}",
        ),
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            DocumentsSubmitted,
            21,
            Escalate,
            High,
            "Escalate document review with {institution}",
        ),
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            InReview,
            14,
            Remind,
            Low,
            "Check review progress with {institution}",
        ),
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            InReview,
            30,
            Escalate,
            High,
            "Escalate review delay with {institution}",
        ),
        FollowUpRule::new(
            ALL_ASSET_TYPES,
            Approved,
            14,
            Alert,
            Medium,
            "Confirm distribution timeline with {institution}",
        ),
        FollowUpRule::new(
            "life_insurance",
            Contacted,
            30,
            Escalate,
            Urgent,
            "Life insurance claim with {institution} has stalled for 30 days, request a supervisor",
        ),
        FollowUpRule::new(
            "401k",
            Contacted,
            30,
            Escalate,
            Urgent,
            "401(k) rollover with {institution} has stalled for 30 days, request a supervisor",
        ),
        FollowUpRule::new(
            "real_estate",
            DocumentsSubmitted,
            45,
            Alert,
            Urgent,
            "Real estate transfer with {institution} is overdue, consider contacting an attorney",
        ),
    ]
}

/// A fixed, in-memory rule table.
#[derive(Debug, Clone)]
pub struct StaticRuleSource {
    rules: Vec<FollowUpRule>,
    label: &'static str,
}

impl StaticRuleSource {
    pub fn new(rules: Vec<FollowUpRule>) -> Self {
        Self {
            rules,
            label: "custom",
        }
    }

    pub fn builtin() -> Self {
        Self {
            rules: default_rules(),
            label: "built-in",
        }
    }

    /// Use `[[follow_up.rules]]` when present, otherwise the built-in table.
    pub fn from_config(config: &FollowUpConfig) -> Self {
        if config.rules.is_empty() {
            Self::builtin()
        } else {
            Self {
                rules: config.rules.clone(),
                label: "config",
            }
        }
    }
}

impl Default for StaticRuleSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSource for StaticRuleSource {
    fn rules(&self) -> &[FollowUpRule] {
        &self.rules
    }

    fn describe(&self) -> &str {
        self.label
    }
}

/// Render a rule table as aligned plain text, one rule per line.
pub fn render_rule_table(rules: &[FollowUpRule]) -> String {
    let mut out = format!(
        "{:<14}  {:<19}  {:>4}  {:<8}  {:<8}  {}",
        "ASSET TYPE", "STATUS", "DAYS", "ACTION", "PRIORITY", "MESSAGE"
    );
    for rule in rules {
        out.push('\n');
        out.push_str(&format!(
            "{:<14}  {:<19}  {:>4}  {:<8}  {:<8}  {}",
            rule.asset_type,
            rule.status.to_string(),
            rule.days_since_last_contact,
            rule.action.to_string(),
            rule.priority.to_string(),
            rule.message
        ));
    }
    out
}
