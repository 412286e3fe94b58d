// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule matching and priority selection.
//!
//! Every rule in the table is evaluated; none short-circuits. Ties on
//! priority keep table order.

use chrono::{DateTime, Duration, Utc};
use estatekeep_core::types::Asset;
use estatekeep_core::{EstateError, FollowUpRecommendation, FollowUpRule};

/// Every rule that applies to `asset` at `days`, urgent first.
pub fn matching_rules<'a>(
    rules: &'a [FollowUpRule],
    asset: &Asset,
    days: i64,
) -> Vec<&'a FollowUpRule> {
    let mut matched: Vec<&FollowUpRule> = rules.iter().filter(|r| r.matches(asset, days)).collect();
    matched.sort_by_key(|r| r.priority);
    matched
}

/// The highest-priority rule; the earliest one wins a tie.
pub fn select_top_rule<'a, I>(rules: I) -> Result<&'a FollowUpRule, EstateError>
where
    I: IntoIterator<Item = &'a FollowUpRule>,
{
    rules
        .into_iter()
        .min_by_key(|r| r.priority)
        .ok_or(EstateError::NoRulesProvided)
}

/// Build the recommendation a matched rule produces for an asset.
pub fn recommend(
    asset: &Asset,
    rule: &FollowUpRule,
    days: i64,
    last_contact: DateTime<Utc>,
) -> FollowUpRecommendation {
    FollowUpRecommendation {
        asset_id: asset.id.clone(),
        institution: asset.institution.clone(),
        asset_type: asset.asset_type.clone(),
        value: asset.value,
        days_since_contact: days,
        last_contact_date: last_contact,
        priority: rule.priority,
        action: rule.action,
        message: rule.render_message(&asset.institution),
        due_date: last_contact + Duration::days(rule.days_since_last_contact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;
    use estatekeep_core::types::{AssetMetadata, AssetStatus};
    use estatekeep_core::{FollowUpAction, Priority};
    use proptest::prelude::*;

    fn asset(asset_type: &str, status: AssetStatus) -> Asset {
        let created = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Asset {
            id: "a1".into(),
            estate_id: "e1".into(),
            institution: "Acme Life".into(),
            asset_type: asset_type.into(),
            status,
            value: Some(50_000.0),
            metadata: AssetMetadata::default(),
            requirements: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn fifteen_days_contacted_matches_both_generic_rules() {
        let rules = default_rules();
        let a = asset("bank_account", AssetStatus::Contacted);
        let matched = matching_rules(&rules, &a, 15);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].days_since_last_contact, 14);
        assert_eq!(matched[0].priority, Priority::High);
        assert_eq!(matched[1].days_since_last_contact, 7);

        let top = select_top_rule(matched.iter().copied()).unwrap();
        assert_eq!(top.action, FollowUpAction::Escalate);
    }

    #[test]
    fn typed_urgent_rule_beats_generic_high() {
        let rules = default_rules();
        let a = asset("401k", AssetStatus::Contacted);
        let matched = matching_rules(&rules, &a, 31);
        assert_eq!(matched.len(), 3);
        let top = select_top_rule(matched.iter().copied()).unwrap();
        assert_eq!(top.priority, Priority::Urgent);
        assert_eq!(top.asset_type, "401k");
    }

    #[test]
    fn inactive_statuses_match_nothing_in_default_table() {
        let rules = default_rules();
        for status in [AssetStatus::Distributed, AssetStatus::Closed, AssetStatus::Discovered] {
            assert!(matching_rules(&rules, &asset("all", status), 365).is_empty());
        }
    }

    #[test]
    fn empty_rule_list_is_an_error() {
        let none: Vec<FollowUpRule> = Vec::new();
        let err = select_top_rule(&none).unwrap_err();
        assert!(matches!(err, EstateError::NoRulesProvided));
        assert_eq!(err.to_string(), "no rules provided");
    }

    #[test]
    fn recommendation_interpolates_and_sets_due_date() {
        let rules = default_rules();
        let a = asset("life_insurance", AssetStatus::Contacted);
        let top = select_top_rule(matching_rules(&rules, &a, 31)).unwrap();
        let rec = recommend(&a, top, 31, a.created_at);
        assert!(rec.message.contains("Acme Life"));
        assert!(!rec.message.contains("{institution}"));
        assert_eq!(rec.due_date, a.created_at + Duration::days(30));
        assert_eq!(rec.value, Some(50_000.0));
    }

    fn any_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just(Priority::Urgent),
            Just(Priority::High),
            Just(Priority::Medium),
            Just(Priority::Low),
        ]
    }

    fn any_rule() -> impl Strategy<Value = FollowUpRule> {
        (any_priority(), 0i64..60).prop_map(|(priority, days)| {
            FollowUpRule::new(
                "all",
                AssetStatus::Contacted,
                days,
                FollowUpAction::Remind,
                priority,
                "{institution}",
            )
        })
    }

    proptest! {
        #[test]
        fn top_rule_is_first_with_best_priority(
            rules in proptest::collection::vec(any_rule(), 1..12)
        ) {
            let top = select_top_rule(&rules).unwrap();
            let best = rules.iter().map(|r| r.priority).min().unwrap();
            let first_best = rules.iter().position(|r| r.priority == best).unwrap();
            prop_assert!(std::ptr::eq(top, &rules[first_best]));
        }

        #[test]
        fn matched_rules_are_sorted_and_stable(
            rules in proptest::collection::vec(any_rule(), 0..12),
            days in 0i64..70,
        ) {
            let a = asset("bank_account", AssetStatus::Contacted);
            let matched = matching_rules(&rules, &a, days);
            for pair in matched.windows(2) {
                prop_assert!(pair[0].priority <= pair[1].priority);
                if pair[0].priority == pair[1].priority {
                    let i = rules.iter().position(|r| std::ptr::eq(r, pair[0])).unwrap();
                    let j = rules.iter().position(|r| std::ptr::eq(r, pair[1])).unwrap();
                    prop_assert!(i < j);
                }
            }
            let expected = rules.iter().filter(|r| days >= r.days_since_last_contact).count();
            prop_assert_eq!(matched.len(), expected);
        }
    }
}
