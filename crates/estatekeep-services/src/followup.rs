// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up recommendations and the escalation lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use estatekeep_core::types::{Asset, Escalation, EscalationStatus, OpenEscalation};
use estatekeep_core::{
    Clock, EstateError, EstateStore, FollowUpAction, FollowUpRecommendation, Priority,
};
use tracing::{debug, info};

use crate::days::{DayRounding, elapsed_days};
use crate::engine::{matching_rules, recommend, select_top_rule};
use crate::rules::RuleSource;

/// Evaluates the rule table against assets and manages escalations.
pub struct FollowUpService {
    store: Arc<dyn EstateStore>,
    rules: Arc<dyn RuleSource>,
    clock: Arc<dyn Clock>,
}

impl FollowUpService {
    pub fn new(
        store: Arc<dyn EstateStore>,
        rules: Arc<dyn RuleSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            rules,
            clock,
        }
    }

    pub fn rule_source(&self) -> &dyn RuleSource {
        self.rules.as_ref()
    }

    /// Newest communication date, or the asset's creation time.
    async fn last_contact(&self, asset: &Asset) -> Result<DateTime<Utc>, EstateError> {
        Ok(self
            .store
            .latest_communication(&asset.id)
            .await?
            .map(|c| c.date)
            .unwrap_or(asset.created_at))
    }

    /// Every matching rule for one asset as recommendations, urgent first.
    async fn evaluate(&self, asset: &Asset) -> Result<Vec<FollowUpRecommendation>, EstateError> {
        if !asset.status.is_active() {
            return Ok(Vec::new());
        }
        let last_contact = self.last_contact(asset).await?;
        let days = elapsed_days(last_contact, self.clock.now(), DayRounding::Ceil);
        Ok(matching_rules(self.rules.rules(), asset, days)
            .into_iter()
            .map(|rule| recommend(asset, rule, days, last_contact))
            .collect())
    }

    /// One recommendation per active asset of the estate, from its top rule.
    ///
    /// An unknown estate has no assets and yields an empty list.
    pub async fn get_follow_up_recommendations(
        &self,
        estate_id: &str,
    ) -> Result<Vec<FollowUpRecommendation>, EstateError> {
        let assets = self.store.list_assets_for_estate(estate_id).await?;
        let now = self.clock.now();
        let mut recommendations = Vec::new();

        for asset in assets.iter().filter(|a| a.status.is_active()) {
            let last_contact = self.last_contact(asset).await?;
            let days = elapsed_days(last_contact, now, DayRounding::Ceil);
            let matched = matching_rules(self.rules.rules(), asset, days);
            if matched.is_empty() {
                continue;
            }
            let top = select_top_rule(matched)?;
            recommendations.push(recommend(asset, top, days, last_contact));
        }

        recommendations.sort_by_key(|r| r.priority);
        debug!(
            estate_id,
            assets = assets.len(),
            recommendations = recommendations.len(),
            "evaluated follow-up rules"
        );
        Ok(recommendations)
    }

    /// Every matching rule for a single asset, not only the top one.
    pub async fn get_asset_follow_up_recommendations(
        &self,
        asset_id: &str,
    ) -> Result<Vec<FollowUpRecommendation>, EstateError> {
        let asset = self
            .store
            .get_asset(asset_id)
            .await?
            .ok_or_else(|| EstateError::not_found("asset", asset_id))?;
        self.evaluate(&asset).await
    }

    /// True when any recommendation for the asset escalates or is urgent.
    pub async fn needs_escalation(&self, asset_id: &str) -> Result<bool, EstateError> {
        let recommendations = self.get_asset_follow_up_recommendations(asset_id).await?;
        Ok(recommendations
            .iter()
            .any(|r| r.action == FollowUpAction::Escalate || r.priority == Priority::Urgent))
    }

    /// Open an escalation, or return the asset's existing pending one unchanged.
    pub async fn create_escalation(
        &self,
        asset_id: &str,
        reason: &str,
        level: i64,
    ) -> Result<Escalation, EstateError> {
        if self.store.get_asset(asset_id).await?.is_none() {
            return Err(EstateError::not_found("asset", asset_id));
        }
        let candidate = Escalation {
            id: uuid::Uuid::new_v4().to_string(),
            asset_id: asset_id.to_string(),
            level,
            reason: reason.to_string(),
            status: EscalationStatus::Pending,
            triggered_date: self.clock.now_millis(),
            resolved_date: None,
        };
        let (escalation, created) = self.store.create_escalation_if_none_pending(&candidate).await?;
        if created {
            info!(asset_id, escalation_id = %escalation.id, level, "escalation created");
        } else {
            debug!(asset_id, escalation_id = %escalation.id, "pending escalation already exists");
        }
        Ok(escalation)
    }

    /// Mark resolved now. Resolving twice re-stamps `resolved_date`.
    pub async fn resolve_escalation(&self, escalation_id: &str) -> Result<Escalation, EstateError> {
        let escalation = self
            .store
            .resolve_escalation(escalation_id, self.clock.now_millis())
            .await?;
        info!(escalation_id, asset_id = %escalation.asset_id, "escalation resolved");
        Ok(escalation)
    }

    /// Pending escalations across the estate, newest first.
    pub async fn get_open_escalations(
        &self,
        estate_id: &str,
    ) -> Result<Vec<OpenEscalation>, EstateError> {
        self.store.list_open_escalations(estate_id).await
    }
}
