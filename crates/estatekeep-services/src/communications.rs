// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Communication tracking, the no-response escalation trigger, and the
//! per-asset views built from communication history.
//!
//! Every write refreshes the asset's last-contact metadata and then re-runs
//! the trigger. The trigger and the views count days by floor rounding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use estatekeep_config::model::EscalationConfig;
use estatekeep_core::types::{
    Asset, Communication, CommunicationDetail, Direction, Escalation, EscalationStatus,
    NewCommunication, Notification, NotificationKind,
};
use estatekeep_core::{Clock, EstateError, EstateStore, Priority};
use serde::Serialize;
use strum::Display;
use tracing::{debug, info, warn};

use crate::days::{DayRounding, elapsed_days};

/// Days without a response before `get_next_actions` suggests a reminder.
pub const NO_RESPONSE_REMINDER_DAYS: i64 = 7;

/// Settings for the fixed no-response escalation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationTrigger {
    pub no_response_days: i64,
    pub level: i64,
    pub notify_owner: bool,
}

impl Default for EscalationTrigger {
    fn default() -> Self {
        Self::from(&EscalationConfig::default())
    }
}

impl From<&EscalationConfig> for EscalationTrigger {
    fn from(config: &EscalationConfig) -> Self {
        Self {
            no_response_days: config.no_response_days,
            level: config.level,
            notify_owner: config.notify_owner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NextActionKind {
    NoResponse,
    ScheduledAction,
    Escalation,
}

/// A suggested next step for one asset, derived from its newest
/// communication and its pending escalation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAction {
    pub kind: NextActionKind,
    pub priority: Priority,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStats {
    pub total_communications: usize,
    pub outbound: usize,
    pub inbound: usize,
    /// Communications with a recorded response.
    pub responses: usize,
    /// `responses / outbound * 100`, or 0 with no outbound communications.
    pub response_rate: f64,
    pub first_contact: Option<DateTime<Utc>>,
    pub last_contact: Option<DateTime<Utc>>,
    pub days_since_first_contact: i64,
    pub days_since_last_contact: i64,
}

/// One entry of an asset's merged history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Communication(Communication),
    Escalation(Escalation),
}

impl TimelineEntry {
    /// `date` for communications, `triggered_date` for escalations.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            TimelineEntry::Communication(c) => c.date,
            TimelineEntry::Escalation(e) => e.triggered_date,
        }
    }
}

/// Persists communications and runs the no-response trigger.
pub struct CommunicationService {
    store: Arc<dyn EstateStore>,
    clock: Arc<dyn Clock>,
    trigger: EscalationTrigger,
}

impl CommunicationService {
    pub fn new(
        store: Arc<dyn EstateStore>,
        clock: Arc<dyn Clock>,
        trigger: EscalationTrigger,
    ) -> Self {
        Self {
            store,
            clock,
            trigger,
        }
    }

    pub fn trigger(&self) -> EscalationTrigger {
        self.trigger
    }

    async fn require_asset(&self, asset_id: &str) -> Result<Asset, EstateError> {
        self.store
            .get_asset(asset_id)
            .await?
            .ok_or_else(|| EstateError::not_found("asset", asset_id))
    }

    /// Record a communication dated now, refresh metadata, run the trigger.
    pub async fn create_communication(
        &self,
        input: NewCommunication,
    ) -> Result<CommunicationDetail, EstateError> {
        if input.content.trim().is_empty() {
            return Err(EstateError::Validation("content must not be empty".into()));
        }
        self.require_asset(&input.asset_id).await?;
        if self.store.get_user(&input.created_by_id).await?.is_none() {
            return Err(EstateError::not_found("user", &input.created_by_id));
        }

        let comm = Communication {
            id: uuid::Uuid::new_v4().to_string(),
            asset_id: input.asset_id,
            kind: input.kind,
            method: input.method,
            direction: input.direction,
            subject: input.subject,
            content: input.content,
            response: input.response,
            response_date: input.response_date,
            next_action_date: input.next_action_date,
            next_action_type: input.next_action_type,
            date: self.clock.now_millis(),
            created_by_id: input.created_by_id,
        };
        self.store.insert_communication(&comm).await?;
        info!(
            asset_id = %comm.asset_id,
            communication_id = %comm.id,
            kind = %comm.kind,
            direction = %comm.direction,
            "communication recorded"
        );

        self.refresh_metadata(&comm.asset_id).await?;
        self.check_escalation_trigger(&comm.asset_id).await?;

        self.store
            .get_communication_detail(&comm.id)
            .await?
            .ok_or_else(|| EstateError::Internal(format!("communication {} vanished", comm.id)))
    }

    /// Attach a response, refresh metadata, and re-run the trigger.
    pub async fn add_response(
        &self,
        communication_id: &str,
        response: &str,
        response_date: Option<DateTime<Utc>>,
    ) -> Result<Communication, EstateError> {
        if response.trim().is_empty() {
            return Err(EstateError::Validation("response must not be empty".into()));
        }
        let response_date = response_date.unwrap_or_else(|| self.clock.now_millis());
        let comm = self
            .store
            .set_communication_response(communication_id, response, response_date)
            .await?;
        debug!(communication_id, asset_id = %comm.asset_id, "response recorded");

        self.refresh_metadata(&comm.asset_id).await?;
        self.check_escalation_trigger(&comm.asset_id).await?;
        Ok(comm)
    }

    /// Remove a communication and refresh the asset's metadata.
    pub async fn delete_communication(&self, communication_id: &str) -> Result<(), EstateError> {
        let comm = self
            .store
            .get_communication(communication_id)
            .await?
            .ok_or_else(|| EstateError::not_found("communication", communication_id))?;
        self.store.delete_communication(communication_id).await?;
        info!(communication_id, asset_id = %comm.asset_id, "communication deleted");
        self.refresh_metadata(&comm.asset_id).await
    }

    /// All communications for the asset, newest first.
    pub async fn get_communications(
        &self,
        asset_id: &str,
    ) -> Result<Vec<Communication>, EstateError> {
        self.store.list_communications(asset_id).await
    }

    /// Overwrite the last-contact metadata fields from the newest
    /// communication, keeping every other metadata key.
    async fn refresh_metadata(&self, asset_id: &str) -> Result<(), EstateError> {
        let asset = self.require_asset(asset_id).await?;
        let latest = self.store.latest_communication(asset_id).await?;
        let mut metadata = asset.metadata;
        metadata.record_contact(latest.as_ref());
        self.store
            .update_asset_metadata(asset_id, &metadata, self.clock.now_millis())
            .await
    }

    /// Escalate when the newest communication has gone unanswered too long.
    ///
    /// Returns the escalation only when this call created it. An existing
    /// pending escalation suppresses the trigger.
    pub async fn check_escalation_trigger(
        &self,
        asset_id: &str,
    ) -> Result<Option<Escalation>, EstateError> {
        let Some(latest) = self.store.latest_communication(asset_id).await? else {
            return Ok(None);
        };
        if latest.response.is_some() {
            return Ok(None);
        }
        let days = elapsed_days(latest.date, self.clock.now(), DayRounding::Floor);
        if days < self.trigger.no_response_days {
            return Ok(None);
        }
        if self.store.find_pending_escalation(asset_id).await?.is_some() {
            return Ok(None);
        }

        let candidate = Escalation {
            id: uuid::Uuid::new_v4().to_string(),
            asset_id: asset_id.to_string(),
            level: self.trigger.level,
            reason: format!("No response after {days} days"),
            status: EscalationStatus::Pending,
            triggered_date: self.clock.now_millis(),
            resolved_date: None,
        };
        let (escalation, created) = self.store.create_escalation_if_none_pending(&candidate).await?;
        if !created {
            return Ok(None);
        }
        info!(
            asset_id,
            escalation_id = %escalation.id,
            days,
            "no-response escalation triggered"
        );

        if self.trigger.notify_owner {
            self.notify_owner(asset_id, &escalation).await?;
        }
        Ok(Some(escalation))
    }

    async fn notify_owner(
        &self,
        asset_id: &str,
        escalation: &Escalation,
    ) -> Result<(), EstateError> {
        let asset = self.require_asset(asset_id).await?;
        let Some(estate) = self.store.get_estate(&asset.estate_id).await? else {
            warn!(asset_id, estate_id = %asset.estate_id, "estate missing, owner not notified");
            return Ok(());
        };
        let notification = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: estate.owner_id,
            estate_id: estate.id,
            asset_id: Some(asset.id),
            kind: NotificationKind::Escalation,
            title: format!("Escalation: {}", asset.institution),
            message: escalation.reason.clone(),
            read: false,
            created_at: self.clock.now_millis(),
        };
        self.store.insert_notification(&notification).await?;
        debug!(asset_id, notification_id = %notification.id, "owner notified");
        Ok(())
    }

    /// Suggested next steps from the newest communication and the pending
    /// escalation, urgent first.
    pub async fn get_next_actions(&self, asset_id: &str) -> Result<Vec<NextAction>, EstateError> {
        let now = self.clock.now();
        let mut actions = Vec::new();

        if let Some(latest) = self.store.latest_communication(asset_id).await? {
            let days = elapsed_days(latest.date, now, DayRounding::Floor);
            if latest.response.is_none() && days >= NO_RESPONSE_REMINDER_DAYS {
                let priority = if days >= self.trigger.no_response_days {
                    Priority::High
                } else {
                    Priority::Medium
                };
                actions.push(NextAction {
                    kind: NextActionKind::NoResponse,
                    priority,
                    message: format!("No response in {days} days, follow up"),
                    communication_id: Some(latest.id.clone()),
                    escalation_id: None,
                    due_date: None,
                });
            }
            if let Some(due) = latest.next_action_date
                && due <= now
            {
                let what = latest.next_action_type.as_deref().unwrap_or("follow-up");
                actions.push(NextAction {
                    kind: NextActionKind::ScheduledAction,
                    priority: Priority::High,
                    message: format!("Scheduled {what} is due"),
                    communication_id: Some(latest.id.clone()),
                    escalation_id: None,
                    due_date: Some(due),
                });
            }
        }

        if let Some(escalation) = self.store.find_pending_escalation(asset_id).await? {
            actions.push(NextAction {
                kind: NextActionKind::Escalation,
                priority: Priority::Urgent,
                message: format!("Pending escalation: {}", escalation.reason),
                communication_id: None,
                escalation_id: Some(escalation.id),
                due_date: None,
            });
        }

        actions.sort_by_key(|a| a.priority);
        Ok(actions)
    }

    /// Counts, response rate, and contact recency for one asset.
    pub async fn get_communication_stats(
        &self,
        asset_id: &str,
    ) -> Result<CommunicationStats, EstateError> {
        let comms = self.store.list_communications(asset_id).await?;
        let now = self.clock.now();

        let outbound = comms
            .iter()
            .filter(|c| c.direction == Direction::Outbound)
            .count();
        let inbound = comms.len() - outbound;
        let responses = comms.iter().filter(|c| c.response.is_some()).count();
        let response_rate = if outbound == 0 {
            0.0
        } else {
            responses as f64 / outbound as f64 * 100.0
        };

        // Newest first, so the oldest is last.
        let last_contact = comms.first().map(|c| c.date);
        let first_contact = comms.last().map(|c| c.date);
        let since = |d: Option<DateTime<Utc>>| {
            d.map(|d| elapsed_days(d, now, DayRounding::Floor))
                .unwrap_or(0)
        };

        Ok(CommunicationStats {
            total_communications: comms.len(),
            outbound,
            inbound,
            responses,
            response_rate,
            first_contact,
            last_contact,
            days_since_first_contact: since(first_contact),
            days_since_last_contact: since(last_contact),
        })
    }

    /// Communications and escalations merged, newest first.
    pub async fn get_communication_timeline(
        &self,
        asset_id: &str,
    ) -> Result<Vec<TimelineEntry>, EstateError> {
        let comms = self.store.list_communications(asset_id).await?;
        let escalations = self.store.list_escalations_for_asset(asset_id).await?;

        let mut timeline: Vec<TimelineEntry> = comms
            .into_iter()
            .map(TimelineEntry::Communication)
            .chain(escalations.into_iter().map(TimelineEntry::Escalation))
            .collect();
        timeline.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(timeline)
    }

    /// Run the trigger for every active asset of every estate.
    ///
    /// Returns the escalations this sweep created.
    pub async fn sweep_escalations(&self) -> Result<Vec<Escalation>, EstateError> {
        let mut created = Vec::new();
        let mut checked = 0usize;
        for estate in self.store.list_estates().await? {
            for asset in self.store.list_assets_for_estate(&estate.id).await? {
                if !asset.status.is_active() {
                    continue;
                }
                checked += 1;
                if let Some(escalation) = self.check_escalation_trigger(&asset.id).await? {
                    created.push(escalation);
                }
            }
        }
        info!(checked, created = created.len(), "escalation sweep complete");
        Ok(created)
    }
}
