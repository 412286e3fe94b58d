// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up rule and recommendation value objects.
//!
//! Rules are policy, loaded once at startup from the built-in table or the
//! config file. Recommendations are derived on every request and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::{Asset, AssetStatus};

/// Wildcard asset type that matches every asset.
pub const ALL_ASSET_TYPES: &str = "all";

/// Placeholder replaced with the asset's institution in rule messages.
pub const INSTITUTION_PLACEHOLDER: &str = "{institution}";

/// Recommendation priority. Variant order is sort order: urgent first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FollowUpAction {
    Remind,
    Escalate,
    Alert,
}

/// One threshold policy: `(asset type, status, elapsed days) -> action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FollowUpRule {
    /// `"all"` or an exact asset type.
    pub asset_type: String,
    pub status: AssetStatus,
    pub days_since_last_contact: i64,
    pub action: FollowUpAction,
    pub priority: Priority,
    /// Message template containing `{institution}`.
    pub message: String,
}

impl FollowUpRule {
    pub fn new(
        asset_type: &str,
        status: AssetStatus,
        days_since_last_contact: i64,
        action: FollowUpAction,
        priority: Priority,
        message: &str,
    ) -> Self {
        Self {
            asset_type: asset_type.to_string(),
            status,
            days_since_last_contact,
            action,
            priority,
            message: message.to_string(),
        }
    }

    /// True when the rule applies to `asset` at `days` since last contact.
    pub fn matches(&self, asset: &Asset, days: i64) -> bool {
        (self.asset_type == ALL_ASSET_TYPES || self.asset_type == asset.asset_type)
            && self.status == asset.status
            && days >= self.days_since_last_contact
    }

    pub fn render_message(&self, institution: &str) -> String {
        self.message.replace(INSTITUTION_PLACEHOLDER, institution)
    }
}

/// A derived suggestion telling the user what to do next for an asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRecommendation {
    pub asset_id: String,
    pub institution: String,
    pub asset_type: String,
    pub value: Option<f64>,
    pub days_since_contact: i64,
    pub last_contact_date: DateTime<Utc>,
    pub priority: Priority,
    pub action: FollowUpAction,
    pub message: String,
    /// When the matched threshold was crossed.
    pub due_date: DateTime<Utc>,
}
