// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain entities shared by the store, the services, and the gateway.
//!
//! JSON field names are camelCase to match the REST surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Settlement lifecycle state of an asset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Discovered,
    Contacted,
    DocumentsSubmitted,
    InReview,
    Approved,
    Distributed,
    Closed,
}

impl AssetStatus {
    /// Distributed and closed assets are finished and never followed up on.
    pub fn is_active(self) -> bool {
        !matches!(self, AssetStatus::Distributed | AssetStatus::Closed)
    }
}

/// Purpose of a single contact event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CommunicationType {
    InitialContact,
    FollowUp,
    Escalation,
    Response,
}

/// Channel a contact event went through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CommunicationMethod {
    Email,
    Phone,
    Fax,
    Mail,
    Portal,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EscalationStatus {
    Pending,
    Resolved,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Escalation,
    FollowUp,
    System,
}

/// A person using the tracker: an executor, a beneficiary, or a helper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The estate of a deceased person. Owns assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estate {
    pub id: String,
    pub name: String,
    pub deceased_name: String,
    /// User who receives escalation notifications for this estate.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Typed view of the asset metadata blob.
///
/// Only the last-contact fields are understood; every other key is carried
/// through `extra` so a refresh never drops data written by other tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_type: Option<CommunicationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact_method: Option<CommunicationMethod>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AssetMetadata {
    /// Overwrite the last-contact fields from the newest communication.
    ///
    /// `None` clears them (the asset has no communications left).
    pub fn record_contact(&mut self, latest: Option<&Communication>) {
        self.last_contact = latest.map(|c| c.date);
        self.last_contact_type = latest.map(|c| c.kind);
        self.last_contact_method = latest.map(|c| c.method);
    }
}

/// A discoverable holding belonging to an estate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub estate_id: String,
    pub institution: String,
    /// Free-form type such as `bank_account`, `401k`, or `life_insurance`.
    #[serde(rename = "type")]
    pub asset_type: String,
    pub status: AssetStatus,
    pub value: Option<f64>,
    #[serde(default)]
    pub metadata: AssetMetadata,
    pub requirements: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an asset during discovery or intake.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub estate_id: String,
    pub institution: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(default = "default_new_asset_status")]
    pub status: AssetStatus,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub requirements: Option<serde_json::Value>,
}

fn default_new_asset_status() -> AssetStatus {
    AssetStatus::Discovered
}

/// A single inbound or outbound contact event for an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
    pub id: String,
    pub asset_id: String,
    #[serde(rename = "type")]
    pub kind: CommunicationType,
    pub method: CommunicationMethod,
    pub direction: Direction,
    pub subject: Option<String>,
    pub content: String,
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub next_action_date: Option<DateTime<Utc>>,
    pub next_action_type: Option<String>,
    /// Creation timestamp; the newest `date` is the asset's last contact.
    pub date: DateTime<Utc>,
    pub created_by_id: String,
}

/// Input for recording a communication. `id` and `date` are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewCommunication {
    pub asset_id: String,
    pub kind: CommunicationType,
    pub method: CommunicationMethod,
    pub direction: Direction,
    pub subject: Option<String>,
    pub content: String,
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub next_action_date: Option<DateTime<Utc>>,
    pub next_action_type: Option<String>,
    pub created_by_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub institution: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub estate_id: String,
    pub estate_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A communication joined with its asset, estate, and creator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationDetail {
    #[serde(flatten)]
    pub communication: Communication,
    pub asset: AssetSummary,
    pub created_by: UserSummary,
}

/// A severity-leveled flag that an asset's settlement has stalled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escalation {
    pub id: String,
    pub asset_id: String,
    pub level: i64,
    pub reason: String,
    pub status: EscalationStatus,
    pub triggered_date: DateTime<Utc>,
    pub resolved_date: Option<DateTime<Utc>>,
}

/// A pending escalation together with the asset it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenEscalation {
    #[serde(flatten)]
    pub escalation: Escalation,
    pub institution: String,
    pub asset_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub estate_id: String,
    pub asset_id: Option<String>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
