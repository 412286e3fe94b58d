// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait for the persistence backend (SQLite).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::EstateError;
use crate::types::{
    Asset, AssetMetadata, AssetStatus, Communication, CommunicationDetail, Escalation, Estate,
    Notification, OpenEscalation, User,
};

/// Persistence operations the follow-up and communication services depend on.
///
/// Lookups return `Ok(None)` for missing rows; mutations of a missing row
/// return [`EstateError::NotFound`].
#[async_trait]
pub trait EstateStore: Send + Sync + 'static {
    /// Verifies the backend answers a trivial query.
    async fn health_check(&self) -> Result<(), EstateError>;

    /// Flushes pending writes and releases the connection.
    async fn close(&self) -> Result<(), EstateError>;

    // --- Users and estates ---

    async fn create_user(&self, user: &User) -> Result<(), EstateError>;
    async fn get_user(&self, id: &str) -> Result<Option<User>, EstateError>;
    async fn create_estate(&self, estate: &Estate) -> Result<(), EstateError>;
    async fn get_estate(&self, id: &str) -> Result<Option<Estate>, EstateError>;
    async fn list_estates(&self) -> Result<Vec<Estate>, EstateError>;

    // --- Assets ---

    async fn create_asset(&self, asset: &Asset) -> Result<(), EstateError>;
    async fn get_asset(&self, id: &str) -> Result<Option<Asset>, EstateError>;
    async fn list_assets_for_estate(&self, estate_id: &str) -> Result<Vec<Asset>, EstateError>;
    async fn update_asset_status(
        &self,
        id: &str,
        status: AssetStatus,
        at: DateTime<Utc>,
    ) -> Result<Asset, EstateError>;
    async fn update_asset_metadata(
        &self,
        id: &str,
        metadata: &AssetMetadata,
        at: DateTime<Utc>,
    ) -> Result<(), EstateError>;

    // --- Communications ---

    async fn insert_communication(&self, comm: &Communication) -> Result<(), EstateError>;
    async fn get_communication(&self, id: &str) -> Result<Option<Communication>, EstateError>;
    /// The communication joined with its asset, estate, and creator.
    async fn get_communication_detail(
        &self,
        id: &str,
    ) -> Result<Option<CommunicationDetail>, EstateError>;
    /// All communications for an asset, newest `date` first.
    async fn list_communications(&self, asset_id: &str) -> Result<Vec<Communication>, EstateError>;
    async fn latest_communication(
        &self,
        asset_id: &str,
    ) -> Result<Option<Communication>, EstateError>;
    async fn set_communication_response(
        &self,
        id: &str,
        response: &str,
        response_date: DateTime<Utc>,
    ) -> Result<Communication, EstateError>;
    async fn delete_communication(&self, id: &str) -> Result<(), EstateError>;

    // --- Escalations ---

    async fn get_escalation(&self, id: &str) -> Result<Option<Escalation>, EstateError>;
    async fn find_pending_escalation(
        &self,
        asset_id: &str,
    ) -> Result<Option<Escalation>, EstateError>;
    /// Inserts `escalation` unless the asset already has a pending one.
    ///
    /// Returns the pending escalation and whether it was newly created. The
    /// check and the insert run in one transaction.
    async fn create_escalation_if_none_pending(
        &self,
        escalation: &Escalation,
    ) -> Result<(Escalation, bool), EstateError>;
    async fn resolve_escalation(
        &self,
        id: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<Escalation, EstateError>;
    /// Pending escalations for the estate's assets, newest first.
    async fn list_open_escalations(
        &self,
        estate_id: &str,
    ) -> Result<Vec<OpenEscalation>, EstateError>;
    async fn list_escalations_for_asset(
        &self,
        asset_id: &str,
    ) -> Result<Vec<Escalation>, EstateError>;

    // --- Notifications ---

    async fn insert_notification(&self, notification: &Notification) -> Result<(), EstateError>;
    async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, EstateError>;
    async fn mark_notification_read(&self, id: &str) -> Result<(), EstateError>;
}
