// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Users, estates, assets, and notifications.

use std::sync::Arc;

use estatekeep_core::types::{
    Asset, AssetMetadata, AssetStatus, Estate, NewAsset, Notification, User,
};
use estatekeep_core::{Clock, EstateError, EstateStore};
use tracing::info;

fn required(field: &str, value: &str) -> Result<(), EstateError> {
    if value.trim().is_empty() {
        return Err(EstateError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Thin CRUD over the store with id assignment and input checks.
pub struct RecordService {
    store: Arc<dyn EstateStore>,
    clock: Arc<dyn Clock>,
}

impl RecordService {
    pub fn new(store: Arc<dyn EstateStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, EstateError> {
        required("name", name)?;
        required("email", email)?;
        if !email.contains('@') {
            return Err(EstateError::Validation(format!("invalid email: {email}")));
        }
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            created_at: self.clock.now_millis(),
        };
        self.store.create_user(&user).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, EstateError> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| EstateError::not_found("user", id))
    }

    pub async fn create_estate(
        &self,
        name: &str,
        deceased_name: &str,
        owner_id: &str,
    ) -> Result<Estate, EstateError> {
        required("name", name)?;
        required("deceasedName", deceased_name)?;
        self.get_user(owner_id).await?;
        let estate = Estate {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            deceased_name: deceased_name.trim().to_string(),
            owner_id: owner_id.to_string(),
            created_at: self.clock.now_millis(),
        };
        self.store.create_estate(&estate).await?;
        info!(estate_id = %estate.id, owner_id, "estate created");
        Ok(estate)
    }

    pub async fn get_estate(&self, id: &str) -> Result<Estate, EstateError> {
        self.store
            .get_estate(id)
            .await?
            .ok_or_else(|| EstateError::not_found("estate", id))
    }

    pub async fn list_estates(&self) -> Result<Vec<Estate>, EstateError> {
        self.store.list_estates().await
    }

    pub async fn create_asset(&self, input: NewAsset) -> Result<Asset, EstateError> {
        required("institution", &input.institution)?;
        required("type", &input.asset_type)?;
        self.get_estate(&input.estate_id).await?;
        let now = self.clock.now_millis();
        let asset = Asset {
            id: uuid::Uuid::new_v4().to_string(),
            estate_id: input.estate_id,
            institution: input.institution.trim().to_string(),
            asset_type: input.asset_type.trim().to_string(),
            status: input.status,
            value: input.value,
            metadata: AssetMetadata::default(),
            requirements: input.requirements,
            created_at: now,
            updated_at: now,
        };
        self.store.create_asset(&asset).await?;
        info!(asset_id = %asset.id, estate_id = %asset.estate_id, "asset created");
        Ok(asset)
    }

    pub async fn get_asset(&self, id: &str) -> Result<Asset, EstateError> {
        self.store
            .get_asset(id)
            .await?
            .ok_or_else(|| EstateError::not_found("asset", id))
    }

    /// Assets of an existing estate in creation order.
    pub async fn list_assets(&self, estate_id: &str) -> Result<Vec<Asset>, EstateError> {
        self.get_estate(estate_id).await?;
        self.store.list_assets_for_estate(estate_id).await
    }

    pub async fn update_asset_status(
        &self,
        id: &str,
        status: AssetStatus,
    ) -> Result<Asset, EstateError> {
        let asset = self
            .store
            .update_asset_status(id, status, self.clock.now_millis())
            .await?;
        info!(asset_id = id, status = %status, "asset status updated");
        Ok(asset)
    }

    pub async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, EstateError> {
        self.store.list_notifications(user_id, unread_only).await
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), EstateError> {
        self.store.mark_notification_read(id).await
    }
}
