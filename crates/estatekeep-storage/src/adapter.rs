// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the EstateStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use estatekeep_config::model::StorageConfig;
use estatekeep_core::types::{
    Asset, AssetMetadata, AssetStatus, Communication, CommunicationDetail, Escalation, Estate,
    Notification, OpenEscalation, User,
};
use estatekeep_core::{EstateError, EstateStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened by [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize a store at `path` with WAL enabled.
    pub async fn open(path: &str) -> Result<Self, EstateError> {
        let store = Self::new(StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        });
        store.initialize().await?;
        Ok(store)
    }

    /// Open the database and run migrations. Fails if called twice.
    pub async fn initialize(&self) -> Result<(), EstateError> {
        let path = self.config.database_path.clone();
        let db = Database::open_with(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| EstateError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, EstateError> {
        self.db.get().ok_or_else(|| EstateError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl EstateStore for SqliteStore {
    async fn health_check(&self) -> Result<(), EstateError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)
    }

    async fn close(&self) -> Result<(), EstateError> {
        self.db()?.close().await
    }

    // --- Users and estates ---

    async fn create_user(&self, user: &User) -> Result<(), EstateError> {
        queries::users::create_user(self.db()?, user).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, EstateError> {
        queries::users::get_user(self.db()?, id).await
    }

    async fn create_estate(&self, estate: &Estate) -> Result<(), EstateError> {
        queries::estates::create_estate(self.db()?, estate).await
    }

    async fn get_estate(&self, id: &str) -> Result<Option<Estate>, EstateError> {
        queries::estates::get_estate(self.db()?, id).await
    }

    async fn list_estates(&self) -> Result<Vec<Estate>, EstateError> {
        queries::estates::list_estates(self.db()?).await
    }

    // --- Assets ---

    async fn create_asset(&self, asset: &Asset) -> Result<(), EstateError> {
        queries::assets::create_asset(self.db()?, asset).await
    }

    async fn get_asset(&self, id: &str) -> Result<Option<Asset>, EstateError> {
        queries::assets::get_asset(self.db()?, id).await
    }

    async fn list_assets_for_estate(&self, estate_id: &str) -> Result<Vec<Asset>, EstateError> {
        queries::assets::list_assets_for_estate(self.db()?, estate_id).await
    }

    async fn update_asset_status(
        &self,
        id: &str,
        status: AssetStatus,
        at: DateTime<Utc>,
    ) -> Result<Asset, EstateError> {
        queries::assets::update_asset_status(self.db()?, id, status, at)
            .await?
            .ok_or_else(|| EstateError::not_found("asset", id))
    }

    async fn update_asset_metadata(
        &self,
        id: &str,
        metadata: &AssetMetadata,
        at: DateTime<Utc>,
    ) -> Result<(), EstateError> {
        if queries::assets::update_asset_metadata(self.db()?, id, metadata, at).await? {
            Ok(())
        } else {
            Err(EstateError::not_found("asset", id))
        }
    }

    // --- Communications ---

    async fn insert_communication(&self, comm: &Communication) -> Result<(), EstateError> {
        queries::communications::insert_communication(self.db()?, comm).await
    }

    async fn get_communication(&self, id: &str) -> Result<Option<Communication>, EstateError> {
        queries::communications::get_communication(self.db()?, id).await
    }

    async fn get_communication_detail(
        &self,
        id: &str,
    ) -> Result<Option<CommunicationDetail>, EstateError> {
        queries::communications::get_communication_detail(self.db()?, id).await
    }

    async fn list_communications(&self, asset_id: &str) -> Result<Vec<Communication>, EstateError> {
        queries::communications::list_communications(self.db()?, asset_id).await
    }

    async fn latest_communication(
        &self,
        asset_id: &str,
    ) -> Result<Option<Communication>, EstateError> {
        queries::communications::latest_communication(self.db()?, asset_id).await
    }

    async fn set_communication_response(
        &self,
        id: &str,
        response: &str,
        response_date: DateTime<Utc>,
    ) -> Result<Communication, EstateError> {
        queries::communications::set_communication_response(self.db()?, id, response, response_date)
            .await?
            .ok_or_else(|| EstateError::not_found("communication", id))
    }

    async fn delete_communication(&self, id: &str) -> Result<(), EstateError> {
        if queries::communications::delete_communication(self.db()?, id).await? {
            Ok(())
        } else {
            Err(EstateError::not_found("communication", id))
        }
    }

    // --- Escalations ---

    async fn get_escalation(&self, id: &str) -> Result<Option<Escalation>, EstateError> {
        queries::escalations::get_escalation(self.db()?, id).await
    }

    async fn find_pending_escalation(
        &self,
        asset_id: &str,
    ) -> Result<Option<Escalation>, EstateError> {
        queries::escalations::find_pending_escalation(self.db()?, asset_id).await
    }

    async fn create_escalation_if_none_pending(
        &self,
        escalation: &Escalation,
    ) -> Result<(Escalation, bool), EstateError> {
        queries::escalations::create_escalation_if_none_pending(self.db()?, escalation).await
    }

    async fn resolve_escalation(
        &self,
        id: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<Escalation, EstateError> {
        queries::escalations::resolve_escalation(self.db()?, id, resolved_at)
            .await?
            .ok_or_else(|| EstateError::not_found("escalation", id))
    }

    async fn list_open_escalations(
        &self,
        estate_id: &str,
    ) -> Result<Vec<OpenEscalation>, EstateError> {
        queries::escalations::list_open_escalations(self.db()?, estate_id).await
    }

    async fn list_escalations_for_asset(
        &self,
        asset_id: &str,
    ) -> Result<Vec<Escalation>, EstateError> {
        queries::escalations::list_escalations_for_asset(self.db()?, asset_id).await
    }

    // --- Notifications ---

    async fn insert_notification(&self, notification: &Notification) -> Result<(), EstateError> {
        queries::notifications::insert_notification(self.db()?, notification).await
    }

    async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, EstateError> {
        queries::notifications::list_notifications(self.db()?, user_id, unread_only).await
    }

    async fn mark_notification_read(&self, id: &str) -> Result<(), EstateError> {
        if queries::notifications::mark_notification_read(self.db()?, id).await? {
            Ok(())
        } else {
            Err(EstateError::not_found("notification", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::fixtures::{asset, at, estate, user};
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        store.health_check().await.unwrap();
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn mutations_of_missing_rows_are_not_found() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("missing.db");
        let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();
        let when = at("2026-02-01T00:00:00Z");

        let err = store
            .update_asset_status("nope", AssetStatus::Closed, when)
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::NotFound { entity: "asset", .. }));

        let err = store
            .update_asset_metadata("nope", &AssetMetadata::default(), when)
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::NotFound { entity: "asset", .. }));

        let err = store.resolve_escalation("nope", when).await.unwrap_err();
        assert!(matches!(err, EstateError::NotFound { entity: "escalation", .. }));

        let err = store.delete_communication("nope").await.unwrap_err();
        assert!(matches!(err, EstateError::NotFound { entity: "communication", .. }));

        let err = store
            .set_communication_response("nope", "ok", when)
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::NotFound { entity: "communication", .. }));

        let err = store.mark_notification_read("nope").await.unwrap_err();
        assert!(matches!(err, EstateError::NotFound { entity: "notification", .. }));
        store.close().await.unwrap();
    }

    #[tokio::test]
    async fn asset_lifecycle_through_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let store = SqliteStore::open(db_path.to_str().unwrap()).await.unwrap();

        store.create_user(&user("u1")).await.unwrap();
        store.create_estate(&estate("e1", "u1")).await.unwrap();
        store
            .create_asset(&asset("a1", "e1", AssetStatus::Discovered))
            .await
            .unwrap();

        let updated = store
            .update_asset_status("a1", AssetStatus::Contacted, at("2026-02-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(updated.status, AssetStatus::Contacted);
        assert_eq!(updated.updated_at, at("2026-02-01T00:00:00Z"));

        let assets = store.list_assets_for_estate("e1").await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(store.list_estates().await.unwrap().len(), 1);
        store.close().await.unwrap();
    }
}
