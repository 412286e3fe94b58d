// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for integration testing.
//!
//! `TestHarness` wires the services to a temp SQLite database and a
//! [`ManualClock`], and offers seed helpers that write records at the
//! clock's current time.

use std::sync::Arc;

use estatekeep_config::model::{EscalationConfig, StorageConfig};
use estatekeep_core::types::{
    Asset, AssetMetadata, AssetStatus, Communication, CommunicationMethod, CommunicationType,
    Direction, Estate, NewCommunication, User,
};
use estatekeep_core::{Clock, EstateError, EstateStore, FollowUpRule};
use estatekeep_services::{
    CommunicationService, EscalationTrigger, FollowUpService, RecordService, RuleSource,
    StaticRuleSource,
};
use estatekeep_storage::SqliteStore;

use crate::clock::ManualClock;

/// Default start time of the harness clock.
pub const HARNESS_EPOCH: &str = "2026-03-01T09:00:00Z";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    start: String,
    rules: Option<Vec<FollowUpRule>>,
    escalation: EscalationConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            start: HARNESS_EPOCH.to_string(),
            rules: None,
            escalation: EscalationConfig::default(),
        }
    }

    /// Start the manual clock at `rfc3339` instead of [`HARNESS_EPOCH`].
    pub fn starting_at(mut self, rfc3339: &str) -> Self {
        self.start = rfc3339.to_string();
        self
    }

    /// Replace the built-in rule table.
    pub fn with_rules(mut self, rules: Vec<FollowUpRule>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_escalation(mut self, escalation: EscalationConfig) -> Self {
        self.escalation = escalation;
        self
    }

    /// Build the harness, opening a fresh database in a temp directory.
    pub async fn build(self) -> Result<TestHarness, EstateError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| EstateError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let sqlite = SqliteStore::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        });
        sqlite.initialize().await?;
        let store: Arc<dyn EstateStore> = Arc::new(sqlite);

        let clock = Arc::new(ManualClock::at(&self.start));
        let dyn_clock: Arc<dyn Clock> = clock.clone();

        let rules: Arc<dyn RuleSource> = Arc::new(match self.rules {
            Some(rules) => StaticRuleSource::new(rules),
            None => StaticRuleSource::builtin(),
        });

        let follow_ups = Arc::new(FollowUpService::new(
            store.clone(),
            rules.clone(),
            dyn_clock.clone(),
        ));
        let communications = Arc::new(CommunicationService::new(
            store.clone(),
            dyn_clock.clone(),
            EscalationTrigger::from(&self.escalation),
        ));
        let records = Arc::new(RecordService::new(store.clone(), dyn_clock));

        Ok(TestHarness {
            store,
            clock,
            rules,
            follow_ups,
            communications,
            records,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete service stack over a temp database.
pub struct TestHarness {
    /// SQLite store (temp DB, cleaned up on drop).
    pub store: Arc<dyn EstateStore>,
    pub clock: Arc<ManualClock>,
    pub rules: Arc<dyn RuleSource>,
    pub follow_ups: Arc<FollowUpService>,
    pub communications: Arc<CommunicationService>,
    pub records: Arc<RecordService>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with the built-in rules and default trigger settings.
    pub async fn new() -> Result<Self, EstateError> {
        Self::builder().build().await
    }

    pub async fn seed_user(&self, name: &str) -> Result<User, EstateError> {
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            created_at: self.clock.now_millis(),
        };
        self.store.create_user(&user).await?;
        Ok(user)
    }

    pub async fn seed_estate(&self, owner: &User) -> Result<Estate, EstateError> {
        let estate = Estate {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Estate of Jane Doe".to_string(),
            deceased_name: "Jane Doe".to_string(),
            owner_id: owner.id.clone(),
            created_at: self.clock.now_millis(),
        };
        self.store.create_estate(&estate).await?;
        Ok(estate)
    }

    /// Insert an asset created at the clock's current time.
    pub async fn seed_asset(
        &self,
        estate: &Estate,
        institution: &str,
        asset_type: &str,
        status: AssetStatus,
    ) -> Result<Asset, EstateError> {
        let now = self.clock.now_millis();
        let asset = Asset {
            id: uuid::Uuid::new_v4().to_string(),
            estate_id: estate.id.clone(),
            institution: institution.to_string(),
            asset_type: asset_type.to_string(),
            status,
            value: Some(10_000.0),
            metadata: AssetMetadata::default(),
            requirements: None,
            created_at: now,
            updated_at: now,
        };
        self.store.create_asset(&asset).await?;
        Ok(asset)
    }

    /// Record an outbound email through the communication service.
    pub async fn log_outbound(
        &self,
        asset: &Asset,
        author: &User,
        content: &str,
    ) -> Result<Communication, EstateError> {
        let detail = self
            .communications
            .create_communication(NewCommunication {
                asset_id: asset.id.clone(),
                kind: CommunicationType::FollowUp,
                method: CommunicationMethod::Email,
                direction: Direction::Outbound,
                subject: None,
                content: content.to_string(),
                response: None,
                response_date: None,
                next_action_date: None,
                next_action_type: None,
                created_by_id: author.id.clone(),
            })
            .await?;
        Ok(detail.communication)
    }

    /// One owner, one estate, and one asset.
    pub async fn seed_basic(
        &self,
        asset_type: &str,
        status: AssetStatus,
    ) -> Result<(User, Estate, Asset), EstateError> {
        let user = self.seed_user("Alex Executor").await?;
        let estate = self.seed_estate(&user).await?;
        let asset = self
            .seed_asset(&estate, "First National Bank", asset_type, status)
            .await?;
        Ok((user, estate, asset))
    }
}
