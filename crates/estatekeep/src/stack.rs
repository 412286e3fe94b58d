// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires storage, rules, and services from a loaded config.

use std::sync::Arc;

use estatekeep_config::EstatekeepConfig;
use estatekeep_core::{Clock, EstateError, EstateStore, SystemClock};
use estatekeep_gateway::{AppState, HealthState};
use estatekeep_services::{
    CommunicationService, EscalationTrigger, FollowUpService, RecordService, RuleSource,
    StaticRuleSource,
};
use estatekeep_storage::SqliteStore;
use tracing::info;

/// Every long-lived component a command might need.
pub struct Stack {
    pub store: Arc<dyn EstateStore>,
    pub rules: Arc<dyn RuleSource>,
    pub follow_ups: Arc<FollowUpService>,
    pub communications: Arc<CommunicationService>,
    pub records: Arc<RecordService>,
}

impl Stack {
    /// Open the database (running migrations) and build the services.
    pub async fn open(config: &EstatekeepConfig) -> Result<Self, EstateError> {
        let sqlite = SqliteStore::new(config.storage.clone());
        sqlite.initialize().await?;
        let store: Arc<dyn EstateStore> = Arc::new(sqlite);

        let rules: Arc<dyn RuleSource> = Arc::new(StaticRuleSource::from_config(&config.follow_up));
        info!(
            source = rules.describe(),
            count = rules.rules().len(),
            "follow-up rules loaded"
        );

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let follow_ups = Arc::new(FollowUpService::new(
            store.clone(),
            rules.clone(),
            clock.clone(),
        ));
        let communications = Arc::new(CommunicationService::new(
            store.clone(),
            clock.clone(),
            EscalationTrigger::from(&config.escalation),
        ));
        let records = Arc::new(RecordService::new(store.clone(), clock));

        Ok(Self {
            store,
            rules,
            follow_ups,
            communications,
            records,
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            follow_ups: self.follow_ups.clone(),
            communications: self.communications.clone(),
            records: self.records.clone(),
            store: self.store.clone(),
            health: HealthState::default(),
        }
    }

    pub async fn close(&self) -> Result<(), EstateError> {
        self.store.close().await
    }
}

#[cfg(test)]
pub(crate) fn temp_config(dir: &tempfile::TempDir) -> EstatekeepConfig {
    let mut config = EstatekeepConfig::default();
    config.storage.database_path = dir
        .path()
        .join("estatekeep.db")
        .to_string_lossy()
        .into_owned();
    config
}
