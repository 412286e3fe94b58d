// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end settlement workflow across records, communications,
//! follow-ups, the sweep, and the HTTP router.
//!
//! Each test builds an isolated TestHarness over a temp SQLite file.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use estatekeep_core::types::{AssetStatus, EscalationStatus, NotificationKind};
use estatekeep_core::{FollowUpAction, Priority};
use estatekeep_gateway::{AppState, AuthConfig, HealthState, build_router};
use estatekeep_test_utils::TestHarness;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn get_json(harness: &TestHarness, uri: &str) -> (StatusCode, Value) {
    let state = AppState {
        follow_ups: harness.follow_ups.clone(),
        communications: harness.communications.clone(),
        records: harness.records.clone(),
        store: harness.store.clone(),
        health: HealthState::default(),
    };
    let app = build_router(state, AuthConfig::default());
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ---- Settlement lifecycle ----

#[tokio::test]
async fn settlement_workflow_from_first_letter_to_stalled_claim() {
    let harness = TestHarness::new().await.unwrap();
    let owner = harness.seed_user("Alex Executor").await.unwrap();
    let estate = harness.seed_estate(&owner).await.unwrap();
    let bank = harness
        .seed_asset(&estate, "First National Bank", "bank_account", AssetStatus::Contacted)
        .await
        .unwrap();
    let policy = harness
        .seed_asset(&estate, "Acme Life", "life_insurance", AssetStatus::Contacted)
        .await
        .unwrap();
    harness
        .seed_asset(&estate, "County Recorder", "real_estate", AssetStatus::Closed)
        .await
        .unwrap();

    let bank_letter = harness.log_outbound(&bank, &owner, "Account closure request").await.unwrap();
    harness.log_outbound(&policy, &owner, "Claim form").await.unwrap();

    // Day 8: both open assets get a reminder, the closed one nothing.
    harness.clock.advance_days(8);
    let recs = harness
        .follow_ups
        .get_follow_up_recommendations(&estate.id)
        .await
        .unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.action == FollowUpAction::Remind));
    assert!(recs.iter().all(|r| r.priority == Priority::Medium));
    assert!(harness.communications.sweep_escalations().await.unwrap().is_empty());

    // Day 15: the sweep escalates both and notifies the owner twice.
    harness.clock.advance_days(7);
    let created = harness.communications.sweep_escalations().await.unwrap();
    assert_eq!(created.len(), 2);
    let notifications = harness
        .records
        .list_notifications(&owner.id, true)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.kind == NotificationKind::Escalation));

    // A second sweep the same day opens nothing new.
    assert!(harness.communications.sweep_escalations().await.unwrap().is_empty());

    // The bank answers; its escalation is resolved and stays resolved.
    harness
        .communications
        .add_response(&bank_letter.id, "Funds released", None)
        .await
        .unwrap();
    let bank_escalation = harness
        .store
        .find_pending_escalation(&bank.id)
        .await
        .unwrap()
        .unwrap();
    let resolved = harness
        .follow_ups
        .resolve_escalation(&bank_escalation.id)
        .await
        .unwrap();
    assert_eq!(resolved.status, EscalationStatus::Resolved);
    harness.clock.advance_days(16);
    assert!(harness.communications.sweep_escalations().await.unwrap().is_empty());
    assert!(
        harness
            .store
            .find_pending_escalation(&bank.id)
            .await
            .unwrap()
            .is_none()
    );

    // Day 31: the life insurance claim is the urgent top item.
    let recs = harness
        .follow_ups
        .get_follow_up_recommendations(&estate.id)
        .await
        .unwrap();
    assert_eq!(recs[0].asset_id, policy.id);
    assert_eq!(recs[0].priority, Priority::Urgent);
    assert_eq!(recs[0].days_since_contact, 31);
    assert!(recs[0].message.contains("Acme Life"));

    let (status, body) = get_json(
        &harness,
        &format!("/api/follow-ups/escalations/{}", estate.id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let open = body["escalations"].as_array().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["assetId"], policy.id.as_str());
}

#[tokio::test]
async fn closing_an_asset_stops_the_sweep() {
    let harness = TestHarness::new().await.unwrap();
    let (owner, _, asset) = harness
        .seed_basic("brokerage", AssetStatus::Contacted)
        .await
        .unwrap();
    harness.log_outbound(&asset, &owner, "Transfer request").await.unwrap();
    harness
        .records
        .update_asset_status(&asset.id, AssetStatus::Closed)
        .await
        .unwrap();

    harness.clock.advance_days(40);
    assert!(harness.communications.sweep_escalations().await.unwrap().is_empty());

    let (status, body) = get_json(&harness, &format!("/api/follow-ups/asset/{}", asset.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
    assert_eq!(body["needsEscalation"], false);
}

#[tokio::test]
async fn health_reports_ok_over_a_live_store() {
    let harness = TestHarness::new().await.unwrap();
    let (status, body) = get_json(&harness, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
