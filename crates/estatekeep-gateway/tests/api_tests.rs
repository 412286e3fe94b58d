// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use estatekeep_core::types::AssetStatus;
use estatekeep_gateway::{AppState, AuthConfig, HealthState, build_router};
use estatekeep_test_utils::TestHarness;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(h: &TestHarness, token: Option<&str>) -> Router {
    let state = AppState {
        follow_ups: h.follow_ups.clone(),
        communications: h.communications.clone(),
        records: h.records.clone(),
        store: h.store.clone(),
        health: HealthState::default(),
    };
    build_router(
        state,
        AuthConfig {
            bearer_token: token.map(str::to_string),
        },
    )
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Create owner, estate, and asset over HTTP; returns (user_id, estate_id, asset_id).
async fn seed_over_http(h: &TestHarness, asset_type: &str) -> (String, String, String) {
    let (status, body) = send(
        app(h, None),
        with_json(
            Method::POST,
            "/api/users",
            json!({"name": "Alex Executor", "email": "alex@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app(h, None),
        with_json(
            Method::POST,
            "/api/estates",
            json!({"name": "Estate of Jane Doe", "deceasedName": "Jane Doe", "ownerId": user_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let estate_id = body["estate"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app(h, None),
        with_json(
            Method::POST,
            "/api/assets",
            json!({
                "estateId": estate_id,
                "institution": "Acme Life",
                "type": asset_type,
                "status": "CONTACTED",
                "value": 250000.0
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let asset_id = body["asset"]["id"].as_str().unwrap().to_string();

    (user_id, estate_id, asset_id)
}

#[tokio::test]
async fn health_is_public_even_with_auth() {
    let h = TestHarness::new().await.unwrap();
    let (status, body) = send(app(&h, Some("secret")), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["uptimeSecs"].is_u64());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn api_requires_bearer_token_when_configured() {
    let h = TestHarness::new().await.unwrap();

    let (status, body) = send(app(&h, Some("secret")), get("/api/estates")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let req = Request::builder()
        .uri("/api/estates")
        .header("authorization", "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(&h, Some("secret")), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/estates")
        .header("authorization", "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&h, Some("secret")), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["estates"], json!([]));
}

#[tokio::test]
async fn stalled_life_insurance_claim_is_urgent() {
    let h = TestHarness::new().await.unwrap();
    let (_, estate_id, asset_id) = seed_over_http(&h, "life_insurance").await;
    h.clock.advance_days(31);

    let (status, body) = send(
        app(&h, None),
        get(&format!("/api/follow-ups/estate/{estate_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["assetId"], asset_id.as_str());
    assert_eq!(recs[0]["priority"], "urgent");
    assert_eq!(recs[0]["action"], "escalate");
    assert_eq!(recs[0]["daysSinceContact"], 31);
    assert!(recs[0]["message"].as_str().unwrap().contains("Acme Life"));

    let (status, body) = send(
        app(&h, None),
        get(&format!("/api/follow-ups/asset/{asset_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["needsEscalation"], true);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn escalate_validates_and_deduplicates() {
    let h = TestHarness::new().await.unwrap();
    let (_, estate_id, asset_id) = seed_over_http(&h, "bank_account").await;

    let (status, body) = send(
        app(&h, None),
        with_json(
            Method::POST,
            "/api/follow-ups/escalate",
            json!({"reason": "no asset"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "Missing required fields"}));

    let (status, first) = send(
        app(&h, None),
        with_json(
            Method::POST,
            "/api/follow-ups/escalate",
            json!({"assetId": asset_id, "reason": "Unresponsive", "daysSinceContact": 21}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["escalation"]["level"], 21);
    assert_eq!(first["escalation"]["status"], "pending");

    let (_, second) = send(
        app(&h, None),
        with_json(
            Method::POST,
            "/api/follow-ups/escalate",
            json!({"assetId": asset_id, "reason": "Again", "level": 3}),
        ),
    )
    .await;
    assert_eq!(second["escalation"]["id"], first["escalation"]["id"]);

    let (_, open) = send(
        app(&h, None),
        get(&format!("/api/follow-ups/escalations/{estate_id}")),
    )
    .await;
    let open = open["escalations"].as_array().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["institution"], "Acme Life");
    assert_eq!(open[0]["assetType"], "bank_account");
}

#[tokio::test]
async fn resolve_escalation_and_unknown_ids() {
    let h = TestHarness::new().await.unwrap();
    let (_, _, asset_id) = seed_over_http(&h, "bank_account").await;
    let escalation = h
        .follow_ups
        .create_escalation(&asset_id, "Stalled", 2)
        .await
        .unwrap();

    let req = Request::builder()
        .method(Method::PUT)
        .uri(format!("/api/follow-ups/escalation/{}/resolve", escalation.id))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&h, None), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["escalation"]["status"], "resolved");
    assert!(body["escalation"]["resolvedDate"].is_string());

    let req = Request::builder()
        .method(Method::PUT)
        .uri("/api/follow-ups/escalation/missing/resolve")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&h, None), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "escalation not found: missing");

    let (status, _) = send(app(&h, None), get("/api/follow-ups/asset/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn communication_lifecycle_over_http() {
    let h = TestHarness::new().await.unwrap();
    let (user_id, _, asset_id) = seed_over_http(&h, "bank_account").await;

    let (status, body) = send(
        app(&h, None),
        with_json(
            Method::POST,
            "/api/communications",
            json!({"assetId": asset_id, "type": "carrier_pigeon", "method": "email",
                   "direction": "outbound", "content": "hi", "createdById": user_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        app(&h, None),
        with_json(
            Method::POST,
            "/api/communications",
            json!({"assetId": asset_id, "type": "initial_contact", "method": "fax",
                   "direction": "outbound", "subject": "Claim",
                   "content": "Sent death certificate", "createdById": user_id}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let comm_id = body["communication"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["communication"]["type"], "initial_contact");
    assert_eq!(body["communication"]["asset"]["institution"], "Acme Life");
    assert_eq!(body["communication"]["createdBy"]["id"], user_id.as_str());

    h.clock.advance_days(15);
    h.communications.sweep_escalations().await.unwrap();

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/communications/asset/{asset_id}/next-actions")),
    )
    .await;
    let actions = body["actions"].as_array().unwrap();
    assert_eq!(actions[0]["kind"], "escalation");
    assert_eq!(actions[0]["priority"], "urgent");
    assert_eq!(actions[1]["kind"], "no_response");

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/communications/asset/{asset_id}/timeline")),
    )
    .await;
    let timeline = body["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0]["kind"], "escalation");
    assert_eq!(timeline[1]["kind"], "communication");

    let (status, body) = send(
        app(&h, None),
        with_json(
            Method::PUT,
            &format!("/api/communications/{comm_id}/response"),
            json!({"response": "Claim approved"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["communication"]["response"], "Claim approved");

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/communications/asset/{asset_id}/stats")),
    )
    .await;
    assert_eq!(body["stats"]["totalCommunications"], 1);
    assert_eq!(body["stats"]["responses"], 1);
    assert_eq!(body["stats"]["responseRate"], 100.0);
    assert_eq!(body["stats"]["daysSinceLastContact"], 15);

    let req = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/communications/{comm_id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(&h, None), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/communications/asset/{asset_id}")),
    )
    .await;
    assert_eq!(body["communications"], json!([]));
}

#[tokio::test]
async fn notifications_can_be_filtered_and_marked_read() {
    let h = TestHarness::new().await.unwrap();
    let (user, _, asset) = h
        .seed_basic("bank_account", AssetStatus::Contacted)
        .await
        .unwrap();
    h.log_outbound(&asset, &user, "Letter").await.unwrap();
    h.clock.advance_days(14);
    h.communications.sweep_escalations().await.unwrap();

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/notifications/{}?unread=true", user.id)),
    )
    .await;
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["kind"], "escalation");
    let id = notifications[0]["id"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method(Method::PUT)
        .uri(format!("/api/notifications/{id}/read"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(&h, None), req).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/notifications/{}?unread=true", user.id)),
    )
    .await;
    assert_eq!(body["notifications"], json!([]));
    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/notifications/{}", user.id)),
    )
    .await;
    assert_eq!(body["notifications"][0]["read"], true);
}

#[tokio::test]
async fn asset_status_update_and_validation() {
    let h = TestHarness::new().await.unwrap();
    let (_, estate_id, asset_id) = seed_over_http(&h, "bank_account").await;

    let (status, body) = send(
        app(&h, None),
        with_json(
            Method::PUT,
            &format!("/api/assets/{asset_id}/status"),
            json!({"status": "CLOSED"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asset"]["status"], "CLOSED");

    h.clock.advance_days(60);
    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/follow-ups/estate/{estate_id}")),
    )
    .await;
    assert_eq!(body["recommendations"], json!([]));

    let (status, _) = send(
        app(&h, None),
        with_json(
            Method::PUT,
            &format!("/api/assets/{asset_id}/status"),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        app(&h, None),
        with_json(
            Method::POST,
            "/api/assets",
            json!({"estateId": "ghost", "institution": "X", "type": "bank_account"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(
        app(&h, None),
        get(&format!("/api/estates/{estate_id}/assets")),
    )
    .await;
    assert_eq!(body["assets"].as_array().unwrap().len(), 1);
}
