// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up recommendations and escalations.
//!
//! - GET  /api/follow-ups/estate/{estate_id}
//! - GET  /api/follow-ups/asset/{asset_id}
//! - POST /api/follow-ups/escalate
//! - PUT  /api/follow-ups/escalation/{id}/resolve
//! - GET  /api/follow-ups/escalations/{estate_id}

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use super::{ApiResult, body, envelope, require};
use crate::server::AppState;

/// Level used when an escalate request names none.
pub const DEFAULT_ESCALATION_LEVEL: i64 = 1;

/// Request body for POST /api/follow-ups/escalate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalateRequest {
    pub asset_id: Option<String>,
    pub reason: Option<String>,
    /// Stored as the escalation level; `daysSinceContact` is accepted too.
    #[serde(alias = "daysSinceContact")]
    pub level: Option<i64>,
}

/// GET /api/follow-ups/estate/{estate_id}
pub async fn get_estate_follow_ups(
    State(state): State<AppState>,
    Path(estate_id): Path<String>,
) -> ApiResult {
    let recommendations = state
        .follow_ups
        .get_follow_up_recommendations(&estate_id)
        .await?;
    envelope("recommendations", recommendations)
}

/// GET /api/follow-ups/asset/{asset_id}
pub async fn get_asset_follow_ups(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult {
    let recommendations = state
        .follow_ups
        .get_asset_follow_up_recommendations(&asset_id)
        .await?;
    let needs_escalation = state.follow_ups.needs_escalation(&asset_id).await?;
    Ok(Json(json!({
        "success": true,
        "recommendations": recommendations,
        "needsEscalation": needs_escalation,
    }))
    .into_response())
}

/// POST /api/follow-ups/escalate
pub async fn post_escalate(
    State(state): State<AppState>,
    payload: Result<Json<EscalateRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let asset_id = require(req.asset_id)?;
    let reason = require(req.reason)?;
    let level = req.level.unwrap_or(DEFAULT_ESCALATION_LEVEL);

    let escalation = state
        .follow_ups
        .create_escalation(&asset_id, &reason, level)
        .await?;
    envelope("escalation", escalation)
}

/// PUT /api/follow-ups/escalation/{id}/resolve
pub async fn put_resolve_escalation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    let escalation = state.follow_ups.resolve_escalation(&id).await?;
    envelope("escalation", escalation)
}

/// GET /api/follow-ups/escalations/{estate_id}
pub async fn get_open_escalations(
    State(state): State<AppState>,
    Path(estate_id): Path<String>,
) -> ApiResult {
    let escalations = state.follow_ups.get_open_escalations(&estate_id).await?;
    envelope("escalations", escalations)
}
