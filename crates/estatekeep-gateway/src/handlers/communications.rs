// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Communication log endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use estatekeep_core::types::{
    CommunicationMethod, CommunicationType, Direction, NewCommunication,
};
use serde::Deserialize;

use super::{ApiResult, body, envelope, envelope_with_status, require, require_value, success};
use crate::server::AppState;

/// Request body for POST /api/communications.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunicationRequest {
    pub asset_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<CommunicationType>,
    pub method: Option<CommunicationMethod>,
    pub direction: Option<Direction>,
    pub subject: Option<String>,
    pub content: Option<String>,
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub next_action_date: Option<DateTime<Utc>>,
    pub next_action_type: Option<String>,
    pub created_by_id: Option<String>,
}

/// Request body for PUT /api/communications/{id}/response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRequest {
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
}

/// POST /api/communications
pub async fn post_communication(
    State(state): State<AppState>,
    payload: Result<Json<CreateCommunicationRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let input = NewCommunication {
        asset_id: require(req.asset_id)?,
        kind: require_value(req.kind)?,
        method: require_value(req.method)?,
        direction: require_value(req.direction)?,
        subject: req.subject,
        content: require(req.content)?,
        response: req.response,
        response_date: req.response_date,
        next_action_date: req.next_action_date,
        next_action_type: req.next_action_type,
        created_by_id: require(req.created_by_id)?,
    };
    let communication = state.communications.create_communication(input).await?;
    envelope_with_status(StatusCode::CREATED, "communication", communication)
}

/// GET /api/communications/asset/{asset_id}
pub async fn get_asset_communications(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult {
    let communications = state.communications.get_communications(&asset_id).await?;
    envelope("communications", communications)
}

/// PUT /api/communications/{id}/response
pub async fn put_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ResponseRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let response = require(req.response)?;
    let communication = state
        .communications
        .add_response(&id, &response, req.response_date)
        .await?;
    envelope("communication", communication)
}

/// DELETE /api/communications/{id}
pub async fn delete_communication(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    state.communications.delete_communication(&id).await?;
    success()
}

/// GET /api/communications/asset/{asset_id}/next-actions
pub async fn get_next_actions(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult {
    let actions = state.communications.get_next_actions(&asset_id).await?;
    envelope("actions", actions)
}

/// GET /api/communications/asset/{asset_id}/stats
pub async fn get_stats(State(state): State<AppState>, Path(asset_id): Path<String>) -> ApiResult {
    let stats = state
        .communications
        .get_communication_stats(&asset_id)
        .await?;
    envelope("stats", stats)
}

/// GET /api/communications/asset/{asset_id}/timeline
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> ApiResult {
    let timeline = state
        .communications
        .get_communication_timeline(&asset_id)
        .await?;
    envelope("timeline", timeline)
}
