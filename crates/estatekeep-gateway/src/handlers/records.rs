// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Users, estates, assets, and notifications.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use estatekeep_core::types::{AssetStatus, NewAsset};
use serde::Deserialize;

use super::{ApiResult, body, envelope, envelope_with_status, require, require_value, success};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstateRequest {
    pub name: Option<String>,
    pub deceased_name: Option<String>,
    pub owner_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub estate_id: Option<String>,
    pub institution: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub status: Option<AssetStatus>,
    pub value: Option<f64>,
    pub requirements: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<AssetStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    /// Only unread notifications when `true`.
    #[serde(default)]
    pub unread: bool,
}

/// POST /api/users
pub async fn post_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let name = require(req.name)?;
    let email = require(req.email)?;
    let user = state.records.create_user(&name, &email).await?;
    envelope_with_status(StatusCode::CREATED, "user", user)
}

/// GET /api/users/{id}
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    envelope("user", state.records.get_user(&id).await?)
}

/// POST /api/estates
pub async fn post_estate(
    State(state): State<AppState>,
    payload: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let name = require(req.name)?;
    let deceased_name = require(req.deceased_name)?;
    let owner_id = require(req.owner_id)?;
    let estate = state
        .records
        .create_estate(&name, &deceased_name, &owner_id)
        .await?;
    envelope_with_status(StatusCode::CREATED, "estate", estate)
}

/// GET /api/estates
pub async fn list_estates(State(state): State<AppState>) -> ApiResult {
    envelope("estates", state.records.list_estates().await?)
}

/// GET /api/estates/{id}
pub async fn get_estate(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    envelope("estate", state.records.get_estate(&id).await?)
}

/// GET /api/estates/{id}/assets
pub async fn list_estate_assets(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    envelope("assets", state.records.list_assets(&id).await?)
}

/// POST /api/assets
pub async fn post_asset(
    State(state): State<AppState>,
    payload: Result<Json<CreateAssetRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let input = NewAsset {
        estate_id: require(req.estate_id)?,
        institution: require(req.institution)?,
        asset_type: require(req.asset_type)?,
        status: req.status.unwrap_or(AssetStatus::Discovered),
        value: req.value,
        requirements: req.requirements,
    };
    let asset = state.records.create_asset(input).await?;
    envelope_with_status(StatusCode::CREATED, "asset", asset)
}

/// GET /api/assets/{id}
pub async fn get_asset(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    envelope("asset", state.records.get_asset(&id).await?)
}

/// PUT /api/assets/{id}/status
pub async fn put_asset_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult {
    let req = body(payload)?;
    let status = require_value(req.status)?;
    let asset = state.records.update_asset_status(&id, status).await?;
    envelope("asset", asset)
}

/// GET /api/notifications/{id}?unread=true, where `id` is the user id.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult {
    let notifications = state
        .records
        .list_notifications(&user_id, query.unread)
        .await?;
    envelope("notifications", notifications)
}

/// PUT /api/notifications/{id}/read
pub async fn put_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult {
    state.records.mark_notification_read(&id).await?;
    success()
}
