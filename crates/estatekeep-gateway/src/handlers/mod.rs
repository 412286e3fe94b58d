// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the REST API.
//!
//! Successful responses are `{"success": true, "<key>": <value>}`.

pub mod communications;
pub mod follow_ups;
pub mod health;
pub mod records;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use estatekeep_core::EstateError;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub(crate) type ApiResult = Result<Response, ApiError>;

/// Wrap `value` under `key` in a success envelope.
pub(crate) fn envelope<T: Serialize>(key: &'static str, value: T) -> ApiResult {
    envelope_with_status(StatusCode::OK, key, value)
}

pub(crate) fn envelope_with_status<T: Serialize>(
    status: StatusCode,
    key: &'static str,
    value: T,
) -> ApiResult {
    let value = serde_json::to_value(value)
        .map_err(|e| EstateError::Internal(format!("response serialization failed: {e}")))?;
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(key.to_string(), value);
    Ok((status, Json(Value::Object(body))).into_response())
}

/// `{"success": true}` with no payload.
pub(crate) fn success() -> ApiResult {
    Ok(Json(serde_json::json!({ "success": true })).into_response())
}

/// Unwrap a JSON body, turning extractor rejections into 400s.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(v)| v).map_err(ApiError::from)
}

/// A required, non-blank string field.
pub(crate) fn require(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::missing_fields()),
    }
}

/// A required non-string field.
pub(crate) fn require_value<T>(field: Option<T>) -> Result<T, ApiError> {
    field.ok_or_else(ApiError::missing_fields)
}
