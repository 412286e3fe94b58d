// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of service errors onto HTTP responses.
//!
//! Every error body is `{"success": false, "error": "<message>"}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use estatekeep_core::EstateError;
use serde_json::json;

/// Message returned when a request body lacks a required field.
pub const MISSING_FIELDS: &str = "Missing required fields";

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or incomplete request input.
    BadRequest(String),
    /// Missing or wrong bearer token.
    Unauthorized,
    /// An error from the services or the store.
    Estate(EstateError),
}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::BadRequest(MISSING_FIELDS.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Estate(EstateError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Estate(EstateError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Estate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthorized => "Unauthorized".to_string(),
            ApiError::Estate(e) => e.to_string(),
        }
    }
}

impl From<EstateError> for ApiError {
    fn from(e: EstateError) -> Self {
        ApiError::Estate(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "request rejected");
        }
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ApiError::missing_fields().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(EstateError::Validation("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(EstateError::not_found("asset", "a1")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(EstateError::NoRulesProvided).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(EstateError::Internal("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_is_the_error_display() {
        let err = ApiError::from(EstateError::not_found("escalation", "x9"));
        assert_eq!(err.message(), "escalation not found: x9");
    }
}
