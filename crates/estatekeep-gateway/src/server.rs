// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use estatekeep_core::{EstateError, EstateStore};
use estatekeep_services::{CommunicationService, FollowUpService, RecordService};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers::{communications, follow_ups, health, records};

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
    pub version: &'static str,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub follow_ups: Arc<FollowUpService>,
    pub communications: Arc<CommunicationService>,
    pub records: Arc<RecordService>,
    /// Queried directly only by the health check.
    pub store: Arc<dyn EstateStore>,
    pub health: HealthState,
}

/// Server bind settings (mirrors `ServerConfig` from estatekeep-config).
#[derive(Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token for `/api/*` (None = auth disabled).
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Build the full application router.
///
/// `/health` is always public; `/api/*` goes through the bearer middleware.
pub fn build_router(state: AppState, auth: AuthConfig) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        // Follow-ups and escalations.
        .route(
            "/api/follow-ups/estate/{estate_id}",
            get(follow_ups::get_estate_follow_ups),
        )
        .route(
            "/api/follow-ups/asset/{asset_id}",
            get(follow_ups::get_asset_follow_ups),
        )
        .route("/api/follow-ups/escalate", post(follow_ups::post_escalate))
        .route(
            "/api/follow-ups/escalation/{id}/resolve",
            put(follow_ups::put_resolve_escalation),
        )
        .route(
            "/api/follow-ups/escalations/{estate_id}",
            get(follow_ups::get_open_escalations),
        )
        // Communications.
        .route(
            "/api/communications",
            post(communications::post_communication),
        )
        .route(
            "/api/communications/asset/{asset_id}",
            get(communications::get_asset_communications),
        )
        .route(
            "/api/communications/asset/{asset_id}/next-actions",
            get(communications::get_next_actions),
        )
        .route(
            "/api/communications/asset/{asset_id}/stats",
            get(communications::get_stats),
        )
        .route(
            "/api/communications/asset/{asset_id}/timeline",
            get(communications::get_timeline),
        )
        .route(
            "/api/communications/{id}/response",
            put(communications::put_response),
        )
        .route(
            "/api/communications/{id}",
            delete(communications::delete_communication),
        )
        // Records.
        .route("/api/users", post(records::post_user))
        .route("/api/users/{id}", get(records::get_user))
        .route(
            "/api/estates",
            post(records::post_estate).get(records::list_estates),
        )
        .route("/api/estates/{id}", get(records::get_estate))
        .route("/api/estates/{id}/assets", get(records::list_estate_assets))
        .route("/api/assets", post(records::post_asset))
        .route("/api/assets/{id}", get(records::get_asset))
        .route("/api/assets/{id}/status", put(records::put_asset_status))
        .route(
            "/api/notifications/{id}",
            get(records::list_notifications),
        )
        .route(
            "/api/notifications/{id}/read",
            put(records::put_notification_read),
        )
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &GatewayConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), EstateError> {
    let app = build_router(
        state,
        AuthConfig {
            bearer_token: config.bearer_token.clone(),
        },
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EstateError::Internal(format!("failed to bind API server to {addr}: {e}")))?;

    tracing::info!(
        %addr,
        auth = config.bearer_token.is_some(),
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| EstateError::Internal(format!("API server error: {e}")))?;

    tracing::info!("API server stopped");
    Ok(())
}
