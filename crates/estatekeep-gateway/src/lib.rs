// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST API gateway.
//!
//! Exposes the follow-up engine, the communication log, and the record
//! endpoints as JSON over HTTP, with an unauthenticated `/health` probe and
//! optional bearer-token auth on `/api/*`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use error::ApiError;
pub use server::{AppState, GatewayConfig, HealthState, build_router, start_server};
