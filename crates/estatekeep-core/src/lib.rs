// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for estatekeep.
//!
//! This crate provides the domain entities, the follow-up rule value
//! objects, the error type, and the trait seams (store, clock) used
//! throughout the workspace.

pub mod error;
pub mod followup;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::EstateError;
pub use followup::{FollowUpAction, FollowUpRecommendation, FollowUpRule, Priority};
pub use traits::{Clock, EstateStore, SystemClock};
