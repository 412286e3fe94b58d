// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up rule engine, communication tracking, and escalations.
//!
//! This crate provides:
//! - **Rule engine**: threshold rules evaluated against each asset's contact history
//! - **Communications**: contact logging with last-contact metadata and the
//!   no-response escalation trigger
//! - **Records**: users, estates, assets, and notifications

pub mod communications;
pub mod days;
pub mod engine;
pub mod followup;
pub mod records;
pub mod rules;

pub use communications::{
    CommunicationService, CommunicationStats, EscalationTrigger, NextAction, NextActionKind,
    TimelineEntry,
};
pub use days::{DayRounding, elapsed_days};
pub use followup::FollowUpService;
pub use records::RecordService;
pub use rules::{RuleSource, StaticRuleSource, default_rules, render_rule_table};
