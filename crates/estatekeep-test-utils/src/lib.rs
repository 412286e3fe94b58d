// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for estatekeep integration tests.
//!
//! # Components
//!
//! - [`ManualClock`] - settable clock for elapsed-day scenarios
//! - [`TestHarness`] - services over a temp SQLite database with seed helpers

pub mod clock;
pub mod harness;

pub use clock::{ManualClock, parse};
pub use harness::{HARNESS_EPOCH, TestHarness, TestHarnessBuilder};
