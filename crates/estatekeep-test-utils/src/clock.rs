// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A clock tests can set and advance.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use estatekeep_core::Clock;

/// Clock frozen at a chosen instant until moved.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock starting at `rfc3339`.
    ///
    /// # Panics
    ///
    /// Panics if `rfc3339` does not parse.
    pub fn at(rfc3339: &str) -> Self {
        Self::new(parse(rfc3339))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Panics
///
/// Panics on malformed input; test helper only.
pub fn parse(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap_or_else(|e| panic!("bad timestamp {rfc3339:?}: {e}"))
        .with_timezone(&Utc)
}
