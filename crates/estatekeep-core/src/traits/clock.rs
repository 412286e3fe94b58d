// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time source for elapsed-day calculations and record timestamps.

use chrono::{DateTime, SubsecRound, Utc};

/// Supplies "now". Services never call `Utc::now()` directly so tests can
/// pin time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;

    /// `now()` truncated to the millisecond precision timestamps are stored
    /// with. Use this for any value written to a record, so the returned
    /// record equals the stored row.
    fn now_millis(&self) -> DateTime<Utc> {
        self.now().trunc_subsecs(3)
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
