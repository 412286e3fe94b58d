// SPDX-FileCopyrightText: 2026 Estatekeep Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Elapsed-day arithmetic.
//!
//! Days are elapsed milliseconds divided by 86,400,000, with no calendar or
//! timezone awareness. The rule engine rounds up; the communication views
//! and the no-response trigger round down.

use chrono::{DateTime, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRounding {
    /// Any started day counts. Used by the follow-up rule engine.
    Ceil,
    /// Only completed days count. Used by stats, next actions, and the trigger.
    Floor,
}

/// Whole days from `since` to `now` under `rounding`.
pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>, rounding: DayRounding) -> i64 {
    let days = (now - since).num_milliseconds() as f64 / MS_PER_DAY as f64;
    match rounding {
        DayRounding::Ceil => days.ceil() as i64,
        DayRounding::Floor => days.floor() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn exact_days_agree() {
        let since = at("2026-01-01T00:00:00Z");
        let now = since + Duration::days(15);
        assert_eq!(elapsed_days(since, now, DayRounding::Ceil), 15);
        assert_eq!(elapsed_days(since, now, DayRounding::Floor), 15);
    }

    #[test]
    fn partial_day_rounds_by_mode() {
        let since = at("2026-01-01T00:00:00Z");
        let now = since + Duration::minutes(1);
        assert_eq!(elapsed_days(since, now, DayRounding::Ceil), 1);
        assert_eq!(elapsed_days(since, now, DayRounding::Floor), 0);

        let now = since + Duration::days(13) + Duration::hours(23);
        assert_eq!(elapsed_days(since, now, DayRounding::Ceil), 14);
        assert_eq!(elapsed_days(since, now, DayRounding::Floor), 13);
    }

    #[test]
    fn same_instant_is_zero() {
        let now = at("2026-01-01T00:00:00Z");
        assert_eq!(elapsed_days(now, now, DayRounding::Ceil), 0);
        assert_eq!(elapsed_days(now, now, DayRounding::Floor), 0);
    }

    #[test]
    fn future_contact_is_negative() {
        let now = at("2026-01-01T00:00:00Z");
        let since = now + Duration::hours(12);
        assert_eq!(elapsed_days(since, now, DayRounding::Ceil), 0);
        assert_eq!(elapsed_days(since, now, DayRounding::Floor), -1);
    }
}
