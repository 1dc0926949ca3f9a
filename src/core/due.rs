//! Due-date engine: pure date arithmetic, no store access.

use crate::models::DueStatus;
use chrono::{Days, NaiveDate};

/// How far ahead (in days, inclusive) a schedule counts as "due this week".
pub const WEEK_WINDOW_DAYS: u64 = 6;

/// Latest date a schedule may reach: the stored `YYYY-MM-DD` text and
/// SQLite's `date()` both stop at year 9999.
pub fn last_trackable_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Shift a date forward by `days`, or `None` past [`last_trackable_day`].
pub fn shift_forward(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
        .filter(|d| *d <= last_trackable_day())
}

/// `last_changed + interval_days`, or `None` when it cannot be stored.
pub fn checked_next_due(last_changed: NaiveDate, interval_days: u32) -> Option<NaiveDate> {
    shift_forward(last_changed, interval_days)
}

/// `last_changed + interval_days` for stored schedules. Writes go through
/// [`checked_next_due`], so the clamp only shows up on hand-edited rows.
pub fn next_due(last_changed: NaiveDate, interval_days: u32) -> NaiveDate {
    checked_next_due(last_changed, interval_days).unwrap_or_else(last_trackable_day)
}

/// Last day of the "this week" window that starts at `today`.
pub fn week_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(WEEK_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Classify a schedule relative to `today`.
pub fn classify(
    last_changed: NaiveDate,
    interval_days: u32,
    paused: bool,
    today: NaiveDate,
) -> DueStatus {
    if paused {
        return DueStatus::Paused;
    }

    let due = next_due(last_changed, interval_days);

    if due < today {
        DueStatus::Overdue
    } else if due == today {
        DueStatus::DueToday
    } else if due <= week_end(today) {
        DueStatus::DueThisWeek
    } else {
        DueStatus::Scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn next_due_adds_interval() {
        assert_eq!(next_due(d("2024-01-01"), 14), d("2024-01-15"));
        assert_eq!(next_due(d("2024-02-20"), 10), d("2024-03-01"));
    }

    #[test]
    fn classify_thresholds() {
        let today = d("2024-03-10");

        // next_due 2024-03-09
        assert_eq!(classify(d("2024-03-02"), 7, false, today), DueStatus::Overdue);
        // next_due 2024-03-10
        assert_eq!(classify(d("2024-03-03"), 7, false, today), DueStatus::DueToday);
        // next_due 2024-03-11
        assert_eq!(classify(d("2024-03-04"), 7, false, today), DueStatus::DueThisWeek);
        // next_due 2024-03-16 == today + 6
        assert_eq!(classify(d("2024-03-09"), 7, false, today), DueStatus::DueThisWeek);
        // next_due 2024-03-17 == today + 7
        assert_eq!(classify(d("2024-03-10"), 7, false, today), DueStatus::Scheduled);
    }

    #[test]
    fn paused_wins_over_every_bucket() {
        let today = d("2024-03-10");
        for last in ["2023-01-01", "2024-03-03", "2024-03-05", "2024-12-01"] {
            assert_eq!(classify(d(last), 7, true, today), DueStatus::Paused);
        }
    }

    #[test]
    fn exactly_one_bucket_over_a_range() {
        let today = d("2024-06-15");
        let mut last = d("2024-05-01");
        while last <= d("2024-07-01") {
            let due = next_due(last, 14);
            let status = classify(last, 14, false, today);
            let expected = if due < today {
                DueStatus::Overdue
            } else if due == today {
                DueStatus::DueToday
            } else if (due - today).num_days() <= 6 {
                DueStatus::DueThisWeek
            } else {
                DueStatus::Scheduled
            };
            assert_eq!(status, expected, "last_changed={last}");
            last = last.succ_opt().unwrap();
        }
    }

    #[test]
    fn next_due_clamps_at_year_9999() {
        assert_eq!(next_due(NaiveDate::MAX, 1), last_trackable_day());
        assert_eq!(next_due(d("2024-01-01"), u32::MAX), last_trackable_day());
    }

    #[test]
    fn checked_arithmetic_stops_at_year_9999() {
        assert_eq!(checked_next_due(d("9999-12-17"), 14), Some(d("9999-12-31")));
        assert_eq!(checked_next_due(d("9999-12-18"), 14), None);
        assert_eq!(checked_next_due(d("2024-01-01"), 4_000_000_000), None);
        assert_eq!(shift_forward(d("2024-01-01"), 7), Some(d("2024-01-08")));
        assert_eq!(shift_forward(d("9999-12-31"), 1), None);
    }
}
