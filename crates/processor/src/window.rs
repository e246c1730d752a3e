//! Calendar-aligned comparison windows
//!
//! All four windows derive from a single `now` so that one evaluation pass
//! never mixes boundaries computed across a scheduling gap.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// An inclusive date-time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// A calendar day falls in the window when its UTC midnight does
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.contains(day_start(day))
    }
}

/// The four comparison windows used by stats and badge evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindows {
    pub current_week: Window,
    pub previous_week: Window,
    pub current_month: Window,
    pub previous_month: Window,
}

impl DateWindows {
    /// Compute all windows from one instant.
    ///
    /// Weeks are Sunday-aligned, months calendar-aligned. Previous windows
    /// end one millisecond before the current ones start; current windows
    /// end at `now`.
    pub fn compute(now: DateTime<Utc>) -> Self {
        let days_into_week = now.weekday().num_days_from_sunday() as i64;
        let current_week_start = day_start(now.date_naive() - Duration::days(days_into_week));
        let previous_week_start = current_week_start - Duration::days(7);
        let previous_week_end = current_week_start - Duration::milliseconds(1);

        let current_month_start = month_start(now.year(), now.month());
        let (prev_year, prev_month) = if now.month() == 1 {
            (now.year() - 1, 12)
        } else {
            (now.year(), now.month() - 1)
        };
        let previous_month_start = month_start(prev_year, prev_month);
        let previous_month_end = current_month_start - Duration::milliseconds(1);

        DateWindows {
            current_week: Window {
                start: current_week_start,
                end: now,
            },
            previous_week: Window {
                start: previous_week_start,
                end: previous_week_end,
            },
            current_month: Window {
                start: current_month_start,
                end: now,
            },
            previous_month: Window {
                start: previous_month_start,
                end: previous_month_end,
            },
        }
    }
}

/// Midnight UTC of a calendar day
pub(crate) fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .expect("first of a valid month is a valid date");
    day_start(first)
}
