//! Contribution streak calculation

use chrono::{Duration, NaiveDate};
use common::models::{ContributionCalendar, StreakResult};
use std::collections::HashMap;

/// Compute current and longest consecutive-day streaks as of `today`.
///
/// A zero-contribution today does not break an existing streak until the day
/// ends, it just does not count toward it. A calendar that has no entry for
/// today yet behaves the same way; any other missing day is a gap.
pub fn calculate(calendar: &ContributionCalendar, today: NaiveDate) -> StreakResult {
    // The API pads the last week with zero-count future days; drop them so
    // they cannot mask the real most recent day.
    let days: Vec<(NaiveDate, u32)> = calendar
        .days()
        .filter(|d| d.date <= today)
        .map(|d| (d.date, d.contribution_count))
        .collect();

    if days.is_empty() {
        return StreakResult::default();
    }

    let by_date: HashMap<NaiveDate, u32> = days.iter().copied().collect();
    let count_on = |date: NaiveDate| by_date.get(&date).copied().unwrap_or(0);

    let today_contributed = count_on(today) > 0;

    // Current streak: walk backward day-by-day. Today is skipped (not
    // broken) when it has no contributions yet.
    let mut day = if today_contributed {
        today
    } else {
        today - Duration::days(1)
    };
    let mut current_streak = 0u32;
    while count_on(day) > 0 {
        current_streak += 1;
        day = day - Duration::days(1);
    }

    // Longest streak: forward scan for the longest run of adjacent
    // contribution days.
    let mut longest_streak = 0u32;
    let mut run = 0u32;
    let mut prev_nonzero: Option<NaiveDate> = None;
    for &(date, count) in &days {
        if count > 0 {
            run = match prev_nonzero {
                Some(prev) if prev.succ_opt() == Some(date) => run + 1,
                _ => 1,
            };
            prev_nonzero = Some(date);
            longest_streak = longest_streak.max(run);
        } else {
            run = 0;
            prev_nonzero = None;
        }
    }

    StreakResult {
        current_streak,
        longest_streak,
        today_contributed,
    }
}
