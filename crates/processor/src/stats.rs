//! Period-over-period statistics aggregation

use chrono::{DateTime, Utc};
use common::models::{ActivitySnapshot, PeriodStats, StatsData};

use crate::window::{DateWindows, Window};

/// Bucket snapshot activity into the four comparison windows.
///
/// Windows are counted independently; an item that falls in both a week and
/// a month window is counted in both.
pub fn aggregate(snapshot: &ActivitySnapshot, now: DateTime<Utc>) -> StatsData {
    let windows = DateWindows::compute(now);
    StatsData {
        current_week: period_stats(snapshot, &windows.current_week),
        previous_week: period_stats(snapshot, &windows.previous_week),
        current_month: period_stats(snapshot, &windows.current_month),
        previous_month: period_stats(snapshot, &windows.previous_month),
    }
}

fn period_stats(snapshot: &ActivitySnapshot, window: &Window) -> PeriodStats {
    // Calendar contribution counts double as the commit tally.
    let commits = snapshot
        .calendar
        .days()
        .filter(|d| window.contains_day(d.date))
        .map(|d| d.contribution_count)
        .sum();

    let pull_requests = snapshot
        .pull_requests
        .iter()
        .filter(|pr| window.contains(pr.created_at))
        .count() as u32;

    let issues = snapshot
        .issues
        .iter()
        .filter(|issue| window.contains(issue.updated_at))
        .count() as u32;

    let reviews = snapshot
        .reviewed_prs
        .iter()
        .filter(|pr| window.contains(pr.updated_at))
        .count() as u32;

    let comments = snapshot
        .commented_prs
        .iter()
        .filter(|pr| window.contains(pr.updated_at))
        .count() as u32;

    PeriodStats {
        commits,
        pull_requests,
        reviews,
        issues,
        comments,
    }
}
