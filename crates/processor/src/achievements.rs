//! Achievement badge evaluation
//!
//! The catalog is a static table; every evaluation returns one badge per
//! entry in catalog order, achieved or not. New badges are additive rows.

use chrono::{DateTime, Utc};
use common::models::{AchievementBadge, ActivitySnapshot, BadgeKind};

use crate::streak;
use crate::window::{day_start, DateWindows};

/// Everything a badge metric may read
struct EvalContext<'a> {
    snapshot: &'a ActivitySnapshot,
    windows: DateWindows,
    current_streak: u32,
}

/// One catalog entry: a badge and its metric extractor
struct BadgeRule {
    kind: BadgeKind,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    target: u32,
    metric: fn(&EvalContext) -> u32,
}

const CATALOG: &[BadgeRule] = &[
    BadgeRule {
        kind: BadgeKind::WeeklyPr10,
        name: "PR Master",
        description: "Create 10 pull requests in a week",
        icon: "fa-code-branch",
        target: 10,
        metric: weekly_prs,
    },
    BadgeRule {
        kind: BadgeKind::MonthlyPr50,
        name: "PR Champion",
        description: "Create 50 pull requests in a month",
        icon: "fa-trophy",
        target: 50,
        metric: monthly_prs,
    },
    BadgeRule {
        kind: BadgeKind::MonthlyCommits100,
        name: "Commit King",
        description: "Make 100 commits in a month",
        icon: "fa-fire",
        target: 100,
        metric: monthly_commits,
    },
    BadgeRule {
        kind: BadgeKind::WeeklyReviews5,
        name: "Review Helper",
        description: "Review 5 pull requests in a week",
        icon: "fa-eye",
        target: 5,
        metric: review_count,
    },
    BadgeRule {
        kind: BadgeKind::Streak7,
        name: "Week Warrior",
        description: "Contribute 7 days in a row",
        icon: "fa-calendar-week",
        target: 7,
        metric: streak_length,
    },
    BadgeRule {
        kind: BadgeKind::Streak30,
        name: "Month Master",
        description: "Contribute 30 days in a row",
        icon: "fa-calendar-alt",
        target: 30,
        metric: streak_length,
    },
];

fn weekly_prs(ctx: &EvalContext) -> u32 {
    let start = ctx.windows.current_week.start;
    ctx.snapshot
        .pull_requests
        .iter()
        .filter(|pr| pr.created_at >= start)
        .count() as u32
}

fn monthly_prs(ctx: &EvalContext) -> u32 {
    let start = ctx.windows.current_month.start;
    ctx.snapshot
        .pull_requests
        .iter()
        .filter(|pr| pr.created_at >= start)
        .count() as u32
}

fn monthly_commits(ctx: &EvalContext) -> u32 {
    let start = ctx.windows.current_month.start;
    ctx.snapshot
        .calendar
        .days()
        .filter(|d| day_start(d.date) >= start)
        .map(|d| d.contribution_count)
        .sum()
}

fn review_count(ctx: &EvalContext) -> u32 {
    // Already windowed by the fetch layer.
    ctx.snapshot.reviews
}

fn streak_length(ctx: &EvalContext) -> u32 {
    ctx.current_streak
}

/// Evaluate the full badge catalog against a snapshot at `now`.
///
/// `achieved_at` is the evaluation instant whenever the condition holds;
/// there is no durable record of first achievement across evaluations.
pub fn evaluate(snapshot: &ActivitySnapshot, now: DateTime<Utc>) -> Vec<AchievementBadge> {
    let windows = DateWindows::compute(now);
    let streak = streak::calculate(&snapshot.calendar, now.date_naive());
    let ctx = EvalContext {
        snapshot,
        windows,
        current_streak: streak.current_streak,
    };

    CATALOG
        .iter()
        .map(|rule| {
            let progress = (rule.metric)(&ctx);
            let achieved = progress >= rule.target;
            AchievementBadge {
                id: rule.kind,
                name: rule.name.to_string(),
                description: rule.description.to_string(),
                icon: rule.icon.to_string(),
                achieved,
                achieved_at: achieved.then_some(now),
                progress,
                target: rule.target,
            }
        })
        .collect()
}
