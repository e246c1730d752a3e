//! Domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of the GitHub contribution calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
    /// Display hint from the API, passed through untouched
    pub color: String,
}

/// A calendar week (7 days, partial at the range edges)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionWeek {
    pub days: Vec<ContributionDay>,
}

/// A user's contribution calendar over a date range.
///
/// Weeks are chronological and days within a week are chronological,
/// so the flattened day sequence is gap-free for the requested range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionCalendar {
    /// Flattened chronological day sequence
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }
}

/// Reference to a repository an item belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRef {
    pub name_with_owner: String,
    pub url: String,
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: i32,
    pub title: String,
    pub state: PrState,
    pub review_decision: Option<ReviewDecision>,
    pub repo: RepoRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments_count: u32,
    pub reviews_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approved,
    ChangesRequested,
    ReviewRequired,
}

/// An issue the user is involved in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: i32,
    pub title: String,
    pub state: IssueState,
    pub repo: RepoRef,
    pub updated_at: DateTime<Utc>,
    pub comments_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

/// Consecutive-day contribution streaks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakResult {
    /// Consecutive days up to today (or yesterday when today has no
    /// contributions yet)
    pub current_streak: u32,
    pub longest_streak: u32,
    pub today_contributed: bool,
}

/// Activity counts for one time window
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodStats {
    pub commits: u32,
    pub pull_requests: u32,
    pub reviews: u32,
    pub issues: u32,
    pub comments: u32,
}

/// Period-over-period comparison stats
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsData {
    pub current_week: PeriodStats,
    pub previous_week: PeriodStats,
    pub current_month: PeriodStats,
    pub previous_month: PeriodStats,
}

/// The fixed set of achievement badges.
///
/// The wire ids are part of the dashboard contract; `rename_all` would drop
/// the underscore before the trailing digits, so each variant names its id
/// explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    #[serde(rename = "weekly_pr_10")]
    WeeklyPr10,
    #[serde(rename = "monthly_pr_50")]
    MonthlyPr50,
    #[serde(rename = "monthly_commits_100")]
    MonthlyCommits100,
    #[serde(rename = "weekly_reviews_5")]
    WeeklyReviews5,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_30")]
    Streak30,
}

/// Evaluated state of one achievement badge.
///
/// Recomputed fully on every evaluation; `achieved_at` is the evaluation
/// instant when the condition holds, there is no durable unlock record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementBadge {
    pub id: BadgeKind,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub achieved: bool,
    pub achieved_at: Option<DateTime<Utc>>,
    /// Raw metric value, never clamped to `target`
    pub progress: u32,
    pub target: u32,
}

/// Immutable input bundle for one evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    pub calendar: ContributionCalendar,
    /// PRs created by the user
    pub pull_requests: Vec<PullRequest>,
    /// PRs the user has reviewed
    pub reviewed_prs: Vec<PullRequest>,
    /// PRs the user has commented on
    pub commented_prs: Vec<PullRequest>,
    /// Issues the user is involved in
    pub issues: Vec<Issue>,
    /// Review count supplied by the fetch layer (already windowed)
    pub reviews: u32,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_kind_wire_ids() {
        let ids: Vec<String> = [
            BadgeKind::WeeklyPr10,
            BadgeKind::MonthlyPr50,
            BadgeKind::MonthlyCommits100,
            BadgeKind::WeeklyReviews5,
            BadgeKind::Streak7,
            BadgeKind::Streak30,
        ]
        .iter()
        .map(|k| serde_json::to_string(k).unwrap())
        .collect();

        assert_eq!(
            ids,
            vec![
                "\"weekly_pr_10\"",
                "\"monthly_pr_50\"",
                "\"monthly_commits_100\"",
                "\"weekly_reviews_5\"",
                "\"streak_7\"",
                "\"streak_30\"",
            ]
        );
    }

    #[test]
    fn test_badge_kind_round_trips() {
        let kind: BadgeKind = serde_json::from_str("\"weekly_pr_10\"").unwrap();
        assert_eq!(kind, BadgeKind::WeeklyPr10);
    }
}
